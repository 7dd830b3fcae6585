#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    init_logging, play_local_match, rejection, run_server, LobbyApi, MatchId, PlayerId,
    RepeatAttacks, Rules, ServerConfig, SessionToken, Stub, TcpTransport, TurnOrder,
};
#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use serde_json::{json, Value};
#[cfg(feature = "std")]
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Run the match server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8888")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible ids (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Players must alternate shots, creator first.
        #[arg(long)]
        strict_turns: bool,
        /// Refuse shots at cells that were already attacked.
        #[arg(long)]
        reject_repeat_attacks: bool,
        /// Per-frame send/receive timeout.
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
    /// Play a scripted match in-process and print its summary.
    Local {
        #[arg(long, help = "Fix RNG seed for a reproducible match (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long)]
        strict_turns: bool,
    },
    /// Send one request to a running server.
    Client {
        #[arg(long, default_value = "127.0.0.1:8888")]
        connect: String,
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Action {
    /// Create a match and take its first seat.
    Create,
    /// List match ids.
    List,
    /// Show a match; pass your session to see your own ships.
    Show {
        #[arg(long = "match")]
        match_id: MatchId,
        #[arg(long)]
        session: Option<SessionToken>,
    },
    /// Take the second seat in a match.
    Join {
        #[arg(long = "match")]
        match_id: MatchId,
    },
    /// Place a ship, e.g. `--ship carrier --at 0-0-x`.
    Place {
        #[arg(long = "match")]
        match_id: MatchId,
        #[arg(long)]
        player: PlayerId,
        #[arg(long)]
        session: Option<SessionToken>,
        #[arg(long)]
        ship: String,
        #[arg(long)]
        at: String,
    },
    /// Fire at a cell, e.g. `--at 3-7`.
    Fire {
        #[arg(long = "match")]
        match_id: MatchId,
        #[arg(long)]
        player: PlayerId,
        #[arg(long)]
        session: Option<SessionToken>,
        #[arg(long)]
        at: String,
    },
}

#[cfg(feature = "std")]
fn rules_from_flags(strict_turns: bool, reject_repeat_attacks: bool) -> Rules {
    Rules {
        turn_order: if strict_turns {
            TurnOrder::Alternating
        } else {
            TurnOrder::Free
        },
        repeat_attacks: if reject_repeat_attacks {
            RepeatAttacks::Reject
        } else {
            RepeatAttacks::Allow
        },
    }
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            seed,
            strict_turns,
            reject_repeat_attacks,
            timeout_secs,
        } => {
            let config = ServerConfig {
                bind,
                rules: rules_from_flags(strict_turns, reject_repeat_attacks),
                seed,
                io_timeout: Duration::from_secs(timeout_secs),
                ..ServerConfig::default()
            };
            if let Some(s) = seed {
                log::info!("using fixed seed {}", s);
            }
            run_server(config).await?;
        }
        Commands::Local { seed, strict_turns } => {
            let seed = seed.unwrap_or_else(rand::random);
            let summary = play_local_match(seed, rules_from_flags(strict_turns, false)).await?;
            println!(
                "{}",
                json!({ "seed": seed, "summary": serde_json::to_value(&summary)? })
            );
        }
        Commands::Client { connect, action } => {
            let mut stub = Stub::new(TcpTransport::connect(&connect).await?);
            let result = run_action(&mut stub, action).await;
            let envelope = match result {
                Ok(data) => json!({ "code": "ok", "data": data }),
                Err(err) => match rejection(&err) {
                    Some(rejected) => json!({ "code": rejected.code(), "data": rejected.to_string() }),
                    None => return Err(err),
                },
            };
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn run_action(api: &mut impl LobbyApi, action: Action) -> anyhow::Result<Value> {
    let data = match action {
        Action::Create => serde_json::to_value(api.create_match().await?)?,
        Action::List => serde_json::to_value(api.list_matches().await?)?,
        Action::Show { match_id, session } => {
            serde_json::to_value(api.get_match(match_id, session).await?)?
        }
        Action::Join { match_id } => serde_json::to_value(api.join_match(match_id).await?)?,
        Action::Place {
            match_id,
            player,
            session,
            ship,
            at,
        } => {
            api.place_ship(match_id, player, session, &ship, &at).await?;
            Value::Null
        }
        Action::Fire {
            match_id,
            player,
            session,
            at,
        } => serde_json::to_value(api.submit_move(match_id, player, session, &at).await?)?,
    };
    Ok(data)
}
