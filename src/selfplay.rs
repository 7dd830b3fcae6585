#![cfg(feature = "std")]

//! Two scripted clients playing a full match through the request protocol.

use log::info;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::config::{Rules, SHIPS};
use crate::coord::Coord;
use crate::ids::{MatchId, PlayerId};
use crate::protocol::{JoinedMatch, LobbyApi};
use crate::registry::Registry;
use crate::service::{shared, RegistryService, SharedRegistry};
use crate::skeleton::Skeleton;
use crate::stub::Stub;
use crate::transport::in_memory::InMemoryTransport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfPlaySummary {
    pub match_id: MatchId,
    pub winner: PlayerId,
    /// Shots fired by both players together.
    pub shots: usize,
}

/// A scripted client: its seat, a connection and the cells it has yet to try.
struct Seat {
    stub: Stub<InMemoryTransport>,
    joined: JoinedMatch,
    targets: Vec<Coord>,
}

fn connect(registry: &SharedRegistry) -> Stub<InMemoryTransport> {
    let (client, server) = InMemoryTransport::pair();
    let service = RegistryService::new(registry.clone());
    tokio::spawn(async move {
        let mut skeleton = Skeleton::new(service, server);
        skeleton.run().await
    });
    Stub::new(client)
}

/// Choose a layout on a scratch board and submit it ship by ship.
async fn place_fleet(seat: &mut Seat, rng: &mut SmallRng) -> anyhow::Result<()> {
    let JoinedMatch {
        match_id,
        player_id,
        session,
    } = seat.joined.clone();
    let mut scratch = Board::new(player_id, session);
    for kind in SHIPS {
        let placement = scratch
            .random_placement(rng, kind)
            .map_err(|e| anyhow::anyhow!(e))?;
        scratch
            .place_ship(kind, placement.origin, placement.orientation)
            .map_err(|e| anyhow::anyhow!(e))?;
        seat.stub
            .place_ship(
                match_id,
                player_id,
                Some(session),
                kind.name(),
                &placement.to_string(),
            )
            .await?;
    }
    Ok(())
}

fn sweep(rng: &mut SmallRng) -> Vec<Coord> {
    let mut cells: Vec<Coord> = Coord::all().collect();
    cells.shuffle(rng);
    cells
}

/// Play one match to completion. The same `seed` and `rules` always produce
/// the same summary.
pub async fn play_local_match(seed: u64, rules: Rules) -> anyhow::Result<SelfPlaySummary> {
    let registry = shared(Registry::with_rules(rules, SmallRng::seed_from_u64(seed)));
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));

    let mut host = connect(&registry);
    let created = host.create_match().await?;
    let match_id = created.seat.match_id;
    let mut guest = connect(&registry);
    let joined = guest.join_match(match_id).await?;
    info!("self-play match {} started", match_id);

    let mut seats = [
        Seat {
            stub: host,
            joined: created.seat,
            targets: sweep(&mut rng),
        },
        Seat {
            stub: guest,
            joined,
            targets: sweep(&mut rng),
        },
    ];
    for seat in seats.iter_mut() {
        place_fleet(seat, &mut rng).await?;
    }

    // The creator fires first; turns alternate until a fleet is gone.
    let mut shots = 0;
    let mut turn = 0;
    loop {
        let seat = &mut seats[turn];
        let target = seat
            .targets
            .pop()
            .ok_or_else(|| anyhow::anyhow!("ran out of targets without a winner"))?;
        let outcome = seat
            .stub
            .submit_move(
                match_id,
                seat.joined.player_id,
                Some(seat.joined.session),
                &target.to_string(),
            )
            .await?;
        shots += 1;
        if outcome.sunk_all {
            break;
        }
        turn = 1 - turn;
    }

    let state = seats[0]
        .stub
        .get_match(match_id, Some(seats[0].joined.session))
        .await?;
    let winner = state
        .winner
        .ok_or_else(|| anyhow::anyhow!("match {} finished without a winner", match_id))?;
    info!(
        "self-play match {} won by {} after {} shots",
        match_id, winner, shots
    );
    Ok(SelfPlaySummary {
        match_id,
        winner,
        shots,
    })
}
