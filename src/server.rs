#![cfg(feature = "std")]

//! TCP front end: one tokio task per connection, all sharing one registry.

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::time::Duration;

use crate::config::Rules;
use crate::registry::Registry;
use crate::service::{shared, RegistryService, SharedRegistry};
use crate::skeleton::Skeleton;
use crate::transport::tcp::{
    TcpLimits, TcpTransport, DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_FRAME, DEFAULT_TIMEOUT,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub rules: Rules,
    /// Fixes ids and tokens for reproducible runs.
    pub seed: Option<u64>,
    pub io_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_frame: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "0.0.0.0:8888".to_string(),
            rules: Rules::default(),
            seed: None,
            io_timeout: DEFAULT_TIMEOUT,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_frame: DEFAULT_MAX_FRAME,
        }
    }
}

impl ServerConfig {
    pub fn limits(&self) -> TcpLimits {
        TcpLimits {
            io_timeout: self.io_timeout,
            idle_timeout: self.idle_timeout,
            max_frame: self.max_frame,
        }
    }

    /// Empty registry built from the configured rules and seed.
    pub fn registry(&self) -> SharedRegistry {
        let registry = match self.seed {
            Some(seed) => Registry::with_rules(self.rules, SmallRng::seed_from_u64(seed)),
            None => Registry::from_entropy(self.rules),
        };
        shared(registry)
    }
}

/// Accept connections until the listener fails.
pub async fn serve(
    listener: TcpListener,
    registry: SharedRegistry,
    config: &ServerConfig,
) -> anyhow::Result<()> {
    let limits = config.limits();
    if let Ok(addr) = listener.local_addr() {
        info!("listening on {}", addr);
    }
    loop {
        let (stream, peer) = listener.accept().await?;
        info!("connection from {}", peer);
        let service = RegistryService::new(registry.clone());
        tokio::spawn(async move {
            let transport = TcpTransport::with_limits(stream, limits);
            let mut skeleton = Skeleton::new(service, transport);
            match skeleton.run().await {
                Ok(()) => info!("{} disconnected", peer),
                Err(e) => warn!("session with {} ended: {}", peer, e),
            }
        });
    }
}

/// Bind `config.bind` and serve with a fresh registry.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&config.bind).await?;
    let registry = config.registry();
    serve(listener, registry, &config).await
}
