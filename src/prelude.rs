//! Commonly used types and utilities for ease of import.

pub use crate::{
    AttackOutcome, Board, Coord, GameError, Match, MatchId, Orientation, Placement, PlayerId,
    Registry, Rules, SessionToken, ShipKind,
};

#[cfg(feature = "std")]
pub use crate::{LobbyApi, RegistryService, Skeleton, Stub};

#[cfg(feature = "std")]
pub use crate::transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
