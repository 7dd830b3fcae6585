//! Server-side rules engine for two-player Battleship matches.
//!
//! The core (boards, ships, matches, registry, views) builds without `std`;
//! the request protocol, transports and server need the `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bitboard;
mod board;
mod common;
mod config;
mod coord;
mod game;
mod ids;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
#[cfg(feature = "std")]
pub mod protocol;
mod registry;
#[cfg(feature = "std")]
pub mod selfplay;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
pub mod service;
mod ship;
#[cfg(feature = "std")]
pub mod skeleton;
#[cfg(feature = "std")]
pub mod stub;
#[cfg(feature = "std")]
pub mod transport;
pub mod view;

pub use bitboard::{BitBoard, BitBoardError, Cells};
pub use board::{AttackMark, Board};
pub use common::{AttackOutcome, BoardError, ErrorKind, GameError};
pub use config::{
    fleet_cells, RepeatAttacks, Rules, TurnOrder, BOARD_SIZE, MAX_PLAYERS, NUM_SHIPS, SHIPS,
    TOTAL_SHIP_CELLS,
};
pub use coord::{Coord, CoordError, Placement};
pub use game::{Match, MatchPhase};
pub use ids::{MatchId, PlayerId, SessionToken};
pub use registry::Registry;
pub use ship::{Orientation, Ship, ShipKind, UnknownShipKind};
pub use view::{BoardView, MatchView, ShipView};

#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use protocol::{
    rejection, CreatedMatch, JoinedMatch, LobbyApi, Message, Request, Response, PROTOCOL_VERSION,
};
#[cfg(feature = "std")]
pub use selfplay::{play_local_match, SelfPlaySummary};
#[cfg(feature = "std")]
pub use server::{run_server, serve, ServerConfig};
#[cfg(feature = "std")]
pub use service::{shared, RegistryService, SharedRegistry};
#[cfg(feature = "std")]
pub use skeleton::Skeleton;
#[cfg(feature = "std")]
pub use stub::Stub;
#[cfg(feature = "std")]
pub use transport::tcp::TcpTransport;
