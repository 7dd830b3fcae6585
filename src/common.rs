//! Shot outcomes and the error types shared by the board, match and registry.

use core::fmt;

use crate::bitboard::BitBoardError;
use crate::coord::{Coord, CoordError};
use crate::ship::{ShipKind, UnknownShipKind};

/// Result of a shot that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub hit: bool,
    /// Whether the ship that was hit is now sunk; `None` on a miss.
    pub sunk: Option<bool>,
    /// Whether every ship on the defending board is now sunk.
    pub sunk_all: bool,
}

impl AttackOutcome {
    pub const MISS: AttackOutcome = AttackOutcome {
        hit: false,
        sunk: None,
        sunk_all: false,
    };

    pub fn hit(sunk: bool, sunk_all: bool) -> Self {
        AttackOutcome {
            hit: true,
            sunk: Some(sunk),
            sunk_all,
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardError {
    /// Underlying bitboard error.
    BitBoardError(BitBoardError),
    /// The ship kind is already on the board.
    ShipAlreadyPlaced(ShipKind),
    /// The board's fleet does not include this kind.
    ShipNotInFleet(ShipKind),
    /// Ship placement overlaps another ship.
    ShipOverlaps,
    /// Ship footprint leaves the board.
    ShipOutOfBounds,
    /// Shots are refused until the whole fleet is placed.
    ShipsNotPlaced,
    /// Every ship on this board is already sunk.
    AlreadyDefeated,
    /// The cell was already attacked and repeats are not allowed.
    AlreadyAttacked(Coord),
    /// Random placement gave up.
    UnableToPlaceShip,
    /// A grid cell carries a marker with no placed ship behind it.
    UnknownMarker(u8),
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl BoardError {
    /// Stable wire code.
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::BitBoardError(_) | BoardError::ShipOutOfBounds => "bad_ship_coords",
            BoardError::ShipOverlaps => "ship_overlaps",
            BoardError::ShipAlreadyPlaced(_) => "ship_already_placed",
            BoardError::ShipNotInFleet(_) => "unknown_ship",
            BoardError::ShipsNotPlaced => "not_all_ships_added",
            BoardError::AlreadyDefeated => "all_ships_already_sunk",
            BoardError::AlreadyAttacked(_) => "already_attacked",
            BoardError::UnableToPlaceShip => "unable_to_place_ship",
            BoardError::UnknownMarker(_) => "internal_error",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::BitBoardError(_)
            | BoardError::ShipAlreadyPlaced(_)
            | BoardError::ShipNotInFleet(_)
            | BoardError::ShipOverlaps
            | BoardError::ShipOutOfBounds
            | BoardError::UnableToPlaceShip => ErrorKind::InvalidInput,
            BoardError::ShipsNotPlaced
            | BoardError::AlreadyDefeated
            | BoardError::AlreadyAttacked(_) => ErrorKind::Precondition,
            BoardError::UnknownMarker(_) => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::ShipAlreadyPlaced(kind) => write!(f, "{} is already placed", kind),
            BoardError::ShipNotInFleet(kind) => write!(f, "{} is not part of this fleet", kind),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipsNotPlaced => write!(f, "Not all ships have been placed"),
            BoardError::AlreadyDefeated => write!(f, "All ships on this board are already sunk"),
            BoardError::AlreadyAttacked(c) => write!(f, "Cell {} was already attacked", c),
            BoardError::UnableToPlaceShip => write!(f, "Unable to place ship"),
            BoardError::UnknownMarker(m) => write!(f, "Grid marker {} has no placed ship", m),
        }
    }
}

/// Broad class of a rejection, for mapping onto transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    NotFound,
    Unauthorized,
    InvalidInput,
    Precondition,
    /// A broken internal invariant; never caused by the caller.
    Internal,
}

/// Rejections from match, registry and service operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameError {
    UnknownMatch,
    UnknownPlayer,
    /// Session token missing or not the one bound to the player.
    Unauthorized,
    MalformedCoordinates(CoordError),
    UnknownShipKind,
    /// Board rejection, passed through unchanged.
    Board(BoardError),
    NoOpponent,
    MatchFull,
    MatchFinished,
    NotYourTurn,
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl From<CoordError> for GameError {
    fn from(err: CoordError) -> Self {
        GameError::MalformedCoordinates(err)
    }
}

impl From<UnknownShipKind> for GameError {
    fn from(_: UnknownShipKind) -> Self {
        GameError::UnknownShipKind
    }
}

impl GameError {
    /// Stable wire code.
    pub fn code(&self) -> &'static str {
        match self {
            GameError::UnknownMatch => "game_not_found",
            GameError::UnknownPlayer => "player_not_found",
            GameError::Unauthorized => "player_session_not_authorized",
            GameError::MalformedCoordinates(_) => "bad_coords",
            GameError::UnknownShipKind => "unknown_ship",
            GameError::Board(e) => e.code(),
            GameError::NoOpponent => "no_opposing_player",
            GameError::MatchFull => "max_players_already_joined",
            GameError::MatchFinished => "game_finished",
            GameError::NotYourTurn => "not_your_turn",
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::UnknownMatch | GameError::UnknownPlayer => ErrorKind::NotFound,
            GameError::Unauthorized => ErrorKind::Unauthorized,
            GameError::MalformedCoordinates(_) | GameError::UnknownShipKind => {
                ErrorKind::InvalidInput
            }
            GameError::Board(e) => e.kind(),
            GameError::NoOpponent
            | GameError::MatchFull
            | GameError::MatchFinished
            | GameError::NotYourTurn => ErrorKind::Precondition,
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::UnknownMatch => write!(f, "Match not found"),
            GameError::UnknownPlayer => write!(f, "Player not found in this match"),
            GameError::Unauthorized => write!(f, "Session token does not match the player"),
            GameError::MalformedCoordinates(e) => write!(f, "{}", e),
            GameError::UnknownShipKind => write!(f, "Unknown ship kind"),
            GameError::Board(e) => write!(f, "{}", e),
            GameError::NoOpponent => write!(f, "No opponent has joined yet"),
            GameError::MatchFull => write!(f, "Both players have already joined"),
            GameError::MatchFinished => write!(f, "The match is already finished"),
            GameError::NotYourTurn => write!(f, "It is the other player's turn"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BitBoardError {}
#[cfg(feature = "std")]
impl std::error::Error for CoordError {}
#[cfg(feature = "std")]
impl std::error::Error for BoardError {}
#[cfg(feature = "std")]
impl std::error::Error for GameError {}
