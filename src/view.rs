//! What a viewer is allowed to see of a match.
//!
//! Visibility is decided here and nowhere else: a board's marker grid and
//! ship list are only ever projected for the board's owner. Attack results
//! are public.

use alloc::vec::Vec;

use crate::board::Board;
use crate::coord::Coord;
use crate::game::{Match, MatchPhase};
use crate::ids::{MatchId, PlayerId};
use crate::ship::ShipKind;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipView {
    pub kind: ShipKind,
    pub length: usize,
    pub hit_count: usize,
    pub sunk: bool,
    pub marker: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardView {
    pub player_id: PlayerId,
    pub sunk_all: bool,
    /// Row-major attack grid: 0 unattempted, 1 hit, 2 miss.
    pub attacks: Vec<Vec<u8>>,
    /// Shots received, oldest first.
    pub moves: Vec<Coord>,
    /// Row-major marker grid; owner only.
    pub grid: Option<Vec<Vec<u8>>>,
    /// Placed ships; owner only.
    pub ships: Option<Vec<ShipView>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchView {
    pub id: MatchId,
    pub in_progress: bool,
    pub phase: MatchPhase,
    pub winner: Option<PlayerId>,
    /// Boards in join order.
    pub players: Vec<BoardView>,
}

/// Project one board for a viewer who does or does not own it.
pub fn project_board(board: &Board, is_owner: bool) -> BoardView {
    let attacks = board
        .attack_grid()
        .iter()
        .map(|row| row.iter().map(|mark| mark.code()).collect())
        .collect();
    let (grid, ships) = if is_owner {
        let grid = board.marker_grid().iter().map(|row| row.to_vec()).collect();
        let ships = board.ships().map(|ship| ship.export()).collect();
        (Some(grid), Some(ships))
    } else {
        (None, None)
    };
    BoardView {
        player_id: board.player_id(),
        sunk_all: board.is_sunk_all(),
        attacks,
        moves: board.moves().to_vec(),
        grid,
        ships,
    }
}

/// Project a whole match. `viewer` owns at most one of the boards; `None`
/// sees every board as an outsider.
pub fn project_match(game: &Match, viewer: Option<&PlayerId>) -> MatchView {
    MatchView {
        id: game.id(),
        in_progress: game.in_progress(),
        phase: game.phase(),
        winner: game.winner(),
        players: game
            .players()
            .iter()
            .map(|board| project_board(board, viewer == Some(&board.player_id())))
            .collect(),
    }
}
