//! One player's board: ship placement, incoming shots, defeat detection.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{AttackOutcome, BoardError};
use crate::config::{BOARD_SIZE, NUM_SHIPS, SHIPS};
use crate::coord::{Coord, Placement};
use crate::ids::{PlayerId, SessionToken};
use crate::ship::{Orientation, Ship, ShipKind};
use crate::view::{self, BoardView};

type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

const GRID: usize = BOARD_SIZE as usize;

/// State of a cell in the attack grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackMark {
    Unattempted,
    Hit,
    Miss,
}

impl AttackMark {
    /// Grid code: 0 unattempted, 1 hit, 2 miss.
    pub fn code(self) -> u8 {
        match self {
            AttackMark::Unattempted => 0,
            AttackMark::Hit => 1,
            AttackMark::Miss => 2,
        }
    }
}

pub struct Board {
    player_id: PlayerId,
    session: SessionToken,
    /// Marker of the ship covering each cell, indexed `[y][x]`; 0 when empty.
    markers: [[u8; GRID]; GRID],
    occupied: BB,
    ships: [Option<Ship>; NUM_SHIPS],
    /// Kinds that must be placed before shots are accepted, by catalog index.
    fleet: [bool; NUM_SHIPS],
    hits: BB,
    misses: BB,
    moves: Vec<Coord>,
    sunk_all: bool,
}

impl Board {
    /// Create an empty board for a newly joined player. The full catalog
    /// must be placed before it can be attacked.
    pub fn new(player_id: PlayerId, session: SessionToken) -> Self {
        Self::with_fleet(player_id, session, &SHIPS)
    }

    /// Create an empty board that only requires `fleet` to be placed.
    pub fn with_fleet(player_id: PlayerId, session: SessionToken, fleet: &[ShipKind]) -> Self {
        let mut required = [false; NUM_SHIPS];
        for kind in fleet {
            required[kind.index()] = true;
        }
        Board {
            player_id,
            session,
            markers: [[0; GRID]; GRID],
            occupied: BB::new(),
            ships: [None; NUM_SHIPS],
            fleet: required,
            hits: BB::new(),
            misses: BB::new(),
            moves: Vec::new(),
            sunk_all: false,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn session(&self) -> SessionToken {
        self.session
    }

    /// True when `token` is the one issued to this player.
    pub fn check_session(&self, token: &SessionToken) -> bool {
        self.session == *token
    }

    pub fn has_ship(&self, kind: ShipKind) -> bool {
        self.ships[kind.index()].is_some()
    }

    /// True once every kind of the fleet is on the board.
    pub fn all_ships_placed(&self) -> bool {
        self.ships
            .iter()
            .zip(self.fleet)
            .all(|(slot, required)| slot.is_some() || !required)
    }

    /// Kinds this board must hold, in catalog order.
    pub fn fleet(&self) -> impl Iterator<Item = ShipKind> + '_ {
        SHIPS.into_iter().filter(|kind| self.fleet[kind.index()])
    }

    /// Placed ships in catalog order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    pub fn ship(&self, kind: ShipKind) -> Option<&Ship> {
        self.ships[kind.index()].as_ref()
    }

    pub fn is_sunk_all(&self) -> bool {
        self.sunk_all
    }

    /// Coordinates attacked so far, oldest first. Repeats appear each time.
    pub fn moves(&self) -> &[Coord] {
        &self.moves
    }

    /// Place a ship. Nothing is written unless the whole footprint is on the
    /// board and free.
    pub fn place_ship(
        &mut self,
        kind: ShipKind,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        if !self.fleet[kind.index()] {
            return Err(BoardError::ShipNotInFleet(kind));
        }
        if self.has_ship(kind) {
            return Err(BoardError::ShipAlreadyPlaced(kind));
        }
        let ship = Ship::new(kind, origin, orientation)?;
        if !(self.occupied & ship.mask()).is_empty() {
            return Err(BoardError::ShipOverlaps);
        }

        for cell in ship.cells() {
            self.markers[cell.row()][cell.col()] = ship.marker();
        }
        self.occupied |= ship.mask();
        self.ships[kind.index()] = Some(ship);
        Ok(())
    }

    /// Returns a random placement for `kind` that fits the current board.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        kind: ShipKind,
    ) -> Result<Placement, BoardError> {
        let len = kind.length();
        for _ in 0..100 {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => (GRID - len, GRID - 1),
                Orientation::Vertical => (GRID - 1, GRID - len),
            };
            let origin = Coord::unchecked(
                rng.random_range(0..=max_x) as u8,
                rng.random_range(0..=max_y) as u8,
            );
            let ship = Ship::new(kind, origin, orientation)?;
            if (self.occupied & ship.mask()).is_empty() {
                return Ok(Placement::new(origin, orientation));
            }
        }
        Err(BoardError::UnableToPlaceShip)
    }

    /// Place every fleet ship that is not yet on the board at random.
    pub fn place_fleet_randomly<R: Rng>(&mut self, rng: &mut R) -> Result<(), BoardError> {
        for kind in SHIPS {
            if self.has_ship(kind) || !self.fleet[kind.index()] {
                continue;
            }
            let placement = self.random_placement(rng, kind)?;
            self.place_ship(kind, placement.origin, placement.orientation)?;
        }
        Ok(())
    }

    /// Marker painted at `coord`; 0 when empty.
    pub fn marker_at(&self, coord: Coord) -> u8 {
        self.markers[coord.row()][coord.col()]
    }

    /// The ship covering `coord`, resolved through its marker.
    pub fn ship_at(&self, coord: Coord) -> Result<Option<&Ship>, BoardError> {
        let marker = self.marker_at(coord);
        if marker == 0 {
            return Ok(None);
        }
        let kind = ShipKind::from_marker(marker).ok_or(BoardError::UnknownMarker(marker))?;
        self.ships[kind.index()]
            .as_ref()
            .map(Some)
            .ok_or(BoardError::UnknownMarker(marker))
    }

    pub fn attack_mark(&self, coord: Coord) -> AttackMark {
        if self.hits.get(coord.row(), coord.col()).unwrap_or(false) {
            AttackMark::Hit
        } else if self.misses.get(coord.row(), coord.col()).unwrap_or(false) {
            AttackMark::Miss
        } else {
            AttackMark::Unattempted
        }
    }

    /// Take a shot at `coord`.
    ///
    /// Shots are refused until the fleet is complete and after it is fully
    /// sunk. Shooting an already attacked cell is accepted and recorded
    /// again; a ship under it takes another hit (still capped at its length).
    pub fn register_attack(&mut self, coord: Coord) -> Result<AttackOutcome, BoardError> {
        if !self.all_ships_placed() {
            return Err(BoardError::ShipsNotPlaced);
        }
        if self.sunk_all {
            return Err(BoardError::AlreadyDefeated);
        }

        let kind = self.ship_at(coord)?.map(|ship| ship.kind());
        self.moves.push(coord);
        let Some(kind) = kind else {
            self.misses.set(coord.row(), coord.col())?;
            return Ok(AttackOutcome::MISS);
        };

        self.hits.set(coord.row(), coord.col())?;
        let sunk = match self.ships[kind.index()].as_mut() {
            Some(ship) => {
                ship.register_hit();
                ship.is_sunk()
            }
            None => return Err(BoardError::UnknownMarker(kind.marker())),
        };
        self.sunk_all = self.all_ships_placed() && self.ships().all(Ship::is_sunk);
        Ok(AttackOutcome::hit(sunk, self.sunk_all))
    }

    /// Marker grid indexed `[y][x]`.
    pub fn marker_grid(&self) -> &[[u8; GRID]; GRID] {
        &self.markers
    }

    /// Attack grid indexed `[y][x]`.
    pub fn attack_grid(&self) -> [[AttackMark; GRID]; GRID] {
        let mut grid = [[AttackMark::Unattempted; GRID]; GRID];
        for coord in Coord::all() {
            grid[coord.row()][coord.col()] = self.attack_mark(coord);
        }
        grid
    }

    /// View of this board; ship layout is included only for the owner.
    pub fn export(&self, is_owner: bool) -> BoardView {
        view::project_board(self, is_owner)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("player_id", &self.player_id)
            .field("ships", &self.ships)
            .field("hits", &self.hits.count_ones())
            .field("misses", &self.misses.count_ones())
            .field("sunk_all", &self.sunk_all)
            .finish()
    }
}
