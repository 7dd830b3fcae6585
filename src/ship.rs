//! Fleet catalog and the damage state of a placed ship.

use core::fmt;
use core::str::FromStr;

use crate::bitboard::BitBoard;
use crate::common::BoardError;
use crate::config::{BOARD_SIZE, SHIPS};
use crate::coord::Coord;
use crate::view::ShipView;

type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends along increasing `x`.
    Horizontal,
    /// Extends along increasing `y`.
    Vertical,
}

impl Orientation {
    /// Wire letter: `x` for horizontal, `y` for vertical.
    pub fn letter(self) -> char {
        match self {
            Orientation::Horizontal => 'x',
            Orientation::Vertical => 'y',
        }
    }

    pub fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "x" => Some(Orientation::Horizontal),
            "y" => Some(Orientation::Vertical),
            _ => None,
        }
    }
}

/// The five kinds of ship in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    /// Lowercase name used in requests.
    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "carrier",
            ShipKind::Battleship => "battleship",
            ShipKind::Cruiser => "cruiser",
            ShipKind::Submarine => "submarine",
            ShipKind::Destroyer => "destroyer",
        }
    }

    /// Position in `SHIPS`.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Code painted into every grid cell the ship occupies. Never zero.
    pub const fn marker(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Inverse of [`ShipKind::marker`], looked up through `SHIPS`.
    pub fn from_marker(marker: u8) -> Option<Self> {
        let idx = (marker as usize).checked_sub(1)?;
        SHIPS.get(idx).copied()
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a ship name is not in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownShipKind;

impl fmt::Display for UnknownShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ship kind not in catalog")
    }
}

impl FromStr for ShipKind {
    type Err = UnknownShipKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SHIPS
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(UnknownShipKind)
    }
}

/// A ship placed on the board, with its damage counter.
///
/// Damage is a counter rather than a per-cell record: every shot landing on
/// the footprint counts, including repeats of the same cell, and the counter
/// saturates at the ship's length.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    kind: ShipKind,
    origin: Coord,
    orientation: Orientation,
    mask: BB,
    hit_count: usize,
    sunk: bool,
}

impl Ship {
    /// Place a ship of `kind` at `origin` extending along `orientation`.
    /// Fails if any footprint cell falls outside the board.
    pub fn new(kind: ShipKind, origin: Coord, orientation: Orientation) -> Result<Self, BoardError> {
        let len = kind.length();
        let size = BOARD_SIZE as usize;
        let (x, y) = (origin.col(), origin.row());
        let fits = match orientation {
            Orientation::Horizontal => x + len <= size && y < size,
            Orientation::Vertical => y + len <= size && x < size,
        };
        if !fits {
            return Err(BoardError::ShipOutOfBounds);
        }

        let mask = BB::from_cells((0..len).map(|i| match orientation {
            Orientation::Horizontal => (y, x + i),
            Orientation::Vertical => (y + i, x),
        }))?;

        Ok(Ship {
            kind,
            origin,
            orientation,
            mask,
            hit_count: 0,
            sunk: false,
        })
    }

    /// Count one more hit, capped at the ship's length.
    pub fn register_hit(&mut self) {
        if self.hit_count < self.length() {
            self.hit_count += 1;
        }
        self.sunk = self.hit_count == self.length();
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn length(&self) -> usize {
        self.kind.length()
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    pub fn marker(&self) -> u8 {
        self.kind.marker()
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Footprint of the ship on the board.
    pub fn mask(&self) -> BB {
        self.mask
    }

    /// Footprint cells, from the origin outwards.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.length() as u8).map(move |i| match self.orientation {
            Orientation::Horizontal => Coord::unchecked(self.origin.x() + i, self.origin.y()),
            Orientation::Vertical => Coord::unchecked(self.origin.x(), self.origin.y() + i),
        })
    }

    pub fn export(&self) -> ShipView {
        ShipView {
            kind: self.kind,
            length: self.length(),
            hit_count: self.hit_count,
            sunk: self.sunk,
            marker: self.marker(),
        }
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ kind: {}, origin: {}, orientation: {:?}, hits: {}/{}, sunk: {} }}",
            self.kind,
            self.origin,
            self.orientation,
            self.hit_count,
            self.length(),
            self.sunk,
        )
    }
}
