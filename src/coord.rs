//! Grid coordinates and their textual encodings.
//!
//! A move is written `"<x>-<y>"` and a placement `"<x>-<y>-<o>"` where `o`
//! is `x` (horizontal) or `y` (vertical). Both integers are unsigned decimal
//! in `[0, BOARD_SIZE)`.

use core::fmt;
use core::str::FromStr;

use crate::config::BOARD_SIZE;
use crate::ship::Orientation;

/// A cell on the board. `x` is the column, `y` the row. Always in bounds;
/// deserialization goes through the same check as `Coord::new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "RawCoord"))]
pub struct Coord {
    x: u8,
    y: u8,
}

/// Unchecked wire shape of a `Coord`.
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawCoord {
    x: u8,
    y: u8,
}

#[cfg(feature = "std")]
impl TryFrom<RawCoord> for Coord {
    type Error = CoordError;

    fn try_from(raw: RawCoord) -> Result<Self, Self::Error> {
        Coord::new(raw.x as usize, raw.y as usize)
    }
}

/// Errors from building or parsing coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordError {
    /// Text does not follow the `x-y` / `x-y-o` shape.
    Malformed,
    /// An integer lies outside the board.
    OutOfBounds { x: usize, y: usize },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::Malformed => f.write_str("malformed coordinates"),
            CoordError::OutOfBounds { x, y } => {
                write!(f, "coordinates ({}, {}) are outside the board", x, y)
            }
        }
    }
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Result<Self, CoordError> {
        let size = BOARD_SIZE as usize;
        if x >= size || y >= size {
            return Err(CoordError::OutOfBounds { x, y });
        }
        Ok(Coord {
            x: x as u8,
            y: y as u8,
        })
    }

    pub(crate) const fn unchecked(x: u8, y: u8) -> Self {
        Coord { x, y }
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    /// Bitboard row.
    pub fn row(&self) -> usize {
        self.y as usize
    }

    /// Bitboard column.
    pub fn col(&self) -> usize {
        self.x as usize
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord { x, y }))
    }
}

fn parse_component(part: &str) -> Result<usize, CoordError> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoordError::Malformed);
    }
    part.parse().map_err(|_| CoordError::Malformed)
}

impl FromStr for Coord {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('-');
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoordError::Malformed);
        };
        Coord::new(parse_component(x)?, parse_component(y)?)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

/// Where and how a ship is laid down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub origin: Coord,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(origin: Coord, orientation: Orientation) -> Self {
        Placement {
            origin,
            orientation,
        }
    }
}

impl FromStr for Placement {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('-');
        let (Some(x), Some(y), Some(o), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(CoordError::Malformed);
        };
        let orientation = Orientation::from_letter(o).ok_or(CoordError::Malformed)?;
        let origin = Coord::new(parse_component(x)?, parse_component(y)?)?;
        Ok(Placement::new(origin, orientation))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.origin, self.orientation.letter())
    }
}
