//! Common types for the engine: coordinates, hit outcomes and errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::BOARD_SIZE;
use super::ship::Orientation;

/// A cell position. `x` is the column, `y` the row, both zero based.
///
/// Components are signed so that negative input can be represented and
/// rejected instead of wrapping around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether both components lie in `[0, BOARD_SIZE)`.
    pub fn in_bounds(self) -> bool {
        let size = BOARD_SIZE as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }

    /// `(row, col)` indices into a board grid, if in bounds.
    pub(crate) fn index(self) -> Option<(usize, usize)> {
        if self.in_bounds() {
            Some((self.y as usize, self.x as usize))
        } else {
            None
        }
    }

    /// The coordinate `distance` cells away in `orientation`.
    pub fn offset(self, orientation: Orientation, distance: i32) -> Self {
        let (dx, dy) = orientation.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    /// Column letter followed by the one-based row, e.g. `C4` for `(2, 3)`.
    /// Falls back to a tuple for coordinates off the board.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            let col = (b'A' + self.x as u8) as char;
            write!(f, "{}{}", col, self.y + 1)
        } else {
            write!(f, "({}, {})", self.x, self.y)
        }
    }
}

/// Result of a shot against a gameboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitOutcome {
    /// Shot landed on empty water.
    Miss,
    /// Shot hit a ship that is still afloat.
    Ship,
    /// Shot hit a ship that is now sunk.
    Sunk,
}

/// Errors returned when recording a hit.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HitError {
    #[error("coordinates {0} are out of range")]
    OutOfRange(Coordinate),
    #[error("coordinates {0} were already hit")]
    DuplicateHit(Coordinate),
    #[error("ship is already sunk")]
    AlreadySunk,
}

/// Errors returned by ship placement.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("ship index {0} is out of range")]
    InvalidIndex(usize),
    #[error("ship is already placed on the board")]
    ShipAlreadyPlaced,
    #[error("ship placement is out of bounds")]
    ShipOutOfBounds,
    #[error("ship placement overlaps with another ship")]
    ShipOverlaps,
    #[error("unable to place ship of length {0}")]
    UnableToPlaceShip(usize),
}
