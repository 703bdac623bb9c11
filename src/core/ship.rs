//! Ship definitions and hit tracking.

use serde::{Deserialize, Serialize};

use super::common::{Coordinate, HitError};

/// Direction a ship extends in from its start cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Up,
    Down,
    Left,
    Right,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Down,
        Orientation::Left,
        Orientation::Right,
    ];

    /// Unit step `(dx, dy)`. Rows grow downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Orientation::Up => (0, -1),
            Orientation::Down => (0, 1),
            Orientation::Left => (-1, 0),
            Orientation::Right => (1, 0),
        }
    }
}

/// Cells covered by a straight run of `length` starting at `start`.
pub fn run(
    start: Coordinate,
    orientation: Orientation,
    length: usize,
) -> impl Iterator<Item = Coordinate> {
    (0..length).map(move |i| start.offset(orientation, i as i32))
}

/// A ship of fixed length, its placement and the hits it has taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    length: usize,
    start: Option<Coordinate>,
    orientation: Option<Orientation>,
    hits: Vec<Coordinate>,
}

impl Ship {
    /// Create an unplaced ship. Lengths below 1 are raised to 1.
    pub fn new(length: usize) -> Self {
        let length = length.max(1);
        Self {
            length,
            start: None,
            orientation: None,
            hits: Vec::with_capacity(length),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    /// Hits in the order they were recorded.
    pub fn hits(&self) -> &[Coordinate] {
        &self.hits
    }

    pub fn is_placed(&self) -> bool {
        self.start.is_some() && self.orientation.is_some()
    }

    pub(crate) fn place(&mut self, start: Coordinate, orientation: Orientation) {
        self.start = Some(start);
        self.orientation = Some(orientation);
    }

    /// Record a hit at `coordinates`.
    ///
    /// Fails without touching the hit history when the ship is already sunk,
    /// when the coordinates were hit before, or when they lie off the board.
    pub fn record_hit(&mut self, coordinates: Coordinate) -> Result<(), HitError> {
        if self.hits.len() >= self.length {
            return Err(HitError::AlreadySunk);
        }
        if self.hits.contains(&coordinates) {
            return Err(HitError::DuplicateHit(coordinates));
        }
        if !coordinates.in_bounds() {
            return Err(HitError::OutOfRange(coordinates));
        }
        self.hits.push(coordinates);
        Ok(())
    }

    pub fn is_sunk(&self) -> bool {
        self.hits.len() >= self.length
    }

    /// Forget placement and hits.
    pub fn reset(&mut self) {
        self.start = None;
        self.orientation = None;
        self.hits.clear();
    }

    /// Forget hits but keep the placement.
    pub fn reset_hits(&mut self) {
        self.hits.clear();
    }

    /// Occupied cells from start to end, empty while unplaced.
    pub fn cells(&self) -> Vec<Coordinate> {
        match (self.start, self.orientation) {
            (Some(start), Some(orientation)) => run(start, orientation, self.length).collect(),
            _ => Vec::new(),
        }
    }
}
