//! Gameboard state: the cell grid, the fleet, placement and hit resolution.

use log::debug;
use rand::Rng;

use super::common::{BoardError, Coordinate, HitError, HitOutcome};
use super::config::{BOARD_SIZE, NUM_SHIPS, SHIP_LENGTHS};
use super::ship::{self, Orientation, Ship};

/// Which cells of a board have been shot at, indexed `[row][col]`.
pub type ShotGrid = [[bool; BOARD_SIZE]; BOARD_SIZE];

/// A single grid slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Index of the occupying ship in the board's fleet.
    ship: Option<usize>,
    hit: bool,
}

impl Cell {
    /// Index into [`Gameboard::ships`] of the ship covering this cell.
    pub fn ship(&self) -> Option<usize> {
        self.ship
    }

    pub fn is_occupied(&self) -> bool {
        self.ship.is_some()
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    fn clear(&mut self) {
        self.ship = None;
        self.hit = false;
    }
}

/// Returns `true` when every ship in `ships` is sunk.
pub fn all_sunk(ships: &[Ship]) -> bool {
    ships.iter().all(Ship::is_sunk)
}

/// A 10x10 grid with the standard five-ship fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gameboard {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    ships: [Ship; NUM_SHIPS],
}

impl Default for Gameboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Gameboard {
    /// Create an empty board with an unplaced fleet.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::default(); BOARD_SIZE]; BOARD_SIZE],
            ships: std::array::from_fn(|i| Ship::new(SHIP_LENGTHS[i])),
        }
    }

    pub fn cell(&self, coordinates: Coordinate) -> Option<&Cell> {
        let (r, c) = coordinates.index()?;
        Some(&self.cells[r][c])
    }

    /// The grid, row major.
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn is_hit(&self, coordinates: Coordinate) -> bool {
        self.cell(coordinates).is_some_and(Cell::is_hit)
    }

    pub fn shot_grid(&self) -> ShotGrid {
        std::array::from_fn(|r| std::array::from_fn(|c| self.cells[r][c].hit))
    }

    /// Whether every ship in the fleet has a position.
    pub fn is_fleet_placed(&self) -> bool {
        self.ships.iter().all(Ship::is_placed)
    }

    /// Whether a ship of `length` fits at `start` without leaving the board
    /// or touching another ship.
    pub fn fits(&self, start: Coordinate, orientation: Orientation, length: usize) -> bool {
        ship::run(start, orientation, length)
            .all(|c| self.cell(c).is_some_and(|cell| !cell.is_occupied()))
    }

    /// Place the ship at `index` starting at `start` and extending in
    /// `orientation`.
    pub fn place_ship(
        &mut self,
        index: usize,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let ship = self.ships.get(index).ok_or(BoardError::InvalidIndex(index))?;
        if ship.is_placed() {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        let length = ship.length();
        let mut cells = Vec::with_capacity(length);
        for c in ship::run(start, orientation, length) {
            let (r, col) = c.index().ok_or(BoardError::ShipOutOfBounds)?;
            if self.cells[r][col].is_occupied() {
                return Err(BoardError::ShipOverlaps);
            }
            cells.push((r, col));
        }
        for (r, c) in cells {
            self.cells[r][c].ship = Some(index);
        }
        self.ships[index].place(start, orientation);
        debug!(
            "placed ship {} (length {}) at {} facing {:?}",
            index, length, start, orientation
        );
        Ok(())
    }

    /// Place the whole fleet at random.
    ///
    /// Each ship gets one random orientation, then random origins are drawn
    /// until the run fits. After `max_attempts` rejected origins the ship is
    /// put at the first legal spot of a row-major scan instead.
    pub fn place_ships_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        max_attempts: usize,
    ) -> Result<(), BoardError> {
        if self.ships.iter().any(Ship::is_placed) {
            return Err(BoardError::ShipAlreadyPlaced);
        }
        for index in 0..NUM_SHIPS {
            let length = self.ships[index].length();
            let (start, orientation) = self
                .random_spot(rng, length, max_attempts)
                .or_else(|| {
                    debug!(
                        "random placement gave up after {} attempts for length {}",
                        max_attempts, length
                    );
                    self.first_free_spot(length)
                })
                .ok_or(BoardError::UnableToPlaceShip(length))?;
            self.place_ship(index, start, orientation)?;
        }
        Ok(())
    }

    fn random_spot<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        max_attempts: usize,
    ) -> Option<(Coordinate, Orientation)> {
        let orientation = Orientation::ALL[rng.random_range(0..Orientation::ALL.len())];
        (0..max_attempts).find_map(|_| {
            let start = Coordinate::new(
                rng.random_range(0..BOARD_SIZE as i32),
                rng.random_range(0..BOARD_SIZE as i32),
            );
            self.fits(start, orientation, length)
                .then_some((start, orientation))
        })
    }

    fn first_free_spot(&self, length: usize) -> Option<(Coordinate, Orientation)> {
        (0..BOARD_SIZE as i32)
            .flat_map(|y| (0..BOARD_SIZE as i32).map(move |x| Coordinate::new(x, y)))
            .flat_map(|start| Orientation::ALL.into_iter().map(move |o| (start, o)))
            .find(|&(start, o)| self.fits(start, o, length))
    }

    /// Reset every ship and every cell.
    pub fn clear(&mut self) {
        self.ships.iter_mut().for_each(Ship::reset);
        self.cells.iter_mut().flatten().for_each(Cell::clear);
    }

    /// Wipe all damage but keep the fleet where it is.
    pub fn clear_hits(&mut self) {
        self.ships.iter_mut().for_each(Ship::reset_hits);
        for cell in self.cells.iter_mut().flatten() {
            cell.hit = false;
        }
    }

    /// Resolve a shot at `coordinates`.
    ///
    /// Shots off the board fail with [`HitError::OutOfRange`] and change
    /// nothing. A repeated shot at a ship cell is absorbed: the cell stays
    /// hit and the outcome reflects the ship's current state.
    pub fn receive_hit(&mut self, coordinates: Coordinate) -> Result<HitOutcome, HitError> {
        let (r, c) = coordinates
            .index()
            .ok_or(HitError::OutOfRange(coordinates))?;
        let cell = &mut self.cells[r][c];
        cell.hit = true;

        let Some(index) = cell.ship else {
            return Ok(HitOutcome::Miss);
        };
        let ship = &mut self.ships[index];
        if let Err(err) = ship.record_hit(coordinates) {
            debug!("ignoring repeated hit on ship {}: {}", index, err);
        }
        if ship.is_sunk() {
            Ok(HitOutcome::Sunk)
        } else {
            Ok(HitOutcome::Ship)
        }
    }

    pub fn all_sunk(&self) -> bool {
        all_sunk(&self.ships)
    }

    /// All cells of the ship covering `coordinates`, start to end.
    ///
    /// `None` when the cell is empty or off the board; empty when the ship
    /// has no placement.
    pub fn ship_cells_of(&self, coordinates: Coordinate) -> Option<Vec<Coordinate>> {
        let index = self.cell(coordinates)?.ship?;
        Some(self.ships[index].cells())
    }
}
