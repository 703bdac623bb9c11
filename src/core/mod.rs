//! Core battleship game engine
//!
//! This module contains the pure game logic: ships, cells, the gameboard and
//! hit resolution. It knows nothing about turns, timers or rendering.

pub mod board;
pub mod common;
pub mod config;
pub mod ship;

// Re-export commonly used types
pub use board::{all_sunk, Cell, Gameboard, ShotGrid};
pub use common::{BoardError, Coordinate, HitError, HitOutcome};
pub use config::*;
pub use ship::{Orientation, Ship};
