//! Players and the sources of their moves
//!
//! - Player: a side of the game owning one gameboard
//! - Computer: uniform-random targeting and thinking delay
//! - MoveSource: where the human side's targets come from (stdin, random)

use serde::{Deserialize, Serialize};

use crate::core::{Coordinate, Gameboard, ShotGrid};

/// One side of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    Player,
    Computer,
}

impl Party {
    /// The opposing side.
    pub fn other(self) -> Self {
        match self {
            Party::Player => Party::Computer,
            Party::Computer => Party::Player,
        }
    }
}

/// A participant owning one gameboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    gameboard: Gameboard,
    is_computer: bool,
}

impl Player {
    pub fn human() -> Self {
        Self {
            gameboard: Gameboard::new(),
            is_computer: false,
        }
    }

    pub fn computer() -> Self {
        Self {
            gameboard: Gameboard::new(),
            is_computer: true,
        }
    }

    pub fn gameboard(&self) -> &Gameboard {
        &self.gameboard
    }

    pub fn gameboard_mut(&mut self) -> &mut Gameboard {
        &mut self.gameboard
    }

    pub fn is_computer(&self) -> bool {
        self.is_computer
    }

    pub fn party(&self) -> Party {
        if self.is_computer {
            Party::Computer
        } else {
            Party::Player
        }
    }
}

/// Supplies the human side's targets.
///
/// `shots` shows which cells of the opponent's board were already fired at.
/// Returning `Ok(None)` abandons the game.
#[async_trait::async_trait]
pub trait MoveSource: Send {
    async fn next_target(&mut self, shots: &ShotGrid) -> anyhow::Result<Option<Coordinate>>;
}

// Re-export implementations
pub mod ai;
pub use ai::{Computer, RandomShooter};

pub mod cli;
pub use cli::StdinSource;
