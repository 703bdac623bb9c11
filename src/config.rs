use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::DEFAULT_MAX_PLACEMENT_ATTEMPTS;

/// Tunables for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible games. Drawn from entropy when `None`.
    pub seed: Option<u64>,
    /// Lower bound of the computer's thinking delay.
    pub min_delay: Duration,
    /// Upper bound (exclusive) of the computer's thinking delay.
    pub max_delay: Duration,
    /// Random origins tried per ship before placement falls back to a scan.
    pub max_placement_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            min_delay: Duration::from_millis(500),
            max_delay: Duration::from_millis(1250),
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Configuration without any thinking delay, for simulations and tests.
    pub fn instant() -> Self {
        Self {
            min_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
