//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::config::HAND_SIZE;
use crate::error::{JassError, Result};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Simulated turns per decision. At least one per card in a hand, so
    /// that every root child gets visited.
    pub iterations: u32,

    /// UCB1 exploration constant (default: 40).
    /// Rewards are turn points, so the constant is on the scale of a few
    /// tricks rather than of a unit reward.
    pub exploration_constant: f64,

    /// Seed of the simulation RNG.
    /// The RNG persists across decisions of one player, so a game replays
    /// identically from the same seed.
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            exploration_constant: 40.0,
            seed: 0,
        }
    }
}

impl MctsConfig {
    /// Create a new config with custom iteration count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject iteration counts too low to try every card once.
    pub fn validate(&self) -> Result<()> {
        if (self.iterations as usize) < HAND_SIZE {
            return Err(JassError::invalid(format!(
                "MCTS needs at least {} iterations, got {}",
                HAND_SIZE, self.iterations
            )));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(JassError::invalid(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
