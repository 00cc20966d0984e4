//! Rule constants and game configuration.

use serde::{Deserialize, Serialize};

use super::{GameRng, PlayerId};
use crate::error::{JassError, Result};

/// Cards dealt to each player per turn.
pub const HAND_SIZE: usize = 9;

/// Tricks played per turn.
pub const TRICKS_PER_TURN: u32 = 9;

/// Total points a team needs to win the game.
pub const WINNING_POINTS: u32 = 1000;

/// Bonus for the team that takes every trick of a turn.
pub const MATCH_ADDITIONAL_POINTS: u32 = 100;

/// Bonus for the team that takes the last trick of a turn.
pub const LAST_TRICK_ADDITIONAL_POINTS: u32 = 5;

/// Game-level configuration.
///
/// The seed determines every random choice of the game: the shuffles, the
/// trump draws and the seeds handed to simulated players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Master seed.
    pub seed: u64,

    /// Points needed to win. At most [`WINNING_POINTS`], so that game points
    /// always fit their packed field.
    pub winning_points: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            winning_points: WINNING_POINTS,
        }
    }
}

impl GameConfig {
    /// Config with the standard winning threshold.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Set the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the winning threshold (shortened games are handy in tests).
    pub fn with_winning_points(mut self, points: u32) -> Self {
        self.winning_points = points;
        self
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<()> {
        if self.winning_points == 0 || self.winning_points > WINNING_POINTS {
            return Err(JassError::invalid(format!(
                "winning points must be in 1..={}, got {}",
                WINNING_POINTS, self.winning_points
            )));
        }
        Ok(())
    }

    /// RNG stream used to shuffle the deck.
    #[must_use]
    pub fn shuffle_rng(&self) -> GameRng {
        GameRng::new(self.seed).for_context("shuffle")
    }

    /// RNG stream used to draw the trump suit.
    #[must_use]
    pub fn trump_rng(&self) -> GameRng {
        GameRng::new(self.seed).for_context("trump")
    }

    /// Seed for a simulated player sitting at `player`.
    #[must_use]
    pub fn player_seed(&self, player: PlayerId) -> u64 {
        GameRng::new(self.seed)
            .for_context(&format!("player-{}", player.index()))
            .next_u64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.winning_points, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::new(5).with_winning_points(300).with_seed(9);
        assert_eq!(config.seed, 9);
        assert_eq!(config.winning_points, 300);
    }

    #[test]
    fn test_validate_bounds() {
        assert!(GameConfig::new(1).with_winning_points(0).validate().is_err());
        assert!(GameConfig::new(1).with_winning_points(1001).validate().is_err());
    }

    #[test]
    fn test_player_seeds_differ() {
        let config = GameConfig::new(42);
        let seeds: Vec<u64> = PlayerId::ALL.iter().map(|&p| config.player_seed(p)).collect();

        for i in 0..seeds.len() {
            for j in i + 1..seeds.len() {
                assert_ne!(seeds[i], seeds[j]);
            }
        }
        assert_eq!(seeds[0], GameConfig::new(42).player_seed(PlayerId::PLAYER_1));
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::new(77);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
