//! A player choosing uniformly among its legal cards.

use super::Player;
use crate::cards::{Card, CardSet};
use crate::core::GameRng;
use crate::error::{JassError, Result};
use crate::rules::TurnState;

/// Plays a uniformly random legal card. Useful as a baseline opponent.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card> {
        let playable = state.trick().playable_cards(hand);
        if playable.is_empty() {
            return Err(JassError::invalid("empty hand"));
        }
        playable.get(self.rng.gen_index(playable.len()))
    }
}
