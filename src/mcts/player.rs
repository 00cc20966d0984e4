//! A [`Player`] that chooses each card with an MCTS search.

use tracing::debug;

use super::config::MctsConfig;
use super::policy::Perspective;
use super::search::MctsSearch;
use super::stats::SearchStats;
use crate::cards::{Card, CardSet};
use crate::core::{PlayerId, PlayerMap, TeamId};
use crate::error::Result;
use crate::game::Player;
use crate::rules::TurnState;

/// Simulated player backed by [`MctsSearch`].
#[derive(Debug)]
pub struct MctsPlayer {
    own_id: PlayerId,
    search: MctsSearch,

    /// Accumulated over every decision of the game.
    totals: SearchStats,
}

impl MctsPlayer {
    /// Player at `own_id` simulating `iterations` turns per card.
    pub fn new(own_id: PlayerId, seed: u64, iterations: u32) -> Result<Self> {
        let config = MctsConfig::default()
            .with_iterations(iterations)
            .with_seed(seed);
        Self::with_config(own_id, config)
    }

    pub fn with_config(own_id: PlayerId, config: MctsConfig) -> Result<Self> {
        Ok(Self {
            own_id,
            search: MctsSearch::new(config)?,
            totals: SearchStats::default(),
        })
    }

    #[must_use]
    pub fn own_id(&self) -> PlayerId {
        self.own_id
    }

    /// Statistics summed over all decisions so far.
    #[must_use]
    pub fn totals(&self) -> &SearchStats {
        &self.totals
    }
}

impl Player for MctsPlayer {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card> {
        let view = Perspective::new(self.own_id, hand);
        let card = self.search.search(state, &view)?;

        let stats = self.search.stats();
        debug!(
            "{} plays {} after {} iterations ({} nodes, {} us)",
            self.own_id, card, stats.iterations, stats.nodes_expanded, stats.time_us
        );
        self.totals.merge(stats);
        Ok(card)
    }

    /// The seat announced by the game replaces the one given at construction.
    fn set_players(&mut self, own_id: PlayerId, _names: &PlayerMap<String>) -> Result<()> {
        if own_id != self.own_id {
            debug!("MCTS player moved from {} to {}", self.own_id, own_id);
            self.own_id = own_id;
        }
        Ok(())
    }

    fn set_winning_team(&mut self, team: TeamId) -> Result<()> {
        debug!(
            "{} finished, {} won: {} iterations, {:.0} iterations/s",
            self.own_id,
            team,
            self.totals.iterations,
            self.totals.iterations_per_second()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::error::JassError;
    use crate::rules::Score;

    fn opening(leader: PlayerId) -> TurnState {
        TurnState::initial(Suit::Club, Score::INITIAL, leader)
    }

    #[test]
    fn test_rejects_too_few_iterations() {
        assert!(matches!(
            MctsPlayer::new(PlayerId::PLAYER_1, 0, 8),
            Err(JassError::InvalidArgument(_))
        ));
        assert!(MctsPlayer::new(PlayerId::PLAYER_1, 0, 9).is_ok());
    }

    #[test]
    fn test_plays_from_hand_and_accumulates() {
        let hand: CardSet = CardSet::ALL_CARDS.iter().skip(1).step_by(4).collect();
        let mut player = MctsPlayer::new(PlayerId::PLAYER_3, 11, 40).unwrap();

        let card = player
            .card_to_play(&opening(PlayerId::PLAYER_3), hand)
            .unwrap();
        assert!(hand.contains(card));
        assert_eq!(player.totals().iterations, 40);

        // Moved to the next seat, which holds its own nine cards
        let state = opening(PlayerId::PLAYER_3).play_card(card).unwrap();
        let next_hand: CardSet = CardSet::ALL_CARDS.iter().skip(2).step_by(4).collect();
        assert!(next_hand.intersection(hand).is_empty());
        player.set_players(PlayerId::PLAYER_4, &PlayerMap::with_default()).unwrap();

        let follow = player.card_to_play(&state, next_hand).unwrap();
        assert!(state.trick().playable_cards(next_hand).contains(follow));
        assert_eq!(player.own_id(), PlayerId::PLAYER_4);
        assert_eq!(player.totals().iterations, 80);
    }

    #[test]
    fn test_same_seed_same_card() {
        let hand: CardSet = CardSet::ALL_CARDS.iter().step_by(4).collect();
        let mut a = MctsPlayer::new(PlayerId::PLAYER_1, 99, 100).unwrap();
        let mut b = MctsPlayer::new(PlayerId::PLAYER_1, 99, 100).unwrap();
        let state = opening(PlayerId::PLAYER_1);

        assert_eq!(
            a.card_to_play(&state, hand).unwrap(),
            b.card_to_play(&state, hand).unwrap()
        );
    }

    #[test]
    fn test_forced_card() {
        let queen = Card::new(Suit::Heart, Rank::Queen);
        let state = opening(PlayerId::PLAYER_1)
            .play_card(Card::new(Suit::Heart, Rank::Six))
            .unwrap();
        let hand = CardSet::singleton(queen).add(Card::new(Suit::Spade, Rank::Six));
        let mut player = MctsPlayer::new(PlayerId::PLAYER_2, 1, 50).unwrap();

        assert_eq!(player.card_to_play(&state, hand).unwrap(), queen);
        assert_eq!(player.totals().iterations, 0);
    }
}
