//! The contract between the orchestrator and whoever sits at a seat.
//!
//! The game calls every notification on every player in seat order, and asks
//! the player on move for a card with [`Player::card_to_play`]. A player may
//! be local (search, random, human front-end) or a proxy forwarding every
//! call to a remote process, so every method is fallible.

use crate::cards::{Card, CardSet, Suit};
use crate::core::{PlayerId, PlayerMap, TeamId};
use crate::error::Result;
use crate::rules::{Score, Trick, TurnState};

/// A participant in a game.
///
/// Only [`card_to_play`](Player::card_to_play) is required; notifications
/// default to no-ops.
pub trait Player: Send {
    /// Choose a card from `hand` given the current `state`.
    ///
    /// The returned card must be playable on `state.trick()`; the game
    /// rejects anything else.
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card>;

    /// Called once at the start of the game with this player's seat and the
    /// names of everyone at the table.
    fn set_players(&mut self, _own_id: PlayerId, _names: &PlayerMap<String>) -> Result<()> {
        Ok(())
    }

    /// Hand after a deal or after this player played a card.
    fn update_hand(&mut self, _hand: CardSet) -> Result<()> {
        Ok(())
    }

    /// Trump of the turn about to start.
    fn set_trump(&mut self, _trump: Suit) -> Result<()> {
        Ok(())
    }

    /// The trick in progress, after each change.
    fn update_trick(&mut self, _trick: Trick) -> Result<()> {
        Ok(())
    }

    /// Score at the start of each trick.
    fn update_score(&mut self, _score: Score) -> Result<()> {
        Ok(())
    }

    /// Sent once, when a team reaches the winning threshold.
    fn set_winning_team(&mut self, _team: TeamId) -> Result<()> {
        Ok(())
    }
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn card_to_play(&mut self, state: &TurnState, hand: CardSet) -> Result<Card> {
        (**self).card_to_play(state, hand)
    }

    fn set_players(&mut self, own_id: PlayerId, names: &PlayerMap<String>) -> Result<()> {
        (**self).set_players(own_id, names)
    }

    fn update_hand(&mut self, hand: CardSet) -> Result<()> {
        (**self).update_hand(hand)
    }

    fn set_trump(&mut self, trump: Suit) -> Result<()> {
        (**self).set_trump(trump)
    }

    fn update_trick(&mut self, trick: Trick) -> Result<()> {
        (**self).update_trick(trick)
    }

    fn update_score(&mut self, score: Score) -> Result<()> {
        (**self).update_score(score)
    }

    fn set_winning_team(&mut self, team: TeamId) -> Result<()> {
        (**self).set_winning_team(team)
    }
}
