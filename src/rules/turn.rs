//! Turn state machine.
//!
//! A `TurnState` is everything the table shows during a turn: the score, the
//! cards not yet played, and the trick in progress. It moves through three
//! states:
//!
//! - **in progress**: the trick holds 0 to 3 cards, [`TurnState::play_card`]
//!   adds one;
//! - **trick full**: [`TurnState::collect_trick`] scores the trick and opens
//!   the next one;
//! - **terminal**: the ninth trick was collected, the trick is
//!   [`Trick::INVALID`].

use serde::{Deserialize, Serialize};

use super::{Score, Trick};
use crate::cards::{Card, CardSet, Suit};
use crate::core::PlayerId;
use crate::error::{JassError, Result};

/// State of a turn between two card plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    score: Score,
    unplayed: CardSet,
    #[serde(with = "packed_trick")]
    trick: Trick,
}

impl TurnState {
    /// Start of a turn: every card unplayed, first trick empty.
    #[must_use]
    pub const fn initial(trump: Suit, score: Score, leader: PlayerId) -> Self {
        Self {
            score,
            unplayed: CardSet::ALL_CARDS,
            trick: Trick::first_empty(trump, leader),
        }
    }

    /// State from packed components, as carried on the wire.
    ///
    /// A trick equal to [`Trick::INVALID`] yields a terminal state.
    pub fn from_packed_components(score: u64, unplayed: u64, trick: u32) -> Result<Self> {
        let trick = if trick == Trick::INVALID.packed() {
            Trick::INVALID
        } else {
            Trick::from_packed(trick)?
        };
        Ok(Self {
            score: Score::from_packed(score)?,
            unplayed: CardSet::from_packed(unplayed)?,
            trick,
        })
    }

    #[inline]
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }

    #[inline]
    #[must_use]
    pub const fn unplayed_cards(&self) -> CardSet {
        self.unplayed
    }

    #[inline]
    #[must_use]
    pub const fn trick(&self) -> Trick {
        self.trick
    }

    /// Has the last trick of the turn been collected?
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.trick == Trick::INVALID
    }

    /// Seat due to play the next card.
    pub fn next_player(&self) -> Result<PlayerId> {
        if self.is_terminal() {
            return Err(JassError::IllegalState("turn is over"));
        }
        if self.trick.is_full() {
            return Err(JassError::IllegalState("trick is full"));
        }
        Ok(self.trick.player(self.trick.len()))
    }

    /// State after `card` is played into the current trick.
    pub fn play_card(&self, card: Card) -> Result<TurnState> {
        if self.is_terminal() {
            return Err(JassError::IllegalState("turn is over"));
        }
        if self.trick.is_full() {
            return Err(JassError::IllegalState("trick is full"));
        }
        if !self.unplayed.contains(card) {
            return Err(JassError::invalid(format!("{card} was already played")));
        }
        Ok(Self {
            score: self.score,
            unplayed: self.unplayed.remove(card),
            trick: self.trick.with_added_card_unchecked(card),
        })
    }

    /// State after the full trick is scored and the next one opened.
    pub fn collect_trick(&self) -> Result<TurnState> {
        if self.is_terminal() || !self.trick.is_full() {
            return Err(JassError::IllegalState("trick is not full"));
        }
        let winner = self.trick.winning_player();
        Ok(Self {
            score: self
                .score
                .with_additional_trick(winner.team(), self.trick.points())?,
            unplayed: self.unplayed,
            trick: self.trick.next_empty().unwrap_or(Trick::INVALID),
        })
    }

    /// [`play_card`](Self::play_card), then collect the trick if it is full.
    pub fn play_card_and_collect(&self, card: Card) -> Result<TurnState> {
        let state = self.play_card(card)?;
        if state.trick.is_full() {
            state.collect_trick()
        } else {
            Ok(state)
        }
    }
}

/// The terminal marker is not a valid `Trick`, so it is written raw.
mod packed_trick {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Trick;

    pub fn serialize<S: Serializer>(trick: &Trick, serializer: S) -> Result<S::Ok, S::Error> {
        trick.packed().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Trick, D::Error> {
        let packed = u32::deserialize(deserializer)?;
        if packed == Trick::INVALID.packed() {
            Ok(Trick::INVALID)
        } else {
            Trick::from_packed(packed).map_err(serde::de::Error::custom)
        }
    }
}
