//! Trick codec and the follow-suit rules.
//!
//! A trick packs into 32 bits:
//!
//! | bits   | content                                      |
//! |--------|----------------------------------------------|
//! | 0..24  | four 6-bit card slots, empty slots all ones  |
//! | 24..28 | trick index within the turn, `0..=8`         |
//! | 28..30 | seat that led the trick                      |
//! | 30..32 | trump suit                                   |
//!
//! Cards fill the slots in play order, so the number of cards is the index of
//! the first empty slot.

use serde::{Deserialize, Serialize};

use crate::cards::card::CARD_BITS;
use crate::cards::{Card, CardSet, Rank, Suit};
use crate::core::bits::Field;
use crate::core::config::{LAST_TRICK_ADDITIONAL_POINTS, TRICKS_PER_TURN};
use crate::core::PlayerId;
use crate::error::{JassError, Result};

/// Cards in a full trick.
pub const CARDS_PER_TRICK: usize = 4;

const SLOTS: Field = Field::new(0, CARD_BITS * CARDS_PER_TRICK as u32);
const INDEX: Field = SLOTS.next(4);
const LEADER: Field = INDEX.next(2);
const TRUMP: Field = LEADER.next(2);

const EMPTY_SLOT: u64 = Card::INVALID_PACKED as u64;

#[inline]
const fn slot(i: usize) -> Field {
    Field::new(i as u32 * CARD_BITS, CARD_BITS)
}

/// One trick, stored packed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Trick(u32);

impl Trick {
    /// Marker following the last trick of a turn. Not a valid trick.
    pub const INVALID: Trick = Trick(u32::MAX);

    /// The empty first trick of a turn.
    #[must_use]
    pub const fn first_empty(trump: Suit, leader: PlayerId) -> Self {
        let bits = TRUMP.set(LEADER.set(SLOTS.mask(), leader.index() as u64), trump as u64);
        Self(bits as u32)
    }

    /// Is `packed` the encoding of a trick?
    ///
    /// The index must be below 9 and the slots filled from the front with
    /// valid cards.
    #[must_use]
    pub const fn is_valid_packed(packed: u32) -> bool {
        let bits = packed as u64;
        if INDEX.get(bits) >= TRICKS_PER_TURN as u64 {
            return false;
        }
        let mut seen_empty = false;
        let mut i = 0;
        while i < CARDS_PER_TRICK {
            let card = slot(i).get(bits);
            if card == EMPTY_SLOT {
                seen_empty = true;
            } else if seen_empty || !Card::is_valid_packed(card) {
                return false;
            }
            i += 1;
        }
        true
    }

    /// Trick from its packed value. [`Trick::INVALID`] is rejected.
    pub fn from_packed(packed: u32) -> Result<Self> {
        if Self::is_valid_packed(packed) {
            Ok(Self(packed))
        } else {
            Err(JassError::invalid(format!("{packed:#x} is not a packed trick")))
        }
    }

    #[inline]
    #[must_use]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    const fn bits(self) -> u64 {
        self.0 as u64
    }

    /// The empty trick following this one, led by its winner, or `None`
    /// after the last trick of the turn.
    #[must_use]
    pub fn next_empty(self) -> Option<Trick> {
        if self.is_last() {
            return None;
        }
        let next = Self::first_empty(self.trump(), self.winning_player());
        Some(Self(INDEX.set(next.bits(), INDEX.get(self.bits()) + 1) as u32))
    }

    #[inline]
    #[must_use]
    pub const fn is_last(self) -> bool {
        self.index() == TRICKS_PER_TURN as usize - 1
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        slot(0).get(self.bits()) == EMPTY_SLOT
    }

    #[inline]
    #[must_use]
    pub const fn is_full(self) -> bool {
        slot(CARDS_PER_TRICK - 1).get(self.bits()) != EMPTY_SLOT
    }

    /// Number of cards played so far.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        let mut i = 0;
        while i < CARDS_PER_TRICK && slot(i).get(self.bits()) != EMPTY_SLOT {
            i += 1;
        }
        i
    }

    #[inline]
    #[must_use]
    pub const fn trump(self) -> Suit {
        Suit::from_ordinal_unchecked(TRUMP.get(self.bits()))
    }

    /// Position of the trick in its turn, `0..=8`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        INDEX.get(self.bits()) as usize
    }

    /// Seat playing the `i`-th card of the trick (taken modulo 4).
    #[inline]
    #[must_use]
    pub const fn player(self, i: usize) -> PlayerId {
        PlayerId::from_index_unchecked(LEADER.get(self.bits()) as u32 + i as u32)
    }

    /// The `i`-th card played.
    pub fn card(self, i: usize) -> Result<Card> {
        let len = self.len();
        if i < len {
            Ok(self.card_unchecked(i))
        } else {
            Err(JassError::InvalidIndex { index: i, len })
        }
    }

    #[inline]
    const fn card_unchecked(self, i: usize) -> Card {
        Card::from_packed_unchecked(slot(i).get(self.bits()))
    }

    /// Cards played so far, in play order.
    pub fn cards(self) -> impl Iterator<Item = Card> {
        (0..self.len()).map(move |i| self.card_unchecked(i))
    }

    /// The trick with `card` placed in the first empty slot.
    pub fn with_added_card(self, card: Card) -> Result<Trick> {
        if self.is_full() {
            return Err(JassError::IllegalState("trick is full"));
        }
        Ok(self.with_added_card_unchecked(card))
    }

    #[inline]
    pub(crate) fn with_added_card_unchecked(self, card: Card) -> Trick {
        let bits = slot(self.len()).set(self.bits(), card.packed() as u64);
        Self(bits as u32)
    }

    /// Suit of the first card.
    pub fn base_suit(self) -> Result<Suit> {
        if self.is_empty() {
            return Err(JassError::IllegalState("trick is empty"));
        }
        Ok(self.card_unchecked(0).suit())
    }

    /// Strongest card played so far.
    #[must_use]
    pub fn best_card(self) -> Option<Card> {
        self.best().map(|(_, card)| card)
    }

    fn best(self) -> Option<(usize, Card)> {
        let trump = self.trump();
        let mut cards = self.cards().enumerate();
        let first = cards.next()?;
        Some(cards.fold(first, |best, (i, card)| {
            if card.is_better(trump, best.1) {
                (i, card)
            } else {
                best
            }
        }))
    }

    /// Seat holding the strongest card; the leader while the trick is empty.
    #[must_use]
    pub fn winning_player(self) -> PlayerId {
        self.player(self.best().map_or(0, |(i, _)| i))
    }

    /// Value of the trick: card points under trump, plus the last-trick bonus.
    #[must_use]
    pub fn points(self) -> u32 {
        let trump = self.trump();
        let cards: u32 = self.cards().map(|c| c.points(trump)).sum();
        if self.is_last() {
            cards + LAST_TRICK_ADDITIONAL_POINTS
        } else {
            cards
        }
    }

    /// Cards of `hand` the next player may legally play on this trick.
    ///
    /// Must follow the base suit when possible, with trumps always allowed
    /// except for under-trumping a trick already cut. The trump jack never
    /// has to be played to follow trump, and a hand holding nothing but
    /// trumps too weak to over-trump may play any of them.
    #[must_use]
    pub fn playable_cards(self, hand: CardSet) -> CardSet {
        let Some((_, best)) = self.best() else {
            return hand;
        };

        let trump = self.trump();
        let base = self.card_unchecked(0).suit();
        let trumps_in_hand = hand.subset_of_suit(trump);
        let base_in_hand = hand.subset_of_suit(base);
        let cut = best.suit() == trump;
        let above_best = CardSet::trump_above(best);

        if base == trump {
            let bour = CardSet::singleton(Card::new(trump, Rank::Jack));
            return if trumps_in_hand.is_empty() || trumps_in_hand == bour {
                hand
            } else {
                trumps_in_hand
            };
        }

        if base_in_hand.is_empty() {
            if !cut {
                return hand;
            }
            let has_better_trumps = !hand.intersection(above_best).is_empty();
            if hand == trumps_in_hand && !has_better_trumps {
                return hand;
            }
            let weaker_trumps = above_best.complement().subset_of_suit(trump);
            return hand.difference(weaker_trumps);
        }

        if cut {
            hand.intersection(above_best).union(base_in_hand)
        } else {
            trumps_in_hand.union(base_in_hand)
        }
    }
}

impl TryFrom<u32> for Trick {
    type Error = JassError;

    fn try_from(packed: u32) -> Result<Self> {
        Self::from_packed(packed)
    }
}

impl From<Trick> for u32 {
    fn from(trick: Trick) -> u32 {
        trick.0
    }
}

impl std::fmt::Display for Trick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::INVALID {
            return f.write_str("Trick(none)");
        }
        write!(
            f,
            "Trick {} led by {} [{}]:",
            self.index(),
            self.player(0),
            self.trump()
        )?;
        for card in self.cards() {
            write!(f, " {card}")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Trick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self} ({:#010x})", self.0)
    }
}
