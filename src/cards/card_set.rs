//! Card-set codec.
//!
//! A set of cards is a 64-bit word with one bit per card. Each suit owns a
//! 16-bit lane of which the low nine bits are used, so a card's packed value
//! is exactly its bit index and suit lanes can be cut out with a mask.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::card::{Card, Rank, Suit, SUIT};
use crate::error::{JassError, Result};

const LANE_BITS: u32 = 1 << SUIT.start();
const SUIT_LANE: u64 = (1 << Rank::COUNT) - 1;

/// A set of cards.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct CardSet(u64);

impl CardSet {
    pub const EMPTY: CardSet = CardSet(0);

    /// The full 36-card deck.
    pub const ALL_CARDS: CardSet = CardSet(0x01FF_01FF_01FF_01FF);

    /// Set from its packed value.
    pub fn from_packed(packed: u64) -> Result<Self> {
        if packed & !Self::ALL_CARDS.0 == 0 {
            Ok(Self(packed))
        } else {
            Err(JassError::invalid(format!(
                "{packed:#x} sets bits outside the deck"
            )))
        }
    }

    #[inline]
    #[must_use]
    pub const fn packed(self) -> u64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn singleton(card: Card) -> Self {
        Self(1 << card.packed())
    }

    /// All cards of one suit.
    #[inline]
    #[must_use]
    pub const fn suit(suit: Suit) -> Self {
        Self(SUIT_LANE << (suit as u32 * LANE_BITS))
    }

    #[inline]
    #[must_use]
    pub const fn add(self, card: Card) -> Self {
        Self(self.0 | 1 << card.packed())
    }

    #[inline]
    #[must_use]
    pub const fn remove(self, card: Card) -> Self {
        Self(self.0 & !(1 << card.packed()))
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, card: Card) -> bool {
        self.0 & 1 << card.packed() != 0
    }

    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The `index`-th card in ascending packed order.
    pub fn get(self, index: usize) -> Result<Card> {
        self.iter()
            .nth(index)
            .ok_or(JassError::InvalidIndex { index, len: self.len() })
    }

    /// Lowest card of the set, if any.
    #[inline]
    #[must_use]
    pub const fn first(self) -> Option<Card> {
        if self.0 == 0 {
            None
        } else {
            Some(Card::from_packed_unchecked(self.0.trailing_zeros() as u64))
        }
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: CardSet) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: CardSet) -> Self {
        Self(self.0 & other.0)
    }

    /// Cards of `self` missing from `other`.
    #[inline]
    #[must_use]
    pub const fn difference(self, other: CardSet) -> Self {
        Self((self.0 ^ other.0) & self.0)
    }

    /// Every card of the deck not in `self`.
    #[inline]
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::ALL_CARDS.0)
    }

    /// Cards of `self` of the given suit.
    #[inline]
    #[must_use]
    pub const fn subset_of_suit(self, suit: Suit) -> Self {
        self.intersection(Self::suit(suit))
    }

    /// Cards of `card`'s suit that beat it when that suit is trump.
    #[inline]
    #[must_use]
    pub fn trump_above(card: Card) -> Self {
        trump_above_table()[card.packed() as usize]
    }

    /// Cards in ascending packed order.
    pub fn iter(self) -> CardSetIter {
        CardSetIter(self.0)
    }
}

/// Indexed by packed card; slots that are not cards stay empty.
fn trump_above_table() -> &'static [CardSet; 64] {
    static TABLE: OnceLock<[CardSet; 64]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [CardSet::EMPTY; 64];
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                let card = Card::new(suit, rank);
                table[card.packed() as usize] = CardSet::suit(suit)
                    .iter()
                    .filter(|other| other.is_better(suit, card))
                    .collect();
            }
        }
        table
    })
}

/// Iterator over the cards of a [`CardSet`].
#[derive(Clone, Debug)]
pub struct CardSetIter(u64);

impl Iterator for CardSetIter {
    type Item = Card;

    #[inline]
    fn next(&mut self) -> Option<Card> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros();
        self.0 &= self.0 - 1;
        Some(Card::from_packed_unchecked(index as u64))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for CardSetIter {}

impl IntoIterator for CardSet {
    type Item = Card;
    type IntoIter = CardSetIter;

    fn into_iter(self) -> CardSetIter {
        self.iter()
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        iter.into_iter().fold(CardSet::EMPTY, CardSet::add)
    }
}

impl TryFrom<u64> for CardSet {
    type Error = JassError;

    fn try_from(packed: u64) -> Result<Self> {
        Self::from_packed(packed)
    }
}

impl From<CardSet> for u64 {
    fn from(set: CardSet) -> u64 {
        set.0
    }
}

impl std::fmt::Display for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, card) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("}")
    }
}

impl std::fmt::Debug for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CardSet{self}")
    }
}
