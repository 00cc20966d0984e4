//! Card codec.
//!
//! A card packs into six bits: the rank ordinal in bits 0..4 and the suit
//! ordinal in bits 4..6. The packed value doubles as the card's bit index in
//! a [`CardSet`](super::CardSet).
//!
//! Card strength depends on the trump suit: inside the trump suit the nine
//! and the jack jump above the ace, so trump comparisons use a separate
//! trump ordinal per rank.

use serde::{Deserialize, Serialize};

use crate::core::bits::Field;
use crate::error::{JassError, Result};

pub(crate) const RANK: Field = Field::new(0, 4);
pub(crate) const SUIT: Field = RANK.next(2);

/// Number of bits in a packed card.
pub const CARD_BITS: u32 = RANK.size() + SUIT.size();

/// One of the four suits, in packing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

impl Suit {
    pub const COUNT: usize = 4;
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

    /// Suit from its ordinal.
    pub fn new(ordinal: usize) -> Result<Self> {
        Self::ALL
            .get(ordinal)
            .copied()
            .ok_or(JassError::InvalidIndex { index: ordinal, len: Self::COUNT })
    }

    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    #[inline]
    pub(crate) const fn from_ordinal_unchecked(ordinal: u64) -> Self {
        match ordinal & 0b11 {
            0 => Suit::Spade,
            1 => Suit::Heart,
            2 => Suit::Diamond,
            _ => Suit::Club,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Suit::Spade => "\u{2660}",
            Suit::Heart => "\u{2661}",
            Suit::Diamond => "\u{2662}",
            Suit::Club => "\u{2663}",
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One of the nine ranks, weakest first (outside trump).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// Strength of each rank inside the trump suit, indexed by rank ordinal.
const TRUMP_ORDINALS: [u8; Rank::COUNT] = [0, 1, 2, 7, 3, 8, 4, 5, 6];

/// Points per rank outside the trump suit.
const PLAIN_POINTS: [u32; Rank::COUNT] = [0, 0, 0, 0, 10, 2, 3, 4, 11];

/// Points per rank inside the trump suit.
const TRUMP_POINTS: [u32; Rank::COUNT] = [0, 0, 0, 14, 10, 20, 3, 4, 11];

const COMPACT: [&str; Rank::COUNT] = ["6", "7", "8", "9", "10", "J", "Q", "K", "A"];

impl Rank {
    pub const COUNT: usize = 9;
    pub const ALL: [Rank; 9] = [
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Rank from its ordinal.
    pub fn new(ordinal: usize) -> Result<Self> {
        Self::ALL
            .get(ordinal)
            .copied()
            .ok_or(JassError::InvalidIndex { index: ordinal, len: Self::COUNT })
    }

    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Strength of this rank when its suit is trump (0 weakest, 8 = jack).
    #[inline]
    #[must_use]
    pub const fn trump_ordinal(self) -> u8 {
        TRUMP_ORDINALS[self as usize]
    }

    #[must_use]
    pub const fn compact(self) -> &'static str {
        COMPACT[self as usize]
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.compact())
    }
}

/// A playing card, stored packed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// Packed value that is never a card; marks an empty trick slot.
    pub const INVALID_PACKED: u8 = 0b11_1111;

    /// Card of the given suit and rank.
    #[must_use]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self(SUIT.set(RANK.set(0, rank as u64), suit as u64) as u8)
    }

    /// Is `packed` the encoding of a card?
    #[inline]
    #[must_use]
    pub const fn is_valid_packed(packed: u64) -> bool {
        packed >> CARD_BITS == 0 && (RANK.get(packed) as usize) < Rank::COUNT
    }

    /// Card from its packed value.
    pub fn from_packed(packed: u8) -> Result<Self> {
        if Self::is_valid_packed(packed as u64) {
            Ok(Self(packed))
        } else {
            Err(JassError::invalid(format!("{packed:#x} is not a packed card")))
        }
    }

    /// Caller guarantees `packed` is valid.
    #[inline]
    pub(crate) const fn from_packed_unchecked(packed: u64) -> Self {
        debug_assert!(Self::is_valid_packed(packed));
        Self(packed as u8)
    }

    #[inline]
    #[must_use]
    pub const fn packed(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn suit(self) -> Suit {
        Suit::from_ordinal_unchecked(SUIT.get(self.0 as u64))
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> Rank {
        Rank::ALL[RANK.get(self.0 as u64) as usize]
    }

    /// Does `self` beat `that` with `trump` as the trump suit?
    ///
    /// Cards of two different non-trump suits cannot be compared; the answer
    /// is then `false` both ways.
    #[inline]
    #[must_use]
    pub fn is_better(self, trump: Suit, that: Card) -> bool {
        let (suit, that_suit) = (self.suit(), that.suit());
        if suit == that_suit {
            if suit == trump {
                self.rank().trump_ordinal() > that.rank().trump_ordinal()
            } else {
                RANK.get(self.0 as u64) > RANK.get(that.0 as u64)
            }
        } else {
            suit == trump
        }
    }

    /// Point value of the card given the trump suit.
    #[inline]
    #[must_use]
    pub fn points(self, trump: Suit) -> u32 {
        let rank = self.rank() as usize;
        if self.suit() == trump {
            TRUMP_POINTS[rank]
        } else {
            PLAIN_POINTS[rank]
        }
    }
}

impl TryFrom<u8> for Card {
    type Error = JassError;

    fn try_from(packed: u8) -> Result<Self> {
        Self::from_packed(packed)
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.suit(), self.rank())
    }
}

impl std::fmt::Debug for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        let card = Card::new(Suit::Diamond, Rank::Seven);
        assert_eq!(card.packed(), 0b10_0001);
        assert_eq!(card.suit(), Suit::Diamond);
        assert_eq!(card.rank(), Rank::Seven);
    }

    #[test]
    fn test_from_packed_validation() {
        assert!(Card::from_packed(0b11_1000).is_ok());
        assert!(Card::from_packed(0b00_1001).is_err());
        assert!(Card::from_packed(Card::INVALID_PACKED).is_err());
        assert!(Card::from_packed(0b100_0000).is_err());
    }

    #[test]
    fn test_is_better_plain_suit() {
        let trump = Suit::Heart;
        let ace = Card::new(Suit::Spade, Rank::Ace);
        let nine = Card::new(Suit::Spade, Rank::Nine);

        assert!(ace.is_better(trump, nine));
        assert!(!nine.is_better(trump, ace));
    }

    #[test]
    fn test_is_better_trump_order() {
        let trump = Suit::Heart;
        let jack = Card::new(Suit::Heart, Rank::Jack);
        let nine = Card::new(Suit::Heart, Rank::Nine);
        let ace = Card::new(Suit::Heart, Rank::Ace);
        let ten = Card::new(Suit::Heart, Rank::Ten);

        assert!(jack.is_better(trump, nine));
        assert!(nine.is_better(trump, ace));
        assert!(nine.is_better(trump, ten));
        assert!(!ace.is_better(trump, nine));
    }

    #[test]
    fn test_is_better_across_suits() {
        let trump = Suit::Club;
        let six_trump = Card::new(Suit::Club, Rank::Six);
        let ace_spade = Card::new(Suit::Spade, Rank::Ace);
        let ace_heart = Card::new(Suit::Heart, Rank::Ace);

        assert!(six_trump.is_better(trump, ace_spade));
        assert!(!ace_spade.is_better(trump, six_trump));
        // Incomparable
        assert!(!ace_spade.is_better(trump, ace_heart));
        assert!(!ace_heart.is_better(trump, ace_spade));
    }

    #[test]
    fn test_points() {
        let trump = Suit::Spade;
        assert_eq!(Card::new(Suit::Spade, Rank::Jack).points(trump), 20);
        assert_eq!(Card::new(Suit::Spade, Rank::Nine).points(trump), 14);
        assert_eq!(Card::new(Suit::Heart, Rank::Jack).points(trump), 2);
        assert_eq!(Card::new(Suit::Heart, Rank::Nine).points(trump), 0);
        assert_eq!(Card::new(Suit::Heart, Rank::Ace).points(trump), 11);
        assert_eq!(Card::new(Suit::Heart, Rank::Eight).points(trump), 0);
    }

    #[test]
    fn test_deck_is_worth_152() {
        for trump in Suit::ALL {
            let total: u32 = Suit::ALL
                .iter()
                .flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(s, r)))
                .map(|c| c.points(trump))
                .sum();
            assert_eq!(total, 152);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(Suit::Spade, Rank::Ace).to_string(), "\u{2660}A");
        assert_eq!(Card::new(Suit::Heart, Rank::Ten).to_string(), "\u{2661}10");
    }

    #[test]
    fn test_serde_validates() {
        let card = Card::new(Suit::Club, Rank::King);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), card);
        assert!(serde_json::from_str::<Card>("15").is_err());
    }
}
