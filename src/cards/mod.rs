//! Cards and sets of cards.
//!
//! ## Key Types
//!
//! - `Suit`, `Rank`: the 4 x 9 deck
//! - `Card`: one card, packed into 6 bits
//! - `CardSet`: any subset of the deck, packed into a 64-bit word

pub mod card;
pub mod card_set;

pub use card::{Card, Rank, Suit};
pub use card_set::{CardSet, CardSetIter};
