//! The line protocol between a game and a remote player.
//!
//! Each message is one ASCII line: a four-letter verb, a space, and the
//! arguments. Only `CARD` expects an answer, a single line holding the
//! packed card in hex.

use std::fmt;
use std::str::FromStr;

use super::codec::{decode_name, decode_u32, decode_u64, encode_hex, encode_name, into_protocol};
use crate::cards::{CardSet, Suit};
use crate::core::{PlayerId, PlayerMap, TeamId};
use crate::error::{JassError, Result};
use crate::rules::{Score, Trick, TurnState};

/// One message sent by the game side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JassCommand {
    /// `PLRS <seat> <name>,<name>,<name>,<name>`
    Players {
        own_id: PlayerId,
        names: PlayerMap<String>,
    },
    /// `TRMP <suit>`
    Trump(Suit),
    /// `HAND <card set>`
    Hand(CardSet),
    /// `TRCK <trick>`
    Trick(Trick),
    /// `SCOR <score>`
    Score(Score),
    /// `WINR <team>`
    Winner(TeamId),
    /// `CARD <score>,<unplayed>,<trick> <hand>`
    Card { state: TurnState, hand: CardSet },
}

impl JassCommand {
    /// The four-letter verb of this command.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Players { .. } => "PLRS",
            Self::Trump(_) => "TRMP",
            Self::Hand(_) => "HAND",
            Self::Trick(_) => "TRCK",
            Self::Score(_) => "SCOR",
            Self::Winner(_) => "WINR",
            Self::Card { .. } => "CARD",
        }
    }

    /// Does the sender wait for a reply line?
    #[must_use]
    pub const fn expects_reply(&self) -> bool {
        matches!(self, Self::Card { .. })
    }
}

impl fmt::Display for JassCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.verb())?;
        match self {
            Self::Players { own_id, names } => {
                let names: Vec<String> = names.values().map(|n| encode_name(n)).collect();
                write!(f, "{} {}", own_id.index(), names.join(","))
            }
            Self::Trump(suit) => write!(f, "{}", suit.ordinal()),
            Self::Hand(hand) => f.write_str(&encode_hex(hand.packed())),
            Self::Trick(trick) => f.write_str(&encode_hex(trick.packed())),
            Self::Score(score) => f.write_str(&encode_hex(score.packed())),
            Self::Winner(team) => write!(f, "{}", team.index()),
            Self::Card { state, hand } => write!(
                f,
                "{},{},{} {}",
                encode_hex(state.score().packed()),
                encode_hex(state.unplayed_cards().packed()),
                encode_hex(state.trick().packed()),
                encode_hex(hand.packed())
            ),
        }
    }
}

impl FromStr for JassCommand {
    type Err = JassError;

    fn from_str(line: &str) -> Result<Self> {
        let (verb, args) = line
            .split_once(' ')
            .ok_or_else(|| JassError::Protocol(format!("missing arguments in {line:?}")))?;

        let command = match verb {
            "PLRS" => {
                let (seat, names) = split_pair(args, ' ')?;
                let own_id = PlayerId::new(decode_ordinal(seat)?).map_err(into_protocol)?;
                let names: Vec<&str> = names.split(',').collect();
                if names.len() != PlayerId::COUNT {
                    return Err(JassError::Protocol(format!(
                        "expected {} names, got {}",
                        PlayerId::COUNT,
                        names.len()
                    )));
                }
                let mut decoded = PlayerMap::with_default();
                for (seat, name) in PlayerId::ALL.into_iter().zip(names) {
                    decoded[seat] = decode_name(name)?;
                }
                Self::Players {
                    own_id,
                    names: decoded,
                }
            }
            "TRMP" => Self::Trump(Suit::new(decode_ordinal(args)?).map_err(into_protocol)?),
            "HAND" => Self::Hand(decode_card_set(args)?),
            "TRCK" => Self::Trick(Trick::from_packed(decode_u32(args)?).map_err(into_protocol)?),
            "SCOR" => Self::Score(Score::from_packed(decode_u64(args)?).map_err(into_protocol)?),
            "WINR" => Self::Winner(TeamId::new(decode_ordinal(args)?).map_err(into_protocol)?),
            "CARD" => {
                let (state, hand) = split_pair(args, ' ')?;
                let (score, rest) = split_pair(state, ',')?;
                let (unplayed, trick) = split_pair(rest, ',')?;
                let state = TurnState::from_packed_components(
                    decode_u64(score)?,
                    decode_u64(unplayed)?,
                    decode_u32(trick)?,
                )
                .map_err(into_protocol)?;
                Self::Card {
                    state,
                    hand: decode_card_set(hand)?,
                }
            }
            _ => return Err(JassError::Protocol(format!("unknown command {verb:?}"))),
        };
        Ok(command)
    }
}

fn split_pair(text: &str, separator: char) -> Result<(&str, &str)> {
    text.split_once(separator)
        .ok_or_else(|| JassError::Protocol(format!("expected {separator:?} in {text:?}")))
}

/// Seat, suit and team ordinals are small decimal digits.
fn decode_ordinal(text: &str) -> Result<usize> {
    text.parse()
        .map_err(|_| JassError::Protocol(format!("bad ordinal {text:?}")))
}

fn decode_card_set(text: &str) -> Result<CardSet> {
    CardSet::from_packed(decode_u64(text)?).map_err(into_protocol)
}
