//! Score codec.
//!
//! Each team owns 32 bits of a 64-bit word (team 2 at offset 32):
//!
//! | bits   | content                           |
//! |--------|-----------------------------------|
//! | 0..4   | tricks won this turn, `0..=9`     |
//! | 4..13  | points won this turn, `0..=257`   |
//! | 13..24 | points of finished turns, `0..=2000` |
//! | 24..32 | unused, zero                      |

use serde::{Deserialize, Serialize};

use crate::core::bits::{self, Field};
use crate::core::config::{
    LAST_TRICK_ADDITIONAL_POINTS, MATCH_ADDITIONAL_POINTS, TRICKS_PER_TURN, WINNING_POINTS,
};
use crate::core::TeamId;
use crate::error::{JassError, Result};

/// Card points in a whole deck.
const DECK_POINTS: u32 = 152;

/// Most points a team can make in one turn.
pub const MAX_TURN_POINTS: u32 = DECK_POINTS + LAST_TRICK_ADDITIONAL_POINTS + MATCH_ADDITIONAL_POINTS;

/// Largest game-point total the codec accepts.
pub const MAX_GAME_POINTS: u32 = 2 * WINNING_POINTS;

const TEAM_BITS: u32 = 32;
const TRICKS: Field = Field::new(0, 4);
const TURN_POINTS: Field = TRICKS.next(9);
const GAME_POINTS: Field = TURN_POINTS.next(11);
const UNUSED: Field = GAME_POINTS.next(8);

const fn team_offset(team: TeamId) -> u32 {
    team as u32 * TEAM_BITS
}

/// Both teams' scores, stored packed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Score(u64);

impl Score {
    /// Score at the start of a game.
    pub const INITIAL: Score = Score(0);

    /// Score from its six components.
    pub fn new(team1: (u32, u32, u32), team2: (u32, u32, u32)) -> Result<Self> {
        let half = |(tricks, turn, game): (u32, u32, u32)| -> Result<u64> {
            Ok(bits::pack(&[
                (tricks as u64, TRICKS.size()),
                (turn as u64, TURN_POINTS.size()),
                (game as u64, GAME_POINTS.size()),
            ])?)
        };
        Self::from_packed(half(team1)? | half(team2)? << TEAM_BITS)
    }

    /// Is `packed` a score within every bound?
    #[must_use]
    pub const fn is_valid_packed(packed: u64) -> bool {
        let mut t = 0;
        while t < TeamId::COUNT {
            let half = packed >> (t as u32 * TEAM_BITS);
            if TRICKS.get(half) > TRICKS_PER_TURN as u64
                || TURN_POINTS.get(half) > MAX_TURN_POINTS as u64
                || GAME_POINTS.get(half) > MAX_GAME_POINTS as u64
                || UNUSED.get(half) != 0
            {
                return false;
            }
            t += 1;
        }
        true
    }

    /// Score from its packed value.
    pub fn from_packed(packed: u64) -> Result<Self> {
        if Self::is_valid_packed(packed) {
            Ok(Self(packed))
        } else {
            Err(JassError::invalid(format!("{packed:#x} is not a packed score")))
        }
    }

    #[inline]
    #[must_use]
    pub const fn packed(self) -> u64 {
        self.0
    }

    #[inline]
    const fn half(self, team: TeamId) -> u64 {
        self.0 >> team_offset(team)
    }

    /// Tricks won by `team` this turn.
    #[inline]
    #[must_use]
    pub const fn turn_tricks(self, team: TeamId) -> u32 {
        TRICKS.get(self.half(team)) as u32
    }

    /// Points won by `team` this turn.
    #[inline]
    #[must_use]
    pub const fn turn_points(self, team: TeamId) -> u32 {
        TURN_POINTS.get(self.half(team)) as u32
    }

    /// Points won by `team` in finished turns.
    #[inline]
    #[must_use]
    pub const fn game_points(self, team: TeamId) -> u32 {
        GAME_POINTS.get(self.half(team)) as u32
    }

    #[inline]
    #[must_use]
    pub const fn total_points(self, team: TeamId) -> u32 {
        self.turn_points(team) + self.game_points(team)
    }

    /// Score after `team` collects a trick worth `points`.
    ///
    /// Taking the ninth trick of a turn adds the match bonus.
    pub fn with_additional_trick(self, team: TeamId, points: u32) -> Result<Score> {
        if points > MAX_TURN_POINTS {
            return Err(JassError::invalid(format!("trick worth {points} points")));
        }
        let tricks = self.turn_tricks(team) + 1;
        let mut turn = self.turn_points(team) + points;
        if tricks == TRICKS_PER_TURN {
            turn += MATCH_ADDITIONAL_POINTS;
        }
        if tricks > TRICKS_PER_TURN || turn > MAX_TURN_POINTS {
            return Err(JassError::IllegalState("turn score overflows"));
        }
        let offset = team_offset(team);
        let packed = TURN_POINTS
            .shifted(offset)
            .set(TRICKS.shifted(offset).set(self.0, tricks as u64), turn as u64);
        Ok(Score(packed))
    }

    /// Score of the next turn: turn points are folded into game points and
    /// both teams start again from zero tricks.
    #[must_use]
    pub fn next_turn(self) -> Score {
        let packed = TeamId::ALL.iter().fold(0u64, |packed, &team| {
            let game = (self.total_points(team) as u64).min(MAX_GAME_POINTS as u64);
            GAME_POINTS.shifted(team_offset(team)).set(packed, game)
        });
        Score(packed)
    }
}

impl TryFrom<u64> for Score {
    type Error = JassError;

    fn try_from(packed: u64) -> Result<Self> {
        Self::from_packed(packed)
    }
}

impl From<Score> for u64 {
    fn from(score: Score) -> u64 {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b] = TeamId::ALL.map(|t| {
            (self.turn_tricks(t), self.turn_points(t), self.game_points(t))
        });
        write!(f, "({},{},{}) / ({},{},{})", a.0, a.1, a.2, b.0, b.1, b.2)
    }
}

impl std::fmt::Debug for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Score{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial() {
        for team in TeamId::ALL {
            assert_eq!(Score::INITIAL.turn_tricks(team), 0);
            assert_eq!(Score::INITIAL.total_points(team), 0);
        }
    }

    #[test]
    fn test_new_layout() {
        let score = Score::new((3, 40, 100), (1, 7, 0)).unwrap();
        assert_eq!(score.packed() & 0xF, 3);
        assert_eq!((score.packed() >> 4) & 0x1FF, 40);
        assert_eq!((score.packed() >> 13) & 0x7FF, 100);
        assert_eq!(score.turn_tricks(TeamId::Team2), 1);
        assert_eq!(score.turn_points(TeamId::Team2), 7);
        assert_eq!(score.total_points(TeamId::Team1), 140);
    }

    #[test]
    fn test_bounds() {
        assert!(Score::new((10, 0, 0), (0, 0, 0)).is_err());
        assert!(Score::new((0, 258, 0), (0, 0, 0)).is_err());
        assert!(Score::new((0, 0, 0), (0, 0, 2001)).is_err());
        assert!(Score::new((9, 257, 2000), (9, 257, 2000)).is_ok());
        assert!(Score::from_packed(1 << 24).is_err());
        assert!(Score::from_packed(1 << 63).is_err());
    }

    #[test]
    fn test_additional_trick() {
        let score = Score::INITIAL
            .with_additional_trick(TeamId::Team2, 21)
            .unwrap()
            .with_additional_trick(TeamId::Team2, 10)
            .unwrap();
        assert_eq!(score.turn_tricks(TeamId::Team2), 2);
        assert_eq!(score.turn_points(TeamId::Team2), 31);
        assert_eq!(score.turn_tricks(TeamId::Team1), 0);
    }

    #[test]
    fn test_match_bonus() {
        let mut score = Score::INITIAL;
        for _ in 0..8 {
            score = score.with_additional_trick(TeamId::Team1, 16).unwrap();
        }
        score = score.with_additional_trick(TeamId::Team1, 29).unwrap();

        assert_eq!(score.turn_tricks(TeamId::Team1), 9);
        assert_eq!(score.turn_points(TeamId::Team1), 257);
    }

    #[test]
    fn test_tenth_trick_is_rejected() {
        let mut score = Score::INITIAL;
        for _ in 0..9 {
            score = score.with_additional_trick(TeamId::Team1, 0).unwrap();
        }
        assert!(score.with_additional_trick(TeamId::Team1, 0).is_err());
    }

    #[test]
    fn test_next_turn() {
        let score = Score::new((9, 257, 0), (0, 0, 0)).unwrap();
        let next = score.next_turn();
        assert_eq!(next, Score::new((0, 0, 257), (0, 0, 0)).unwrap());

        let next = Score::new((4, 60, 300), (5, 97, 410)).unwrap().next_turn();
        assert_eq!(next.game_points(TeamId::Team1), 360);
        assert_eq!(next.game_points(TeamId::Team2), 507);
        assert_eq!(next.turn_tricks(TeamId::Team2), 0);
    }

    #[test]
    fn test_display() {
        let score = Score::new((1, 2, 3), (4, 5, 6)).unwrap();
        assert_eq!(score.to_string(), "(1,2,3) / (4,5,6)");
    }
}
