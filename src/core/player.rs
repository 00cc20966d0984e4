//! Seat and partnership identification, plus per-seat storage.
//!
//! ## PlayerId
//!
//! One of the four seats, `0..=3`. Seats alternate between the two teams:
//! seats 0 and 2 form team 1, seats 1 and 3 form team 2.
//!
//! ## PlayerMap
//!
//! Fixed `[T; 4]` storage indexed by `PlayerId`. The set of seats never
//! changes during a game, so no map or growable vector is needed.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::error::{JassError, Result};

/// Seat at the table, `0..=3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// Number of seats.
    pub const COUNT: usize = 4;

    pub const PLAYER_1: PlayerId = PlayerId(0);
    pub const PLAYER_2: PlayerId = PlayerId(1);
    pub const PLAYER_3: PlayerId = PlayerId(2);
    pub const PLAYER_4: PlayerId = PlayerId(3);

    /// All seats in play order.
    pub const ALL: [PlayerId; 4] = [
        Self::PLAYER_1,
        Self::PLAYER_2,
        Self::PLAYER_3,
        Self::PLAYER_4,
    ];

    /// Seat from its 0-based index.
    pub fn new(index: usize) -> Result<Self> {
        if index < Self::COUNT {
            Ok(Self(index as u8))
        } else {
            Err(JassError::InvalidIndex { index, len: Self::COUNT })
        }
    }

    /// Seat from an index already reduced modulo 4.
    #[inline]
    pub(crate) const fn from_index_unchecked(index: u32) -> Self {
        Self((index % Self::COUNT as u32) as u8)
    }

    /// 0-based seat index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Partnership this seat plays for.
    #[inline]
    #[must_use]
    pub const fn team(self) -> TeamId {
        if self.0 % 2 == 0 {
            TeamId::Team1
        } else {
            TeamId::Team2
        }
    }

    /// Seat `offset` places further round the table.
    #[inline]
    #[must_use]
    pub const fn offset(self, offset: usize) -> Self {
        Self(((self.0 as usize + offset) % Self::COUNT) as u8)
    }

    /// The next seat in play order.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        self.offset(1)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = JassError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value as usize)
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> u8 {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// One of the two partnerships.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamId {
    Team1,
    Team2,
}

impl TeamId {
    pub const COUNT: usize = 2;
    pub const ALL: [TeamId; 2] = [TeamId::Team1, TeamId::Team2];

    /// Team from its 0-based index.
    pub fn new(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(JassError::InvalidIndex { index, len: Self::COUNT })
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The opposing team.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            TeamId::Team1 => TeamId::Team2,
            TeamId::Team2 => TeamId::Team1,
        }
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.index() + 1)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use jass_engine::core::{PlayerId, PlayerMap};
///
/// let mut tricks: PlayerMap<u32> = PlayerMap::with_value(0);
/// tricks[PlayerId::PLAYER_2] += 1;
///
/// assert_eq!(tricks[PlayerId::PLAYER_1], 0);
/// assert_eq!(tricks[PlayerId::PLAYER_2], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 4],
}

impl<T> PlayerMap<T> {
    /// Create with values from a factory function.
    pub fn new(factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::ALL.map(factory),
        }
    }

    /// Create from values in seat order.
    pub fn from_array(data: [T; 4]) -> Self {
        Self { data }
    }

    /// Create with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs in seat order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Mutable values in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    /// Apply `f` to every entry.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: self.data.map(f),
        }
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
