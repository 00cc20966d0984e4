//! # jass-engine
//!
//! A Jass (Swiss trick-taking card game) engine with a Monte Carlo tree
//! search player.
//!
//! ## Design Principles
//!
//! 1. **Packed Values**: cards, card sets, tricks and scores are small
//!    integers with fixed bit layouts. They are `Copy`, cheap to hash, and
//!    are what the wire protocol sends.
//!
//! 2. **Validate at the Edge**: public constructors from raw integers return
//!    `Result`; operations on already-valid values are infallible wherever
//!    the state machine allows it, so the search hot path never re-checks.
//!
//! 3. **Deterministic**: one seed drives the shuffle, the trump draws and
//!    every simulated player's search.
//!
//! ## Modules
//!
//! - `core`: bit fields, seats and teams, RNG, configuration
//! - `cards`: suits, ranks, cards and card sets
//! - `rules`: tricks, scores and the turn state machine
//! - `game`: the `Player` contract and the `JassGame` orchestrator
//! - `mcts`: Monte Carlo Tree Search player
//! - `net`: line protocol for players in another process

pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod mcts;
pub mod net;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, PlayerId, PlayerMap, TeamId};

pub use crate::cards::{Card, CardSet, Rank, Suit};

pub use crate::rules::{Score, Trick, TurnState};

pub use crate::error::{JassError, Result};

pub use crate::game::{GameSummary, JassGame, Player, RandomPlayer};

pub use crate::mcts::{MctsConfig, MctsPlayer, MctsSearch, SearchStats};

pub use crate::net::{RemotePlayerClient, RemotePlayerServer};
