//! Monte Carlo Tree Search for Jass.
//!
//! ## Overview
//!
//! The searching player only knows its own hand, so every other unplayed
//! card is treated as available to any other seat. Each decision builds a
//! fresh tree over the remainder of the current turn:
//!
//! - **Selection**: UCB1 through fully expanded nodes
//! - **Expansion**: one child per iteration, lowest unexpanded card first
//! - **Simulation**: uniformly random legal cards to the end of the turn
//! - **Backpropagation**: each node is credited with the final turn points
//!   of the team that played its card
//!
//! The root child with the best mean is played.
//!
//! ## Usage
//!
//! ```rust
//! use jass_engine::cards::{CardSet, Suit};
//! use jass_engine::core::PlayerId;
//! use jass_engine::mcts::{MctsConfig, MctsSearch, Perspective};
//! use jass_engine::rules::{Score, TurnState};
//!
//! let state = TurnState::initial(Suit::Heart, Score::INITIAL, PlayerId::PLAYER_1);
//! let hand: CardSet = CardSet::ALL_CARDS.iter().step_by(4).collect();
//!
//! let config = MctsConfig::default().with_iterations(500).with_seed(7);
//! let mut search = MctsSearch::new(config).unwrap();
//! let card = search
//!     .search(&state, &Perspective::new(PlayerId::PLAYER_1, hand))
//!     .unwrap();
//! assert!(hand.contains(card));
//! ```

pub mod config;
pub mod node;
pub mod player;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use player::MctsPlayer;
pub use policy::{Perspective, RandomRollout, SelectionPolicy, SimulationPolicy, Ucb1};
pub use search::{CardStatistics, MctsSearch};
pub use stats::SearchStats;
pub use tree::{MctsTree, TreeStats};
