//! Running a game: the player contract and the orchestrator.
//!
//! ## Key Types
//!
//! - `Player`: notifications plus the `card_to_play` query
//! - `JassGame`: deals, collects tricks, keeps score, declares the winner
//! - `RandomPlayer`: uniformly random legal play

pub mod jass_game;
pub mod player;
pub mod random_player;

pub use jass_game::{GameSummary, JassGame};
pub use player::Player;
pub use random_player::RandomPlayer;
