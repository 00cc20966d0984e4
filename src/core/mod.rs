//! Core building blocks: bit packing, seats and teams, RNG, configuration.
//!
//! Nothing in here knows about cards; the codecs in `cards` and `rules` are
//! built on top of these.

pub mod bits;
pub mod config;
pub mod player;
pub mod rng;

pub use bits::{BitsError, Field};
pub use config::GameConfig;
pub use player::{PlayerId, PlayerMap, TeamId};
pub use rng::GameRng;
