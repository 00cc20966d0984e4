//! Jass rules: packed tricks and scores, and the turn state machine.
//!
//! Every value here is a small `Copy` integer wrapper. The search copies
//! states freely; nothing is shared or reference counted.

pub mod score;
pub mod trick;
pub mod turn;

pub use score::Score;
pub use trick::Trick;
pub use turn::TurnState;
