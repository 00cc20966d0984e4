//! MCTS node structure.
//!
//! Nodes live in an arena and refer to each other by `NodeId`. Each child
//! stands for one card played from its parent's state; the card is the last
//! one in the child's trick, so no separate edge type is needed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardSet};
use crate::core::config::HAND_SIZE;
use crate::core::TeamId;
use crate::rules::TurnState;

/// Index into the MctsTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MctsNode {
    /// State after this node's card was played. The trick is left
    /// uncollected, so it may be full.
    pub state: TurnState,

    /// Expanded children, in expansion order.
    pub children: SmallVec<[NodeId; HAND_SIZE]>,

    /// Legal cards not yet expanded into children.
    pub unexpanded: CardSet,

    /// Sum of simulated turn totals for the team that played this node's card.
    pub total_points: u64,

    /// Simulations through this node.
    pub visits: u32,

    /// Depth in tree (root = 0).
    pub depth: u16,
}

impl MctsNode {
    /// Create a node with `playable` as its pending children.
    pub fn new(state: TurnState, playable: CardSet, depth: u16) -> Self {
        Self {
            state,
            children: SmallVec::new(),
            unexpanded: playable,
            total_points: 0,
            visits: 0,
            depth,
        }
    }

    /// Create a root node.
    pub fn root(state: TurnState, playable: CardSet) -> Self {
        Self::new(state, playable, 0)
    }

    /// Every legal card has a child.
    #[inline]
    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.unexpanded.is_empty()
    }

    /// No card can be played from here: the turn ends at this node.
    #[inline]
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.unexpanded.is_empty()
    }

    /// Mean points per visit, zero when unvisited.
    #[must_use]
    pub fn mean_points(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_points as f64 / self.visits as f64
        }
    }

    /// Card that led to this node; `None` for a root on an empty trick.
    #[must_use]
    pub fn card(&self) -> Option<Card> {
        let trick = self.state.trick();
        trick.len().checked_sub(1).and_then(|i| trick.card(i).ok())
    }

    /// Team credited with this node's simulation results: the team of the
    /// player of the last card in the trick.
    #[must_use]
    pub fn scoring_team(&self) -> TeamId {
        let trick = self.state.trick();
        trick.player(trick.len().saturating_sub(1)).team()
    }
}
