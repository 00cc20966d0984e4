//! Arena-based MCTS tree.
//!
//! A flat `Vec<MctsNode>` with index-based references. One tree is built per
//! decision and reset before the next, so the allocation is reused.

use serde::{Deserialize, Serialize};

use super::node::{MctsNode, NodeId};
use crate::cards::{Card, CardSet};
use crate::rules::TurnState;

/// Arena-based MCTS tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MctsTree {
    nodes: Vec<MctsNode>,

    /// Always 0 after a reset.
    root: NodeId,
}

impl MctsTree {
    /// Create a tree rooted at `state` with `playable` as the root's moves.
    pub fn new(state: TurnState, playable: CardSet) -> Self {
        Self::with_capacity(state, playable, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(state: TurnState, playable: CardSet, capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(MctsNode::root(state, playable));
        Self {
            nodes,
            root: NodeId::new(0),
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node, returning its ID.
    pub fn alloc(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocate `child` under `parent`, consuming the parent's pending `card`.
    pub fn attach(&mut self, parent: NodeId, card: Card, child: MctsNode) -> NodeId {
        let id = self.alloc(child);
        let parent = self.get_mut(parent);
        parent.unexpanded = parent.unexpanded.remove(card);
        parent.children.push(id);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let leaf_count = self.nodes.iter().filter(|n| n.is_leaf()).count();
        let expanded_children: usize = self.nodes.iter().map(|n| n.children.len()).sum();
        let pending_children: usize = self.nodes.iter().map(|n| n.unexpanded.len()).sum();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            leaf_count,
            expanded_children,
            pending_children,
        }
    }

    /// Clear the tree and reset with a new root.
    pub fn reset(&mut self, state: TurnState, playable: CardSet) {
        self.nodes.clear();
        self.nodes.push(MctsNode::root(state, playable));
        self.root = NodeId::new(0);
    }

    #[must_use]
    pub fn root_node(&self) -> &MctsNode {
        self.get(self.root)
    }

    pub fn root_node_mut(&mut self) -> &mut MctsNode {
        self.get_mut(self.root)
    }

    /// Children of `id` as (id, node) pairs.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &MctsNode)> {
        self.get(id).children.iter().map(|&c| (c, self.get(c)))
    }
}

/// Statistics about the MCTS tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,

    pub max_depth: u16,

    /// Nodes where the turn is over.
    pub leaf_count: usize,

    /// Child links created.
    pub expanded_children: usize,

    /// Legal cards never expanded.
    pub pending_children: usize,
}

impl TreeStats {
    /// Average number of legal cards per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            (self.expanded_children + self.pending_children) as f64 / self.node_count as f64
        }
    }

    /// Share of legal cards that were expanded.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        let total = self.expanded_children + self.pending_children;
        if total == 0 {
            0.0
        } else {
            self.expanded_children as f64 / total as f64
        }
    }
}
