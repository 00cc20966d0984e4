//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one or more card decisions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Simulated turns.
    pub iterations: u32,

    /// Nodes added to the tree.
    pub nodes_expanded: u32,

    /// Rollouts run from a leaf.
    pub simulations: u32,

    /// Deepest node created, in cards past the root.
    pub max_depth: u16,

    /// Wall time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fold the statistics of another decision into these.
    pub fn merge(&mut self, other: &SearchStats) {
        self.iterations = self.iterations.saturating_add(other.iterations);
        self.nodes_expanded = self.nodes_expanded.saturating_add(other.nodes_expanded);
        self.simulations = self.simulations.saturating_add(other.simulations);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.time_us = self.time_us.saturating_add(other.time_us);
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Average number of nodes each iteration added.
    #[must_use]
    pub fn nodes_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / self.iterations as f64
        }
    }
}
