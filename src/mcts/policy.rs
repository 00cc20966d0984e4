//! MCTS policies for selection and simulation.
//!
//! - `SelectionPolicy`: which child to descend into (UCB1)
//! - `SimulationPolicy`: how a turn is finished from a leaf (random rollout)
//!
//! Both see the game through a [`Perspective`]: the searching player's seat
//! and hand. Every other card still unplayed is treated as available to any
//! other seat.

use crate::cards::CardSet;
use crate::core::{GameRng, PlayerId};
use crate::error::{JassError, Result};
use crate::rules::{Score, TurnState};

use super::node::NodeId;
use super::tree::MctsTree;

// =============================================================================
// Perspective
// =============================================================================

/// What the searching player knows beyond the public state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Perspective {
    pub own_id: PlayerId,
    pub hand: CardSet,
}

impl Perspective {
    #[must_use]
    pub fn new(own_id: PlayerId, hand: CardSet) -> Self {
        Self { own_id, hand }
    }

    /// Cards `player` may play next from `state`, as far as we can tell.
    ///
    /// A full trick is collected first; an empty set means the turn is over.
    pub fn playable_cards(&self, player: PlayerId, state: &TurnState) -> Result<CardSet> {
        let state = if !state.is_terminal() && state.trick().is_full() {
            state.collect_trick()?
        } else {
            *state
        };
        if state.is_terminal() {
            return Ok(CardSet::EMPTY);
        }

        let unplayed = state.unplayed_cards();
        let candidates = if player == self.own_id {
            self.hand.intersection(unplayed)
        } else {
            unplayed.difference(self.hand)
        };
        Ok(state.trick().playable_cards(candidates))
    }
}

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which child node to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Index into `tree.get(node).children` of the child to follow.
    ///
    /// Only called on nodes with at least one child.
    fn select(&self, tree: &MctsTree, node: NodeId, exploration: f64) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Formula: `mean + c * sqrt(2 ln(N) / n)`. An unvisited child is taken
/// immediately; ties go to the earliest child.
#[derive(Clone, Debug, Default)]
pub struct Ucb1;

impl SelectionPolicy for Ucb1 {
    fn select(&self, tree: &MctsTree, node: NodeId, exploration: f64) -> usize {
        let parent_log = 2.0 * f64::from(tree.get(node).visits).ln();

        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (i, (_, child)) in tree.children(node).enumerate() {
            if child.visits == 0 {
                return i;
            }
            let visits = f64::from(child.visits);
            let value = child.mean_points() + exploration * (parent_log / visits).sqrt();
            if value > best_value {
                best = i;
                best_value = value;
            }
        }
        best
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for finishing a turn from a leaf state.
pub trait SimulationPolicy: Send + Sync {
    /// Play `state` to the end of the turn and return the final score.
    fn simulate(&self, view: &Perspective, state: TurnState, rng: &mut GameRng) -> Result<Score>;
}

/// Random simulation policy.
///
/// Every seat plays a uniformly random card among those it may play.
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl SimulationPolicy for RandomRollout {
    fn simulate(&self, view: &Perspective, state: TurnState, rng: &mut GameRng) -> Result<Score> {
        let mut state = state;
        if !state.is_terminal() && state.trick().is_full() {
            state = state.collect_trick()?;
        }

        while !state.is_terminal() {
            let playable = view.playable_cards(state.next_player()?, &state)?;
            if playable.is_empty() {
                return Err(JassError::IllegalState("no card left to simulate"));
            }
            let card = playable.get(rng.gen_index(playable.len()))?;
            state = state.play_card_and_collect(card)?;
        }
        Ok(state.score())
    }
}
