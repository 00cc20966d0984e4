//! Core MCTS search algorithm.
//!
//! One tree per decision, rooted at the current turn state. Every seat is
//! expanded, ours from our hand and the others from the cards we cannot
//! see. Rewards are the final turn points of the team that played the
//! node's card, so each seat maximises its own team's score.

use std::time::Instant;

use crate::cards::{Card, CardSet, Suit};
use crate::core::{GameRng, PlayerId};
use crate::error::{JassError, Result};
use crate::rules::{Score, TurnState};

use super::config::MctsConfig;
use super::node::{MctsNode, NodeId};
use super::policy::{Perspective, RandomRollout, SelectionPolicy, SimulationPolicy, Ucb1};
use super::stats::SearchStats;
use super::tree::MctsTree;

/// Visits and mean reward of one root card after a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStatistics {
    pub card: Card,
    pub visits: u32,
    pub mean_points: f64,
}

/// Main MCTS search context.
///
/// Owns the tree and the simulation RNG. The RNG is seeded once from the
/// config and carries over between decisions.
pub struct MctsSearch {
    config: MctsConfig,

    tree: MctsTree,

    rng: GameRng,

    selection: Box<dyn SelectionPolicy>,

    simulation: Box<dyn SimulationPolicy>,

    /// Statistics of the last decision.
    stats: SearchStats,

    /// Reused between iterations.
    path: Vec<NodeId>,
}

impl MctsSearch {
    /// Create a new MCTS search context.
    pub fn new(config: MctsConfig) -> Result<Self> {
        config.validate()?;
        let placeholder = TurnState::initial(Suit::Spade, Score::INITIAL, PlayerId::PLAYER_1);

        Ok(Self {
            rng: GameRng::new(config.seed),
            config,
            tree: MctsTree::new(placeholder, CardSet::EMPTY),
            selection: Box::new(Ucb1),
            simulation: Box::new(RandomRollout),
            stats: SearchStats::default(),
            path: Vec::new(),
        })
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Choose the card the player on move should play from `state`.
    ///
    /// `state` must have an open trick (not full, not terminal).
    pub fn search(&mut self, state: &TurnState, view: &Perspective) -> Result<Card> {
        let start = Instant::now();
        self.stats.reset();

        let player = state.next_player()?;
        let playable = view.playable_cards(player, state)?;
        self.tree.reset(*state, playable);

        let card = match playable.len() {
            0 => {
                return Err(JassError::invalid(format!(
                    "{} has no card to play in {}",
                    player,
                    state.trick()
                )))
            }
            // No choice to make
            1 => playable.first(),
            _ => {
                while self.tree.root_node().visits < self.config.iterations {
                    self.iteration(view)?;
                    self.stats.iterations += 1;
                }
                self.best_card()
            }
        };

        self.stats.time_us = start.elapsed().as_micros() as u64;
        card.ok_or(JassError::IllegalState("search produced no card"))
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(&mut self, view: &Perspective) -> Result<()> {
        let mut path = std::mem::take(&mut self.path);
        path.clear();

        let result = self.find_path(view, &mut path).and_then(|()| {
            let leaf = path.last().copied().unwrap_or(self.tree.root());
            let state = self.tree.get(leaf).state;
            self.simulation.simulate(view, state, &mut self.rng)
        });

        if let Ok(score) = result {
            self.stats.simulations += 1;
            self.backpropagate(&path, score);
        }
        self.path = path;
        result.map(|_| ())
    }

    /// Descend through fully expanded nodes, then add one child if the
    /// reached node has a card left to expand. `path` excludes the root.
    fn find_path(&mut self, view: &Perspective, path: &mut Vec<NodeId>) -> Result<()> {
        let mut current = self.tree.root();

        // === SELECTION ===
        loop {
            let node = self.tree.get(current);
            if !node.is_fully_expanded() || node.children.is_empty() {
                break;
            }
            let best = self
                .selection
                .select(&self.tree, current, self.config.exploration_constant);
            current = node.children[best];
            path.push(current);
        }

        // === EXPANSION ===
        let node = self.tree.get(current);
        let Some(card) = node.unexpanded.first() else {
            // Turn over at this node
            return Ok(());
        };
        let depth = node.depth + 1;

        let mut state = node.state;
        if state.trick().is_full() {
            state = state.collect_trick()?;
        }
        let state = state.play_card(card)?;

        let trick = state.trick();
        let next = if trick.is_full() {
            trick.winning_player()
        } else {
            state.next_player()?
        };
        let playable = view.playable_cards(next, &state)?;

        let child = self
            .tree
            .attach(current, card, MctsNode::new(state, playable, depth));
        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        path.push(child);
        Ok(())
    }

    /// Credit every node on the path with its team's final points.
    fn backpropagate(&mut self, path: &[NodeId], score: Score) {
        self.tree.root_node_mut().visits += 1;

        for &id in path {
            let node = self.tree.get_mut(id);
            node.visits += 1;
            node.total_points += u64::from(score.total_points(node.scoring_team()));
        }
    }

    /// Root child with the highest mean, without exploration.
    fn best_card(&self) -> Option<Card> {
        let root = self.tree.root();
        if self.tree.get(root).children.is_empty() {
            return None;
        }
        let best = self.selection.select(&self.tree, root, 0.0);
        let child = *self.tree.get(root).children.get(best)?;
        self.tree.get(child).card()
    }

    /// Visits and mean points of every expanded root card, in expansion order.
    #[must_use]
    pub fn card_statistics(&self) -> Vec<CardStatistics> {
        self.tree
            .children(self.tree.root())
            .filter_map(|(_, node)| {
                node.card().map(|card| CardStatistics {
                    card,
                    visits: node.visits,
                    mean_points: node.mean_points(),
                })
            })
            .collect()
    }

    /// Statistics of the last decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Tree of the last decision.
    #[must_use]
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }

    #[must_use]
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

impl std::fmt::Debug for MctsSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MctsSearch")
            .field("config", &self.config)
            .field("tree_size", &self.tree.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
