//! MCTS search implementation.
//!
//! Implements the core MCTS algorithm:
//! 1. Selection: Traverse tree using UCB to find a leaf
//! 2. Expansion: Add a child for every untried legal action of the leaf
//! 3. Simulation: Play a random game from the leaf's state
//! 4. Backpropagation: Add the scored outcome along the path to the root

use std::time::{Duration, Instant};

use engine_core::{ActionId, Game, GameError, Outcome, Player};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::{self, RolloutPolicy, UniformRandomRollout};
use crate::tree::{ChildStats, MctsTree};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Counters collected while searching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Nodes allocated in the tree, root included
    pub nodes: usize,
    /// Deepest node below the root
    pub max_depth: u32,
    /// Expansion transitions dropped because the game rejected them
    pub skipped_expansions: u32,
    /// Total moves played across all rollouts
    pub rollout_plies: u64,
    /// Wall-clock time spent in the loop
    pub elapsed: Duration,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best action to take
    pub action: ActionId,

    /// Root children in insertion order
    pub children: Vec<ChildStats>,

    /// Visits recorded at the root
    pub root_visits: u32,

    /// Number of iterations completed
    pub iterations: u32,

    /// Whether the time limit stopped the loop before the iteration budget
    pub truncated: bool,

    pub stats: SearchStats,
}

impl SearchResult {
    /// Statistics of the chosen root child, `None` when the action came
    /// from the fallback draw.
    pub fn chosen(&self) -> Option<&ChildStats> {
        self.children.iter().find(|c| c.action == self.action)
    }
}

/// MCTS search state for one decision.
///
/// The tree is built from a clone of the caller's state and thrown away with
/// the search; nothing carries over between decisions.
pub struct MctsSearch<'a, G: Game, P: RolloutPolicy = UniformRandomRollout> {
    game: &'a G,
    policy: &'a P,
    config: MctsConfig,
    tree: MctsTree<G::State>,
    root_player: Player,
    skipped_expansions: u32,
    rollout_plies: u64,
}

impl<'a, G: Game, P: RolloutPolicy> MctsSearch<'a, G, P> {
    /// Create a new MCTS search rooted at `state`.
    pub fn new(game: &'a G, state: &G::State, config: MctsConfig, policy: &'a P) -> Self {
        let tree = MctsTree::new(
            state.clone(),
            game.legal_actions(state),
            game.is_terminal(state),
        );

        Self {
            game,
            policy,
            config,
            tree,
            root_player: game.active_player(state),
            skipped_expansions: 0,
            rollout_plies: 0,
        }
    }

    /// Run the search for the configured number of iterations, or until the
    /// time limit is hit, and pick the most visited root child.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<SearchResult, SearchError> {
        let root_legal = self.tree.get(self.tree.root()).legal_actions.clone();
        if root_legal.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }

        let start = Instant::now();
        let deadline = self.config.time_limit.map(|limit| start + limit);
        let mut completed = 0;
        let mut truncated = false;

        for _ in 0..self.config.iterations {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                truncated = true;
                break;
            }
            self.iterate(rng)?;
            completed += 1;
        }

        if truncated {
            warn!(
                completed,
                budget = self.config.iterations,
                "MCTS stopped at time limit"
            );
        }

        let action = match self.tree.best_action() {
            Some((action, _)) => action,
            None => {
                // Zero budget or terminal root: no statistics to choose from
                let action = *root_legal.choose(rng).ok_or(SearchError::NoLegalMoves)?;
                debug!(action, "No root children, picked a random legal action");
                action
            }
        };

        let tree_stats = self.tree.stats();
        let result = SearchResult {
            action,
            children: self.tree.root_children(),
            root_visits: tree_stats.root_visits,
            iterations: completed,
            truncated,
            stats: SearchStats {
                nodes: tree_stats.total_nodes,
                max_depth: tree_stats.max_depth,
                skipped_expansions: self.skipped_expansions,
                rollout_plies: self.rollout_plies,
                elapsed: start.elapsed(),
            },
        };

        for child in &result.children {
            debug!(
                action = child.action,
                visits = child.visits,
                mean_reward = child.mean_reward(),
                "Root child"
            );
        }
        debug!(
            action = result.action,
            iterations = result.iterations,
            nodes = result.stats.nodes,
            max_depth = result.stats.max_depth,
            elapsed_ms = result.stats.elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(result)
    }

    /// One select -> expand -> simulate -> backpropagate pass.
    fn iterate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SearchError> {
        let node_id = self.select();
        self.expand(node_id)?;

        let rollout = rollout::simulate(
            self.game,
            self.policy,
            &self.tree.get(node_id).state,
            rng,
        )?;
        self.rollout_plies += u64::from(rollout.depth);

        let reward = self.config.rewards.score(rollout.outcome, self.root_player);
        self.tree.backpropagate(node_id, reward);

        trace!(
            node = node_id.0,
            outcome = %rollout.outcome,
            depth = rollout.depth,
            reward,
            "MCTS iteration complete"
        );

        Ok(())
    }

    /// Descend from the root through expanded, non-terminal nodes using UCB.
    fn select(&self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);

            // Stop at terminal or unexpanded nodes
            if node.is_terminal || !node.is_expanded() {
                return current;
            }

            match self
                .tree
                .select_best_child(current, self.config.exploration_constant)
            {
                Some(child_id) => current = child_id,
                None => return current,
            }
        }
    }

    /// Add a child for every legal action of `node_id` that has none yet.
    ///
    /// Transitions the game classifies as illegal are skipped and counted.
    /// An out-of-range action index aborts the search.
    fn expand(&mut self, node_id: NodeId) -> Result<(), SearchError> {
        let node = self.tree.get(node_id);
        if node.is_terminal {
            return Ok(());
        }

        let state = node.state.clone();
        for action in node.untried_actions() {
            match self.game.apply_action(&state, action) {
                Ok(transition) if transition.outcome == Outcome::IllegalMove => {
                    self.skip(node_id, action, "transition ended in an illegal move");
                }
                Ok(transition) => {
                    let legal = self.game.legal_actions(&transition.state);
                    let terminal = transition.outcome.is_terminal();
                    self.tree
                        .add_child(node_id, action, transition.state, legal, terminal);
                }
                Err(e) if e.is_illegal_move() => {
                    self.skip(node_id, action, &e.to_string());
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(())
    }

    fn skip(&mut self, node_id: NodeId, action: ActionId, reason: &str) {
        self.skipped_expansions += 1;
        warn!(node = node_id.0, action, reason, "Skipping expansion action");
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::State> {
        &self.tree
    }

    /// Player the rewards are scored for.
    pub fn root_player(&self) -> Player {
        self.root_player
    }
}

/// Convenience function to run a single MCTS search with random rollouts.
pub fn run_mcts<G: Game, R: Rng + ?Sized>(
    game: &G,
    state: &G::State,
    config: MctsConfig,
    rng: &mut R,
) -> Result<SearchResult, SearchError> {
    let mut search = MctsSearch::new(game, state, config, &UniformRandomRollout);
    search.run(rng)
}
