//! Move selection policies for the arena

use anyhow::{anyhow, Result};
use engine_core::{ActionId, Game};
use mcts::{run_mcts, run_root_parallel, MctsConfig, SearchResult};
use rand::prelude::*;
use rand_chacha::ChaCha20Rng;
use std::time::Duration;
use tracing::debug;

/// Trait for move selection policies.
pub trait Policy<G: Game>: Send {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Propose an action for the player to move in `state`.
    ///
    /// The proposal may be rejected by the arena and requested again.
    fn select_action(&mut self, game: &G, state: &G::State) -> Result<ActionId>;
}

/// Random policy that picks any action index uniformly at random.
///
/// It ignores legality on purpose, the way a careless player clicks on taken
/// cells, so the arena's move validation is exercised.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl<G: Game> Policy<G> for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_action(&mut self, game: &G, _state: &G::State) -> Result<ActionId> {
        let n = game.num_actions();
        if n == 0 {
            return Err(anyhow!("action space must have n > 0"));
        }
        Ok(self.rng.gen_range(0..n))
    }
}

/// Running totals over every search a policy performed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSummary {
    pub searches: u32,
    pub iterations: u64,
    pub truncated: u32,
    pub elapsed: Duration,
}

impl SearchSummary {
    fn add(&mut self, result: &SearchResult) {
        self.searches += 1;
        self.iterations += u64::from(result.iterations);
        self.truncated += u32::from(result.truncated);
        self.elapsed += result.stats.elapsed;
    }

    /// Mean wall-clock time per search in milliseconds
    pub fn avg_ms(&self) -> f64 {
        if self.searches == 0 {
            0.0
        } else {
            self.elapsed.as_secs_f64() * 1000.0 / self.searches as f64
        }
    }
}

/// MCTS-based policy with random rollouts
#[derive(Debug)]
pub struct MctsPolicy {
    config: MctsConfig,
    /// Root-parallel workers; 1 runs the plain sequential search
    workers: usize,
    rng: ChaCha20Rng,
    summary: SearchSummary,
}

impl MctsPolicy {
    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self {
            config,
            workers: 1,
            rng: ChaCha20Rng::seed_from_u64(seed),
            summary: SearchSummary::default(),
        }
    }

    /// Set the number of root-parallel workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn summary(&self) -> &SearchSummary {
        &self.summary
    }

    /// Run one search and return its full result
    pub fn search<G: Game>(&mut self, game: &G, state: &G::State) -> Result<SearchResult> {
        let result = if self.workers > 1 {
            // Fresh base seed per decision so consecutive searches differ
            let base_seed = self.rng.gen();
            run_root_parallel(game, state, &self.config, self.workers, base_seed)?
        } else {
            run_mcts(game, state, self.config.clone(), &mut self.rng)?
        };

        self.summary.add(&result);
        debug!(
            action = result.action,
            iterations = result.iterations,
            root_visits = result.root_visits,
            truncated = result.truncated,
            "MCTS decision"
        );
        Ok(result)
    }
}

impl<G: Game> Policy<G> for MctsPolicy {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn select_action(&mut self, game: &G, state: &G::State) -> Result<ActionId> {
        Ok(self.search(game, state)?.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::TicTacToe;

    #[test]
    fn test_random_policy_stays_in_action_space() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        let mut policy = RandomPolicy::with_seed(42);

        for _ in 0..100 {
            let action = policy.select_action(&game, &state).unwrap();
            assert!(action < 9);
        }
    }

    #[test]
    fn test_random_policy_determinism_with_same_seed() {
        let game = TicTacToe::new();
        let state = game.initial_state();
        let mut policy1 = RandomPolicy::with_seed(12345);
        let mut policy2 = RandomPolicy::with_seed(12345);

        for _ in 0..20 {
            assert_eq!(
                policy1.select_action(&game, &state).unwrap(),
                policy2.select_action(&game, &state).unwrap(),
                "policies with same seed should produce same actions"
            );
        }
    }

    #[test]
    fn test_random_policy_eventually_picks_occupied_cell() {
        let game = TicTacToe::new();
        let state = game.play(&[0, 1, 2, 3, 5, 4, 6, 8]).unwrap();
        let mut policy = RandomPolicy::with_seed(1);

        let picked_occupied = (0..100)
            .map(|_| policy.select_action(&game, &state).unwrap())
            .any(|a| a != 7);
        assert!(picked_occupied);
    }

    #[test]
    fn test_mcts_policy_picks_winning_move() {
        let game = TicTacToe::new();
        let state = game.play(&[0, 3, 1, 4]).unwrap();
        let mut policy = MctsPolicy::with_seed(MctsConfig::default(), 42);

        assert_eq!(policy.select_action(&game, &state).unwrap(), 2);
        assert_eq!(policy.summary().searches, 1);
        assert_eq!(policy.summary().iterations, 1000);
    }

    #[test]
    fn test_parallel_mcts_policy() {
        let game = TicTacToe::new();
        let state = game.play(&[0, 3, 1, 4]).unwrap();
        let mut policy = MctsPolicy::with_seed(MctsConfig::default(), 42).with_workers(4);

        let result = policy.search(&game, &state).unwrap();
        assert_eq!(result.action, 2);
        assert_eq!(result.root_visits, 1000);
    }

    #[test]
    fn test_summary_average() {
        let game = TicTacToe::new();
        let mut policy = MctsPolicy::with_seed(MctsConfig::for_testing(), 3);
        assert_eq!(policy.summary().avg_ms(), 0.0);

        let state = game.initial_state();
        policy.select_action(&game, &state).unwrap();
        policy.select_action(&game, &state).unwrap();
        assert_eq!(policy.summary().searches, 2);
        assert_eq!(policy.summary().iterations, 200);
        assert_eq!(policy.summary().truncated, 0);
    }
}
