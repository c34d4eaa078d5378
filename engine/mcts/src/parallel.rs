//! Root-parallel MCTS.
//!
//! Each worker grows an independent tree from the same root with its own
//! seeded RNG and a share of the iteration budget. Root child statistics are
//! then summed per action. Workers never share nodes.

use std::time::Instant;

use engine_core::Game;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::config::MctsConfig;
use crate::rollout::UniformRandomRollout;
use crate::search::{MctsSearch, SearchError, SearchResult, SearchStats};
use crate::tree::ChildStats;

/// Iterations handed to worker `index` out of `workers`.
///
/// The remainder goes to the first workers so the shares add up to `total`.
fn worker_share(total: u32, workers: u32, index: u32) -> u32 {
    total / workers + u32::from(index < total % workers)
}

/// RNG seed for worker `index`.
///
/// The index is spread with a golden-ratio multiplier so that nearby base
/// seeds do not hand out overlapping worker streams. Worker 0 keeps the base
/// seed, which makes a single worker match the sequential search.
fn worker_seed(base_seed: u64, index: u32) -> u64 {
    base_seed ^ u64::from(index).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Run `workers` independent searches in parallel and merge their root
/// statistics.
///
/// Worker `i` is seeded from `base_seed` and `i`, so the merged choice only
/// depends on the seed and worker count. A worker count of zero is treated
/// as one.
pub fn run_root_parallel<G: Game>(
    game: &G,
    state: &G::State,
    config: &MctsConfig,
    workers: usize,
    base_seed: u64,
) -> Result<SearchResult, SearchError> {
    let workers = workers.max(1) as u32;
    let start = Instant::now();

    let results = (0..workers)
        .into_par_iter()
        .map(|i| {
            let worker_config = config
                .clone()
                .with_iterations(worker_share(config.iterations, workers, i));
            let mut rng = ChaCha20Rng::seed_from_u64(worker_seed(base_seed, i));
            MctsSearch::new(game, state, worker_config, &UniformRandomRollout).run(&mut rng)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut children: Vec<ChildStats> = Vec::new();
    let mut merged = SearchStats::default();
    let mut root_visits = 0;
    let mut iterations = 0;
    let mut truncated = false;

    for result in &results {
        for child in &result.children {
            match children.iter_mut().find(|c| c.action == child.action) {
                Some(total) => {
                    total.visits += child.visits;
                    total.reward += child.reward;
                }
                None => children.push(*child),
            }
        }
        root_visits += result.root_visits;
        iterations += result.iterations;
        truncated |= result.truncated;
        merged.nodes += result.stats.nodes;
        merged.max_depth = merged.max_depth.max(result.stats.max_depth);
        merged.skipped_expansions += result.stats.skipped_expansions;
        merged.rollout_plies += result.stats.rollout_plies;
    }
    merged.elapsed = start.elapsed();

    let mut best: Option<&ChildStats> = None;
    for child in &children {
        match best {
            Some(b) if child.visits <= b.visits => {}
            _ => best = Some(child),
        }
    }

    let action = match best {
        Some(child) => child.action,
        None => {
            let mut rng = ChaCha20Rng::seed_from_u64(base_seed);
            *game
                .legal_actions(state)
                .choose(&mut rng)
                .ok_or(SearchError::NoLegalMoves)?
        }
    };

    debug!(
        action,
        workers,
        iterations,
        root_visits,
        nodes = merged.nodes,
        "Root-parallel search complete"
    );

    Ok(SearchResult {
        action,
        children,
        root_visits,
        iterations,
        truncated,
        stats: merged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::TicTacToe;

    #[test]
    fn test_worker_share_adds_up() {
        for (total, workers) in [(1000, 4), (1000, 3), (7, 8), (0, 2), (5, 1)] {
            let shares: Vec<u32> = (0..workers)
                .map(|i| worker_share(total, workers, i))
                .collect();
            assert_eq!(shares.iter().sum::<u32>(), total);
            let max = *shares.iter().max().unwrap();
            let min = *shares.iter().min().unwrap();
            assert!(max - min <= 1);
        }
    }

    #[test]
    fn test_worker_seeds_do_not_overlap_between_nearby_bases() {
        assert_eq!(worker_seed(42, 0), 42);

        let mut seeds = Vec::new();
        for base in 0..16u64 {
            for i in 0..8 {
                seeds.push(worker_seed(base, i));
            }
        }
        let total = seeds.len();
        seeds.sort_unstable();
        seeds.dedup();
        assert_eq!(seeds.len(), total);

        // Shifting the base by one no longer reuses the previous worker's stream
        assert_ne!(worker_seed(7, 1), worker_seed(8, 0));
    }

    #[test]
    fn test_parallel_root_visits_sum_to_budget() {
        let game = TicTacToe::new();
        let config = MctsConfig::default().with_iterations(400);

        let result = run_root_parallel(&game, &game.initial_state(), &config, 4, 42).unwrap();
        assert_eq!(result.root_visits, 400);
        assert_eq!(result.iterations, 400);
        assert_eq!(result.children.len(), 9);

        // Each worker spends its first iteration on the root alone
        let child_visits: u32 = result.children.iter().map(|c| c.visits).sum();
        assert_eq!(child_visits, 400 - 4);
    }

    #[test]
    fn test_parallel_is_deterministic() {
        let game = TicTacToe::new();
        let state = game.play(&[4]).unwrap();
        let config = MctsConfig::default().with_iterations(600);

        let a = run_root_parallel(&game, &state, &config, 3, 7).unwrap();
        let b = run_root_parallel(&game, &state, &config, 3, 7).unwrap();
        assert_eq!(a.action, b.action);
        assert_eq!(a.children, b.children);
    }

    #[test]
    fn test_single_worker_matches_sequential() {
        let game = TicTacToe::new();
        let state = game.play(&[0, 4]).unwrap();
        let config = MctsConfig::default().with_iterations(300);

        let parallel = run_root_parallel(&game, &state, &config, 1, 13).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        let sequential = crate::run_mcts(&game, &state, config, &mut rng).unwrap();

        assert_eq!(parallel.action, sequential.action);
        assert_eq!(parallel.children, sequential.children);
    }

    #[test]
    fn test_parallel_finds_winning_move() {
        let game = TicTacToe::new();
        let state = game.play(&[0, 3, 1, 4]).unwrap();
        let config = MctsConfig::default().with_iterations(1000);

        let result = run_root_parallel(&game, &state, &config, 4, 42).unwrap();
        assert_eq!(result.action, 2);
    }

    #[test]
    fn test_parallel_no_legal_moves() {
        let game = TicTacToe::new();
        let state = game.play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]).unwrap();

        let err = run_root_parallel(&game, &state, &MctsConfig::for_testing(), 2, 0).unwrap_err();
        assert!(matches!(err, SearchError::NoLegalMoves));
    }

    #[test]
    fn test_zero_workers_treated_as_one() {
        let game = TicTacToe::new();
        let result =
            run_root_parallel(&game, &game.initial_state(), &MctsConfig::for_testing(), 0, 1)
                .unwrap();
        assert_eq!(result.root_visits, 100);
    }
}
