//! Monte Carlo Tree Search (MCTS) for two-player turn-based games.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` Game trait.
//!
//! # Overview
//!
//! Each iteration of the search consists of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCB1 to balance exploration and
//!    exploitation
//! 2. **Expansion**: When reaching a leaf, add a child for every legal action
//! 3. **Simulation**: Play random moves from the leaf until the game ends
//! 4. **Backpropagation**: Score the outcome for the player to move at the
//!    root and add it to every node from the leaf up to the root
//!
//! After the budget is spent the most visited root child is played.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::Game;
//! use games_tictactoe::TicTacToe;
//! use mcts::{run_mcts, MctsConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = TicTacToe::new();
//! // X | X | _
//! // O | O | _
//! let state = game.play(&[0, 3, 1, 4]).unwrap();
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(&game, &state, MctsConfig::default(), &mut rng).unwrap();
//! assert_eq!(result.action, 2);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: Number of iterations per decision (default: 1000)
//! - `exploration_constant`: UCB1 exploration weight (default: 1.4)
//! - `rewards`: How terminal outcomes are scored (default: +1 / -10 / 0 / -1)
//! - `time_limit`: Optional wall-clock deadline
//!
//! For multi-core machines, [`run_root_parallel`] runs independent trees on a
//! rayon pool and merges their root statistics.

pub mod config;
pub mod node;
pub mod parallel;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use node::{MctsNode, NodeId};
pub use parallel::run_root_parallel;
pub use rollout::{simulate, FirstLegalRollout, RolloutPolicy, RolloutResult, UniformRandomRollout};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult, SearchStats};
pub use tree::{ChildStats, MctsTree, TreeStats};
