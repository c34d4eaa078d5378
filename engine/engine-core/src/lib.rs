//! Core traits and types for the turn-based game engine
//!
//! This crate provides the fundamental abstractions shared by games and search:
//! - `Game`: Typed transition function (legal actions, apply, outcome)
//! - `Outcome` / `Player`: Terminal classification for two-player games
//! - `RewardScheme`: Converts outcomes into search rewards
//! - `GameMetadata`: Display-oriented description handed to presentation layers

pub mod game_utils;
pub mod metadata;
pub mod typed;

// Re-export main types for convenience
pub use game_utils::RewardScheme;
pub use metadata::GameMetadata;
pub use typed::{ActionId, Game, GameError, Outcome, Player, Transition};
