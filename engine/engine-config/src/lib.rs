//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the search engine and the arena binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`NOUGHTS_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! NOUGHTS_<SECTION>_<KEY>=value
//!
//! Examples:
//!     NOUGHTS_COMMON_LOG_LEVEL=debug
//!     NOUGHTS_MCTS_ITERATIONS=5000
//!     NOUGHTS_MCTS_WORKERS=4
//!     NOUGHTS_REWARDS_LOSS=-1.0
//!     NOUGHTS_ARENA_OPPONENT=mcts
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_ENV_VAR, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
