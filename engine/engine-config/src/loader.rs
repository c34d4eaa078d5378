//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "NOUGHTS_CONFIG";

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from a crate directory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by the NOUGHTS_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_ENV_VAR, path.display());
            return load_from_path(&path);
        }
        warn!(
            "{}={} not found, searching defaults",
            CONFIG_ENV_VAR,
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// An unreadable or malformed file is logged and replaced by the defaults.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        match std::env::var($key).map(|s| s.parse()) {
            Ok(Ok(v)) => $config.$section.$field = v,
            Ok(Err(_)) => warn!("Ignoring unparseable {}", $key),
            Err(_) => {}
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: NOUGHTS_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "NOUGHTS_COMMON_LOG_LEVEL");

    // MCTS
    env_override!(config, mcts.iterations, "NOUGHTS_MCTS_ITERATIONS", parse);
    env_override!(
        config,
        mcts.exploration_constant,
        "NOUGHTS_MCTS_EXPLORATION_CONSTANT",
        parse
    );
    env_override!(
        config,
        mcts.time_limit_ms,
        "NOUGHTS_MCTS_TIME_LIMIT_MS",
        parse
    );
    env_override!(config, mcts.workers, "NOUGHTS_MCTS_WORKERS", parse);

    // Rewards
    env_override!(config, rewards.win, "NOUGHTS_REWARDS_WIN", parse);
    env_override!(config, rewards.loss, "NOUGHTS_REWARDS_LOSS", parse);
    env_override!(config, rewards.draw, "NOUGHTS_REWARDS_DRAW", parse);
    env_override!(
        config,
        rewards.illegal_move,
        "NOUGHTS_REWARDS_ILLEGAL_MOVE",
        parse
    );

    // Arena
    env_override!(config, arena.games, "NOUGHTS_ARENA_GAMES", parse);
    env_override!(config, arena.seed, "NOUGHTS_ARENA_SEED", parse);
    env_override!(config, arena.ai_player, "NOUGHTS_ARENA_AI_PLAYER");
    env_override!(config, arena.opponent, "NOUGHTS_ARENA_OPPONENT");
    env_override!(
        config,
        arena.opponent_iterations,
        "NOUGHTS_ARENA_OPPONENT_ITERATIONS",
        parse
    );

    config
}
