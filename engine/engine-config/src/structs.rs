//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_exploration_constant() -> f64 {
    defaults::exploration_constant()
}
fn d_time_limit_ms() -> u64 {
    defaults::time_limit_ms()
}
fn d_workers() -> usize {
    defaults::workers()
}
fn d_win() -> f64 {
    defaults::win_reward()
}
fn d_loss() -> f64 {
    defaults::loss_reward()
}
fn d_draw() -> f64 {
    defaults::draw_reward()
}
fn d_illegal_move() -> f64 {
    defaults::illegal_move_reward()
}
fn d_games() -> u32 {
    defaults::games()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_ai_player() -> String {
    defaults::ai_player().into()
}
fn d_opponent() -> String {
    defaults::opponent().into()
}
fn d_opponent_iterations() -> u32 {
    defaults::opponent_iterations()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub rewards: RewardsConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    /// Iterations per decision
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    /// UCB1 exploration constant
    #[serde(default = "d_exploration_constant")]
    pub exploration_constant: f64,
    /// Wall-clock budget per decision in milliseconds (0 = no limit)
    #[serde(default = "d_time_limit_ms")]
    pub time_limit_ms: u64,
    /// Root-parallel workers (1 = single-threaded search)
    #[serde(default = "d_workers")]
    pub workers: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            exploration_constant: defaults::exploration_constant(),
            time_limit_ms: defaults::time_limit_ms(),
            workers: defaults::workers(),
        }
    }
}

/// Terminal outcome rewards, seen from the searching player
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RewardsConfig {
    #[serde(default = "d_win")]
    pub win: f64,
    #[serde(default = "d_loss")]
    pub loss: f64,
    #[serde(default = "d_draw")]
    pub draw: f64,
    #[serde(default = "d_illegal_move")]
    pub illegal_move: f64,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            win: defaults::win_reward(),
            loss: defaults::loss_reward(),
            draw: defaults::draw_reward(),
            illegal_move: defaults::illegal_move_reward(),
        }
    }
}

/// Headless match runner configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    /// Matches to play
    #[serde(default = "d_games")]
    pub games: u32,
    /// Base seed; match `i` uses `seed + i`
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Side the search plays in the first match ("A" or "B")
    #[serde(default = "d_ai_player")]
    pub ai_player: String,
    /// Opponent kind: "random" or "mcts"
    #[serde(default = "d_opponent")]
    pub opponent: String,
    /// Iteration budget when the opponent is also a search
    #[serde(default = "d_opponent_iterations")]
    pub opponent_iterations: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: defaults::games(),
            seed: defaults::seed(),
            ai_player: defaults::ai_player().into(),
            opponent: defaults::opponent().into(),
            opponent_iterations: defaults::opponent_iterations(),
        }
    }
}
