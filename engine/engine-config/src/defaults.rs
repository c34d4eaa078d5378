//! Default configuration values loaded from config.defaults.toml.
//!
//! The workspace-level defaults file is embedded at compile time, so the
//! binary and the documentation ship the same values.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    mcts: MctsDefaults,
    rewards: RewardsDefaults,
    arena: ArenaDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    iterations: u32,
    exploration_constant: f64,
    time_limit_ms: u64,
    workers: usize,
}

#[derive(Debug, Deserialize)]
struct RewardsDefaults {
    win: f64,
    loss: f64,
    draw: f64,
    illegal_move: f64,
}

#[derive(Debug, Deserialize)]
struct ArenaDefaults {
    games: u32,
    seed: u64,
    ai_player: String,
    opponent: String,
    opponent_iterations: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// MCTS
pub fn iterations() -> u32 {
    DEFAULTS.mcts.iterations
}
pub fn exploration_constant() -> f64 {
    DEFAULTS.mcts.exploration_constant
}
pub fn time_limit_ms() -> u64 {
    DEFAULTS.mcts.time_limit_ms
}
pub fn workers() -> usize {
    DEFAULTS.mcts.workers
}

// Rewards
pub fn win_reward() -> f64 {
    DEFAULTS.rewards.win
}
pub fn loss_reward() -> f64 {
    DEFAULTS.rewards.loss
}
pub fn draw_reward() -> f64 {
    DEFAULTS.rewards.draw
}
pub fn illegal_move_reward() -> f64 {
    DEFAULTS.rewards.illegal_move
}

// Arena
pub fn games() -> u32 {
    DEFAULTS.arena.games
}
pub fn seed() -> u64 {
    DEFAULTS.arena.seed
}
pub fn ai_player() -> &'static str {
    &DEFAULTS.arena.ai_player
}
pub fn opponent() -> &'static str {
    &DEFAULTS.arena.opponent
}
pub fn opponent_iterations() -> u32 {
    DEFAULTS.arena.opponent_iterations
}
