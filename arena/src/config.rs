//! Configuration for the arena
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use engine_config::{load_config, CentralConfig};
use engine_core::{Player, RewardScheme};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_games() -> u32 {
    CENTRAL_CONFIG.arena.games
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.arena.seed
}

fn default_ai_player() -> String {
    CENTRAL_CONFIG.arena.ai_player.clone()
}

fn default_opponent() -> String {
    CENTRAL_CONFIG.arena.opponent.clone()
}

fn default_opponent_iterations() -> u32 {
    CENTRAL_CONFIG.arena.opponent_iterations
}

fn default_iterations() -> u32 {
    CENTRAL_CONFIG.mcts.iterations
}

fn default_exploration_constant() -> f64 {
    CENTRAL_CONFIG.mcts.exploration_constant
}

fn default_time_limit_ms() -> u64 {
    CENTRAL_CONFIG.mcts.time_limit_ms
}

fn default_workers() -> usize {
    CENTRAL_CONFIG.mcts.workers
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_rewards() -> RewardScheme {
    let rewards = &CENTRAL_CONFIG.rewards;
    RewardScheme {
        win: rewards.win,
        loss: rewards.loss,
        draw: rewards.draw,
        illegal_move: rewards.illegal_move,
    }
}

/// Who the search plays against
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentKind {
    /// Picks any cell at random, occupied or not
    Random,
    /// A second, usually weaker, MCTS player
    Mcts,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Noughts arena - MCTS versus an opponent policy")]
#[command(
    long_about = "Plays a series of tic-tac-toe matches between the MCTS player and an
opponent, alternating who moves first, and prints the results.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of matches to play
    #[arg(long, default_value_t = default_games())]
    pub games: u32,

    /// Base random seed
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Side played by the search (A or B)
    #[arg(long, default_value_t = default_ai_player())]
    pub ai_player: String,

    /// Opponent policy (random or mcts)
    #[arg(long, default_value_t = default_opponent())]
    pub opponent: String,

    /// MCTS iterations per move for the opponent when it is a search
    #[arg(long, default_value_t = default_opponent_iterations())]
    pub opponent_iterations: u32,

    /// MCTS iterations per move
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// UCB1 exploration constant
    #[arg(long, default_value_t = default_exploration_constant())]
    pub exploration_constant: f64,

    /// Time budget per move in milliseconds (0 for none)
    #[arg(long, default_value_t = default_time_limit_ms())]
    pub time_limit_ms: u64,

    /// Root-parallel search workers (1 for single-threaded)
    #[arg(long, default_value_t = default_workers())]
    pub workers: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Write a JSON summary of the results to this path
    #[arg(long)]
    pub stats_path: Option<String>,

    /// Outcome rewards, only settable through config.toml or the environment
    #[arg(skip = default_rewards())]
    pub rewards: RewardScheme,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.workers == 0 {
            return Err(anyhow!("workers must be greater than 0"));
        }

        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(anyhow!(
                "exploration_constant must be a non-negative number, got {}",
                self.exploration_constant
            ));
        }

        self.ai_player()?;
        self.opponent_kind()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    /// Side played by the search
    pub fn ai_player(&self) -> Result<Player> {
        self.ai_player
            .parse()
            .map_err(|e| anyhow!("invalid ai_player: {}", e))
    }

    pub fn opponent_kind(&self) -> Result<OpponentKind> {
        OpponentKind::from_str(&self.opponent, true).map_err(|_| {
            anyhow!(
                "invalid opponent '{}', expected random or mcts",
                self.opponent
            )
        })
    }

    pub fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }

    /// Search settings for the arena's MCTS player
    pub fn mcts_config(&self) -> MctsConfig {
        let config = MctsConfig::for_interactive()
            .with_iterations(self.iterations)
            .with_exploration_constant(self.exploration_constant)
            .with_rewards(self.rewards);
        match self.time_limit() {
            Some(limit) => config.with_time_limit(limit),
            None => config,
        }
    }

    /// Search settings for an MCTS opponent
    pub fn opponent_mcts_config(&self) -> MctsConfig {
        self.mcts_config().with_iterations(self.opponent_iterations)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn base_config() -> Config {
        Config {
            games: 2,
            seed: 7,
            ai_player: "A".into(),
            opponent: "random".into(),
            opponent_iterations: 20,
            iterations: 100,
            exploration_constant: 1.4,
            time_limit_ms: 0,
            workers: 1,
            log_level: "info".into(),
            stats_path: None,
            rewards: RewardScheme::default(),
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_games() {
        let mut cfg = base_config();
        cfg.games = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("games"));
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let mut cfg = base_config();
        cfg.workers = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn validate_rejects_negative_exploration() {
        let mut cfg = base_config();
        cfg.exploration_constant = -0.5;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("exploration_constant"));

        cfg.exploration_constant = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_player() {
        let mut cfg = base_config();
        cfg.ai_player = "C".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("ai_player"));
    }

    #[test]
    fn validate_rejects_unknown_opponent() {
        let mut cfg = base_config();
        cfg.opponent = "human".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid opponent"));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn opponent_kind_is_case_insensitive() {
        let mut cfg = base_config();
        cfg.opponent = "MCTS".into();
        assert_eq!(cfg.opponent_kind().unwrap(), OpponentKind::Mcts);
    }

    #[test]
    fn zero_time_limit_means_none() {
        let mut cfg = base_config();
        assert_eq!(cfg.time_limit(), None);
        assert!(cfg.mcts_config().time_limit.is_none());

        cfg.time_limit_ms = 250;
        assert_eq!(cfg.time_limit(), Some(Duration::from_millis(250)));
        assert_eq!(cfg.mcts_config().time_limit, Some(Duration::from_millis(250)));
    }

    #[test]
    fn mcts_config_carries_cli_values() {
        let mut cfg = base_config();
        cfg.rewards = RewardScheme::symmetric();
        let mcts = cfg.mcts_config();
        assert_eq!(mcts.iterations, 100);
        assert!((mcts.exploration_constant - 1.4).abs() < 1e-9);
        assert_eq!(mcts.rewards, RewardScheme::symmetric());

        let opponent = cfg.opponent_mcts_config();
        assert_eq!(opponent.iterations, 20);
        assert_eq!(opponent.rewards, RewardScheme::symmetric());
    }

    #[test]
    fn cli_overrides_defaults() {
        let cfg = Config::try_parse_from([
            "arena",
            "--games",
            "3",
            "--opponent",
            "mcts",
            "--ai-player",
            "B",
        ])
        .unwrap();
        assert_eq!(cfg.games, 3);
        assert_eq!(cfg.opponent_kind().unwrap(), OpponentKind::Mcts);
        assert_eq!(cfg.ai_player().unwrap(), Player::B);
    }
}
