//! MCTS configuration parameters.

use engine_core::RewardScheme;
use std::time::Duration;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate iterations per decision.
    pub iterations: u32,

    /// Exploration constant for the UCB1 formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    /// 1.4 is close to sqrt(2), the textbook UCB1 constant.
    pub exploration_constant: f64,

    /// How terminal outcomes are scored for the root player.
    pub rewards: RewardScheme,

    /// Optional wall-clock budget. When it runs out the loop stops early and the
    /// best child is extracted from the statistics gathered so far.
    pub time_limit: Option<Duration>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self::for_interactive()
    }
}

impl MctsConfig {
    /// Create config for interactive play (1000 iterations, no deadline).
    pub fn for_interactive() -> Self {
        Self {
            iterations: 1000,
            exploration_constant: 1.4,
            rewards: RewardScheme::default(),
            time_limit: None,
        }
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 100,
            ..Self::for_interactive()
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the reward scheme.
    pub fn with_rewards(mut self, rewards: RewardScheme) -> Self {
        self.rewards = rewards;
        self
    }

    /// Builder pattern: set a wall-clock deadline.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.iterations, 1000);
        assert!((config.exploration_constant - 1.4).abs() < 1e-9);
        assert_eq!(config.rewards, RewardScheme::default());
        assert!(config.time_limit.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_iterations(100)
            .with_exploration_constant(2.0)
            .with_time_limit(Duration::from_millis(50));

        assert_eq!(config.iterations, 100);
        assert!((config.exploration_constant - 2.0).abs() < 1e-9);
        assert_eq!(config.time_limit, Some(Duration::from_millis(50)));
    }

    #[test]
    fn test_testing_config() {
        let config = MctsConfig::for_testing();
        assert_eq!(config.iterations, 100);
        assert!((config.exploration_constant - 1.4).abs() < 1e-9);
    }
}
