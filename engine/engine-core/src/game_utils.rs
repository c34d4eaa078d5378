//! Shared utilities for two-player game implementations
//!
//! This module holds the reward convention consumed by the search so that
//! every game scores outcomes the same way.

use crate::typed::{Outcome, Player};
use serde::{Deserialize, Serialize};

/// Reward convention for scoring terminal outcomes from one player's perspective.
///
/// Losses are penalized much harder than wins are rewarded, which biases the
/// search toward safe, non-losing play.
///
/// # Example
/// ```
/// use engine_core::{Outcome, Player, RewardScheme};
///
/// let rewards = RewardScheme::default();
///
/// // Player A wins, viewed from player A's perspective
/// assert_eq!(rewards.score(Outcome::Win(Player::A), Player::A), 1.0);
///
/// // Player A wins, viewed from player B's perspective
/// assert_eq!(rewards.score(Outcome::Win(Player::A), Player::B), -10.0);
///
/// // Draw
/// assert_eq!(rewards.score(Outcome::Draw, Player::A), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardScheme {
    /// Reward when the perspective player wins
    pub win: f64,
    /// Reward when the opponent wins
    pub loss: f64,
    /// Reward for a draw
    pub draw: f64,
    /// Reward when the episode ends on an illegal move
    pub illegal_move: f64,
}

impl Default for RewardScheme {
    fn default() -> Self {
        Self {
            win: 1.0,
            loss: -10.0,
            draw: 0.0,
            illegal_move: -1.0,
        }
    }
}

impl RewardScheme {
    /// Symmetric zero-sum scheme (+1 / -1 / 0)
    pub fn symmetric() -> Self {
        Self {
            win: 1.0,
            loss: -1.0,
            draw: 0.0,
            illegal_move: -1.0,
        }
    }

    /// Score an outcome from `perspective`'s point of view.
    ///
    /// `InProgress` scores 0, same as a draw, so a truncated playout is neutral.
    #[inline]
    pub fn score(&self, outcome: Outcome, perspective: Player) -> f64 {
        match outcome {
            Outcome::InProgress => 0.0,
            Outcome::Win(winner) if winner == perspective => self.win,
            Outcome::Win(_) => self.loss,
            Outcome::Draw => self.draw,
            Outcome::IllegalMove => self.illegal_move,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme_is_asymmetric() {
        let rewards = RewardScheme::default();
        assert_eq!(rewards.win, 1.0);
        assert_eq!(rewards.loss, -10.0);
        assert_eq!(rewards.draw, 0.0);
        assert_eq!(rewards.illegal_move, -1.0);
    }

    #[test]
    fn test_score_win_and_loss() {
        let rewards = RewardScheme::default();
        assert_eq!(rewards.score(Outcome::Win(Player::B), Player::B), 1.0);
        assert_eq!(rewards.score(Outcome::Win(Player::B), Player::A), -10.0);
    }

    #[test]
    fn test_score_illegal_move_ignores_perspective() {
        let rewards = RewardScheme::default();
        assert_eq!(rewards.score(Outcome::IllegalMove, Player::A), -1.0);
        assert_eq!(rewards.score(Outcome::IllegalMove, Player::B), -1.0);
    }

    #[test]
    fn test_score_in_progress_is_neutral() {
        let rewards = RewardScheme::default();
        assert_eq!(rewards.score(Outcome::InProgress, Player::A), 0.0);
    }

    #[test]
    fn test_symmetric_scheme() {
        let rewards = RewardScheme::symmetric();
        assert_eq!(rewards.score(Outcome::Win(Player::A), Player::B), -1.0);
        assert_eq!(rewards.score(Outcome::Win(Player::A), Player::A), 1.0);
    }
}
