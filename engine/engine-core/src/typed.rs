//! Typed Game trait providing the transition function used by search
//!
//! Games work with strongly-typed state while the search only ever sees
//! `ActionId` indices, outcomes, and opaque cloned states.

use crate::metadata::GameMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a discrete action (for board games, the cell index in row-major order)
pub type ActionId = usize;

/// One of the two sides of a two-player game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// The opposing side
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Zero-based index (A = 0, B = 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::A => write!(f, "A"),
            Player::B => write!(f, "B"),
        }
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Player::A),
            "B" | "b" => Ok(Player::B),
            other => Err(format!("unknown player '{}', expected A or B", other)),
        }
    }
}

/// Classification of a game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game still running
    InProgress,
    /// The given player completed a line
    Win(Player),
    /// Board full, nobody won
    Draw,
    /// A move targeted an occupied cell; the episode ended as a loss for the mover
    IllegalMove,
}

impl Outcome {
    /// `true` for every outcome except `InProgress`
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Win(player) => write!(f, "{} wins", player),
            Outcome::Draw => write!(f, "draw"),
            Outcome::IllegalMove => write!(f, "illegal move"),
        }
    }
}

/// Result of applying one action
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    /// The derived state (the input state is never touched)
    pub state: S,
    /// Outcome of the derived state
    pub outcome: Outcome,
    /// Player who made the move
    pub mover: Player,
}

/// Errors raised by the transition function
///
/// `GameOver` and `CellOccupied` are illegal moves under the game rules.
/// `InvalidActionIndex` is a caller contract violation and is never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Game is already over ({outcome}); no further moves are permitted")]
    GameOver { outcome: Outcome },
    #[error("Cell {action} is already occupied")]
    CellOccupied { action: ActionId },
    #[error("Action index {action} is out of range, expected 0..{num_actions}")]
    InvalidActionIndex {
        action: ActionId,
        num_actions: usize,
    },
}

impl GameError {
    /// Whether this error is an illegal move (as opposed to a contract violation)
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            GameError::GameOver { .. } | GameError::CellOccupied { .. }
        )
    }
}

/// Main trait for game implementations
///
/// The search clones states freely, so `State` should be cheap to copy.
/// Implementations must be deterministic: the same state and action always
/// produce the same transition.
///
/// # Example
///
/// ```rust
/// # use engine_core::*;
/// #[derive(Debug)]
/// struct Countdown;
///
/// impl Game for Countdown {
///     type State = (u8, Player);
///
///     fn metadata(&self) -> GameMetadata {
///         GameMetadata::new("countdown", "Countdown").with_actions(2)
///     }
///     fn num_actions(&self) -> usize { 2 }
///     fn initial_state(&self) -> Self::State { (3, Player::A) }
///     fn active_player(&self, state: &Self::State) -> Player { state.1 }
///     fn outcome(&self, state: &Self::State) -> Outcome {
///         if state.0 == 0 { Outcome::Win(state.1.other()) } else { Outcome::InProgress }
///     }
///     fn legal_actions(&self, state: &Self::State) -> Vec<ActionId> {
///         (0..state.0.min(2) as usize).collect()
///     }
///     fn apply_action(
///         &self,
///         state: &Self::State,
///         action: ActionId,
///     ) -> Result<Transition<Self::State>, GameError> {
///         self.validate_action(state, action)?;
///         let next = (state.0 - 1 - action as u8, state.1.other());
///         Ok(Transition { state: next, outcome: self.outcome(&next), mover: state.1 })
///     }
/// }
///
/// let game = Countdown;
/// let t = game.apply_action(&game.initial_state(), 1).unwrap();
/// assert_eq!(t.state.0, 1);
/// ```
pub trait Game: Send + Sync + std::fmt::Debug + 'static {
    /// Game state type - copied whenever a new state is derived
    type State: Clone + Send + Sync + std::fmt::Debug + 'static;

    /// Get game metadata for presentation layers
    fn metadata(&self) -> GameMetadata;

    /// Size of the discrete action space; valid actions are `0..num_actions()`
    fn num_actions(&self) -> usize;

    /// Fresh state at game start
    fn initial_state(&self) -> Self::State;

    /// Player whose turn it is
    fn active_player(&self, state: &Self::State) -> Player;

    /// Current classification of the state
    fn outcome(&self, state: &Self::State) -> Outcome;

    /// Legal actions in a fixed deterministic order
    fn legal_actions(&self, state: &Self::State) -> Vec<ActionId>;

    /// Apply an action and return the derived state
    ///
    /// # Errors
    ///
    /// * `GameError::InvalidActionIndex` if `action >= num_actions()`
    /// * `GameError::GameOver` if `state` is already terminal
    fn apply_action(
        &self,
        state: &Self::State,
        action: ActionId,
    ) -> Result<Transition<Self::State>, GameError>;

    /// Check whether the game has ended
    fn is_terminal(&self, state: &Self::State) -> bool {
        self.outcome(state).is_terminal()
    }

    /// Pre-flight check used by callers that must not trigger rule penalties
    /// (for example a user clicking a cell). The default only checks the index
    /// range and terminal status; games with occupancy rules should extend it.
    fn validate_action(&self, state: &Self::State, action: ActionId) -> Result<(), GameError> {
        if action >= self.num_actions() {
            return Err(GameError::InvalidActionIndex {
                action,
                num_actions: self.num_actions(),
            });
        }
        let outcome = self.outcome(state);
        if outcome.is_terminal() {
            return Err(GameError::GameOver { outcome });
        }
        Ok(())
    }
}
