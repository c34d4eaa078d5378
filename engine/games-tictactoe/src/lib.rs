//! TicTacToe game implementation for the engine
//!
//! This crate provides the reference 3x3 game used to exercise the search:
//! board state, legal move generation and the transition function with
//! win/draw/illegal-move classification.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::{Game, Outcome, Player};
//! use games_tictactoe::TicTacToe;
//!
//! let game = TicTacToe::new();
//! let state = game.play(&[0, 4, 1, 7, 2]).unwrap();
//! assert_eq!(state.outcome(), Outcome::Win(Player::A));
//! ```

use engine_core::{ActionId, Game, GameError, GameMetadata, Outcome, Player, Transition};
use std::fmt;

/// Board side length
pub const BOARD_SIZE: usize = 3;

/// Number of cells (and actions)
pub const NUM_CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// Winning positions (rows, columns, diagonals)
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Content of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Taken(Player),
}

impl Cell {
    #[inline]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// TicTacToe game state
///
/// The state is `Copy`: every transition produces a fresh value, so tree
/// nodes and rollouts never observe each other's boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct State {
    /// Row-major board
    board: [Cell; NUM_CELLS],
    /// Player to move (or the player who moved last, once terminal)
    active_player: Player,
    /// Terminal classification; the terminal flag is derived from it
    outcome: Outcome,
}

impl State {
    /// Create a new initial game state with A to move
    pub fn new() -> Self {
        Self::starting_with(Player::A)
    }

    /// Empty board with the given player to move
    pub fn starting_with(player: Player) -> Self {
        Self {
            board: [Cell::Empty; NUM_CELLS],
            active_player: player,
            outcome: Outcome::InProgress,
        }
    }

    /// Build a state from an arbitrary board, classifying it as won, drawn or running.
    ///
    /// Useful for setting up positions in tests and analysis tools.
    pub fn from_cells(board: [Cell; NUM_CELLS], active_player: Player) -> Self {
        let outcome = if Self::has_line(&board, Player::A) {
            Outcome::Win(Player::A)
        } else if Self::has_line(&board, Player::B) {
            Outcome::Win(Player::B)
        } else if board.iter().all(|cell| !cell.is_empty()) {
            Outcome::Draw
        } else {
            Outcome::InProgress
        };

        Self {
            board,
            active_player,
            outcome,
        }
    }

    /// Board cells in row-major order
    pub fn board(&self) -> &[Cell; NUM_CELLS] {
        &self.board
    }

    /// Cell at the given index, `None` if out of range
    pub fn cell(&self, action: ActionId) -> Option<Cell> {
        self.board.get(action).copied()
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Check if the game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Number of marks on the board
    pub fn occupied_count(&self) -> usize {
        self.board.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Empty cell indices in row-major order.
    ///
    /// Only the board is consulted: the list is empty exactly when the board is full.
    pub fn legal_actions(&self) -> Vec<ActionId> {
        self.board
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Apply a move and return the derived state.
    ///
    /// Placing on an occupied cell is not an error: it ends the game with
    /// `Outcome::IllegalMove`, and the offender stays the active player.
    pub fn apply(&self, action: ActionId) -> Result<Transition<State>, GameError> {
        if action >= NUM_CELLS {
            return Err(GameError::InvalidActionIndex {
                action,
                num_actions: NUM_CELLS,
            });
        }
        if self.is_terminal() {
            return Err(GameError::GameOver {
                outcome: self.outcome,
            });
        }

        let mover = self.active_player;
        let mut next = *self;

        if !self.board[action].is_empty() {
            next.outcome = Outcome::IllegalMove;
            return Ok(Transition {
                state: next,
                outcome: Outcome::IllegalMove,
                mover,
            });
        }

        next.board[action] = Cell::Taken(mover);
        next.outcome = if Self::has_line(&next.board, mover) {
            Outcome::Win(mover)
        } else if next.board.iter().all(|cell| !cell.is_empty()) {
            Outcome::Draw
        } else {
            next.active_player = mover.other();
            Outcome::InProgress
        };

        Ok(Transition {
            state: next,
            outcome: next.outcome,
            mover,
        })
    }

    /// Check whether `player` owns all three cells of any line
    fn has_line(board: &[Cell; NUM_CELLS], player: Player) -> bool {
        let mark = Cell::Taken(player);
        LINES
            .iter()
            .any(|line| line.iter().all(|&pos| board[pos] == mark))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            let cells: Vec<String> = (0..BOARD_SIZE)
                .map(|col| match self.board[row * BOARD_SIZE + col] {
                    Cell::Empty => ".".to_string(),
                    Cell::Taken(Player::A) => "X".to_string(),
                    Cell::Taken(Player::B) => "O".to_string(),
                })
                .collect();
            write!(f, "{}", cells.join(" | "))?;
            if row + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// TicTacToe game implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    /// Create a new TicTacToe game
    pub fn new() -> Self {
        Self
    }

    /// Play a sequence of actions from the initial state.
    ///
    /// Stops with an error if an action is applied after the game ended.
    pub fn play(&self, actions: &[ActionId]) -> Result<State, GameError> {
        actions
            .iter()
            .try_fold(State::new(), |state, &action| {
                state.apply(action).map(|t| t.state)
            })
    }
}

impl Game for TicTacToe {
    type State = State;

    fn metadata(&self) -> GameMetadata {
        GameMetadata::new("tictactoe", "Tic-Tac-Toe")
            .with_board(BOARD_SIZE, BOARD_SIZE)
            .with_actions(NUM_CELLS)
            .with_players(vec!["X".to_string(), "O".to_string()], vec!['X', 'O'])
            .with_description("Get three in a row to win!")
    }

    fn num_actions(&self) -> usize {
        NUM_CELLS
    }

    fn initial_state(&self) -> Self::State {
        State::new()
    }

    fn active_player(&self, state: &Self::State) -> Player {
        state.active_player()
    }

    fn outcome(&self, state: &Self::State) -> Outcome {
        state.outcome()
    }

    fn legal_actions(&self, state: &Self::State) -> Vec<ActionId> {
        state.legal_actions()
    }

    fn apply_action(
        &self,
        state: &Self::State,
        action: ActionId,
    ) -> Result<Transition<Self::State>, GameError> {
        state.apply(action)
    }

    fn validate_action(&self, state: &Self::State, action: ActionId) -> Result<(), GameError> {
        if action >= NUM_CELLS {
            return Err(GameError::InvalidActionIndex {
                action,
                num_actions: NUM_CELLS,
            });
        }
        if state.is_terminal() {
            return Err(GameError::GameOver {
                outcome: state.outcome(),
            });
        }
        if !state.board[action].is_empty() {
            return Err(GameError::CellOccupied { action });
        }
        Ok(())
    }
}
