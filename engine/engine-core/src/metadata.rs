//! Game metadata for presentation layers and configuration
//!
//! Renderers and input handlers receive this struct explicitly instead of
//! reading module-level constants for board dimensions or player symbols.

use crate::typed::{ActionId, Player};
use serde::{Deserialize, Serialize};

/// Metadata about a game for display and input mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Environment identifier (e.g., "tictactoe")
    pub env_id: String,

    /// Human-readable display name (e.g., "Tic-Tac-Toe")
    pub display_name: String,

    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Number of possible actions
    pub num_actions: usize,

    /// Display names for each player, indexed by `Player::index()`
    pub player_names: Vec<String>,

    /// Single-character symbols for each player, indexed by `Player::index()`
    pub player_symbols: Vec<char>,

    /// Brief description of the game rules
    pub description: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(env_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            display_name: display_name.into(),
            board_width: 0,
            board_height: 0,
            num_actions: 0,
            player_names: vec!["Player A".to_string(), "Player B".to_string()],
            player_symbols: vec!['A', 'B'],
            description: String::new(),
        }
    }

    /// Builder method for board dimensions
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Builder method for action count
    pub fn with_actions(mut self, num_actions: usize) -> Self {
        self.num_actions = num_actions;
        self
    }

    /// Builder method for player information
    pub fn with_players(mut self, names: Vec<String>, symbols: Vec<char>) -> Self {
        self.player_names = names;
        self.player_symbols = symbols;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the total number of board cells
    pub fn board_size(&self) -> usize {
        self.board_width * self.board_height
    }

    /// Map a (row, col) board coordinate to its row-major action index.
    ///
    /// Returns `None` for coordinates outside the board.
    pub fn action_at(&self, row: usize, col: usize) -> Option<ActionId> {
        if row < self.board_height && col < self.board_width {
            Some(row * self.board_width + col)
        } else {
            None
        }
    }

    /// Display symbol for a player, falling back to the player letter
    pub fn symbol(&self, player: Player) -> char {
        self.player_symbols
            .get(player.index())
            .copied()
            .unwrap_or(match player {
                Player::A => 'A',
                Player::B => 'B',
            })
    }

    /// Display name for a player, falling back to the player letter
    pub fn player_name(&self, player: Player) -> String {
        self.player_names
            .get(player.index())
            .cloned()
            .unwrap_or_else(|| player.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tictactoe_meta() -> GameMetadata {
        GameMetadata::new("tictactoe", "Tic-Tac-Toe")
            .with_board(3, 3)
            .with_actions(9)
            .with_players(vec!["X".to_string(), "O".to_string()], vec!['X', 'O'])
            .with_description("Get three in a row to win!")
    }

    #[test]
    fn test_metadata_builder() {
        let meta = tictactoe_meta();

        assert_eq!(meta.env_id, "tictactoe");
        assert_eq!(meta.display_name, "Tic-Tac-Toe");
        assert_eq!(meta.board_width, 3);
        assert_eq!(meta.board_height, 3);
        assert_eq!(meta.num_actions, 9);
        assert_eq!(meta.player_names, vec!["X", "O"]);
        assert_eq!(meta.player_symbols, vec!['X', 'O']);
        assert_eq!(meta.description, "Get three in a row to win!");
    }

    #[test]
    fn test_board_size() {
        let meta = GameMetadata::new("test", "Test").with_board(7, 6);
        assert_eq!(meta.board_size(), 42);
    }

    #[test]
    fn test_action_at_maps_row_major() {
        let meta = tictactoe_meta();
        assert_eq!(meta.action_at(0, 0), Some(0));
        assert_eq!(meta.action_at(1, 1), Some(4));
        assert_eq!(meta.action_at(2, 2), Some(8));
        assert_eq!(meta.action_at(3, 0), None);
        assert_eq!(meta.action_at(0, 3), None);
    }

    #[test]
    fn test_player_symbols_and_names() {
        let meta = tictactoe_meta();
        assert_eq!(meta.symbol(Player::A), 'X');
        assert_eq!(meta.symbol(Player::B), 'O');
        assert_eq!(meta.player_name(Player::B), "O");

        let bare = GameMetadata::new("bare", "Bare").with_players(vec![], vec![]);
        assert_eq!(bare.symbol(Player::B), 'B');
        assert_eq!(bare.player_name(Player::A), "A");
    }
}
