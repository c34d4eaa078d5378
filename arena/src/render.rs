//! Text rendering of boards and match results
//!
//! Symbols, names and board dimensions all come from the game's
//! `GameMetadata`, so nothing here knows tic-tac-toe's constants.

use engine_core::{GameMetadata, Player};
use games_tictactoe::{Cell, State};

use crate::stats::MatchResult;

const EMPTY_SYMBOL: char = '.';

/// Render `state` as rows of `|`-separated cells.
pub fn render_board(state: &State, meta: &GameMetadata) -> String {
    let mut out = String::with_capacity(meta.board_size() * 4);

    for row in 0..meta.board_height {
        if row > 0 {
            out.push('\n');
        }
        let cells: Vec<String> = (0..meta.board_width)
            .map(|col| {
                let symbol = match meta.action_at(row, col).and_then(|a| state.cell(a)) {
                    Some(Cell::Taken(player)) => meta.symbol(player),
                    _ => EMPTY_SYMBOL,
                };
                symbol.to_string()
            })
            .collect();
        out.push_str(&cells.join(" | "));
    }

    out
}

/// End-of-match banner naming the players through the metadata.
pub fn banner(result: MatchResult, ai_player: Player, meta: &GameMetadata) -> String {
    let ai = meta.player_name(ai_player);
    let opponent = meta.player_name(ai_player.other());
    match result {
        MatchResult::AiWin => format!("{} (AI) wins!", ai),
        MatchResult::AiLoss => format!("{} (opponent) wins!", opponent),
        MatchResult::Draw => "Draw!".to_string(),
        MatchResult::Illegal { ai_fault: true } => format!("Invalid move by {} (AI)!", ai),
        MatchResult::Illegal { ai_fault: false } => {
            format!("Invalid move by {} (opponent)!", opponent)
        }
    }
}
