//! Match statistics tracking and persistence.
//!
//! Results are counted from the search player's point of view and can be
//! written to a JSON file when the run finishes.

use anyhow::{Context, Result};
use engine_core::{Outcome, Player};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// How a single match ended for the search player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    AiWin,
    AiLoss,
    Draw,
    /// Ended on an illegal move; `ai_fault` is true when the search made it
    Illegal { ai_fault: bool },
}

impl MatchResult {
    /// Classify a terminal outcome. `last_mover` is the player who made the
    /// final move, needed to attribute illegal moves.
    pub fn classify(outcome: Outcome, ai_player: Player, last_mover: Player) -> Option<Self> {
        match outcome {
            Outcome::InProgress => None,
            Outcome::Win(winner) if winner == ai_player => Some(MatchResult::AiWin),
            Outcome::Win(_) => Some(MatchResult::AiLoss),
            Outcome::Draw => Some(MatchResult::Draw),
            Outcome::IllegalMove => Some(MatchResult::Illegal {
                ai_fault: last_mover == ai_player,
            }),
        }
    }
}

/// Aggregated results over a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub games: u32,
    pub ai_wins: u32,
    pub ai_losses: u32,
    pub draws: u32,
    pub illegal: u32,
    /// Moves played across all matches
    pub total_moves: u64,
    /// Opponent proposals rejected by move validation
    pub rejected_moves: u64,
    /// MCTS searches run by the search player
    pub searches: u32,
    /// Mean search time in milliseconds
    pub avg_search_ms: f64,
}

impl MatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished match.
    pub fn record(&mut self, result: MatchResult, moves: u32, rejected: u32) {
        self.games += 1;
        self.total_moves += u64::from(moves);
        self.rejected_moves += u64::from(rejected);
        match result {
            MatchResult::AiWin => self.ai_wins += 1,
            MatchResult::AiLoss => self.ai_losses += 1,
            MatchResult::Draw => self.draws += 1,
            MatchResult::Illegal { .. } => self.illegal += 1,
        }
    }

    /// Share of matches the search player did not lose
    pub fn non_loss_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            (self.ai_wins + self.draws) as f64 / self.games as f64
        }
    }

    pub fn avg_moves(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.games as f64
        }
    }

    /// Write stats to a JSON file (write-then-rename).
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize match stats")?;

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).with_context(|| {
            format!("Failed to create temp stats file {}", temp_path.display())
        })?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        drop(file);

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e)
                .with_context(|| format!("Failed to rename stats file to {}", path.display()));
        }

        debug!("Wrote match stats to {}", path.display());
        Ok(())
    }
}

impl fmt::Display for MatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "games:       {}", self.games)?;
        writeln!(f, "AI wins:     {}", self.ai_wins)?;
        writeln!(f, "AI losses:   {}", self.ai_losses)?;
        writeln!(f, "draws:       {}", self.draws)?;
        writeln!(f, "illegal:     {}", self.illegal)?;
        writeln!(f, "avg moves:   {:.1}", self.avg_moves())?;
        writeln!(f, "rejected:    {}", self.rejected_moves)?;
        write!(
            f,
            "non-loss:    {:.1}% ({} searches, {:.2} ms avg)",
            self.non_loss_rate() * 100.0,
            self.searches,
            self.avg_search_ms
        )
    }
}
