//! Match runner: the MCTS player against an opponent policy

use anyhow::{anyhow, bail, Result};
use engine_core::{ActionId, Game, GameMetadata, Player};
use games_tictactoe::{State, TicTacToe};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{Config, OpponentKind};
use crate::policy::{MctsPolicy, Policy, RandomPolicy};
use crate::render::{banner, render_board};
use crate::stats::{MatchResult, MatchStats};

/// Proposals an opponent may make for a single move before the match is aborted
const MAX_ATTEMPTS: u32 = 1000;

/// Everything that happened in one match
#[derive(Debug, Clone)]
pub struct MatchRecord {
    /// Player who moved first
    pub first: Player,
    /// Accepted moves in order
    pub moves: Vec<ActionId>,
    /// Opponent proposals rejected by validation
    pub rejected: u32,
    pub result: MatchResult,
    pub final_state: State,
}

pub struct Arena {
    config: Config,
    game: TicTacToe,
    metadata: GameMetadata,
    ai_player: Player,
    ai: MctsPolicy,
    opponent: Box<dyn Policy<TicTacToe>>,
    stats: MatchStats,
}

impl Arena {
    pub fn new(config: Config) -> Result<Self> {
        let ai_player = config.ai_player()?;

        let ai = MctsPolicy::with_seed(config.mcts_config(), config.seed).with_workers(config.workers);

        let opponent_seed = config.seed.wrapping_add(1);
        let opponent: Box<dyn Policy<TicTacToe>> = match config.opponent_kind()? {
            OpponentKind::Random => Box::new(RandomPolicy::with_seed(opponent_seed)),
            OpponentKind::Mcts => Box::new(MctsPolicy::with_seed(
                config.opponent_mcts_config(),
                opponent_seed,
            )),
        };

        let game = TicTacToe::new();
        let metadata = game.metadata();

        info!(
            game = %metadata.display_name,
            ai_player = %metadata.player_name(ai_player),
            opponent = opponent.name(),
            iterations = config.iterations,
            workers = config.workers,
            "Arena initialized"
        );

        Ok(Self {
            config,
            game,
            metadata,
            ai_player,
            ai,
            opponent,
            stats: MatchStats::new(),
        })
    }

    /// Play every configured match and return the totals.
    pub fn run(&mut self) -> Result<&MatchStats> {
        let start = Instant::now();

        for index in 0..self.config.games {
            let record = self.play_match(index)?;
            self.stats
                .record(record.result, record.moves.len() as u32, record.rejected);

            info!(
                game = index + 1,
                first = %self.metadata.player_name(record.first),
                moves = record.moves.len(),
                rejected = record.rejected,
                "{}\n{}",
                banner(record.result, self.ai_player, &self.metadata),
                render_board(&record.final_state, &self.metadata)
            );
        }

        let summary = self.ai.summary();
        self.stats.searches = summary.searches;
        self.stats.avg_search_ms = summary.avg_ms();
        if summary.truncated > 0 {
            warn!(
                truncated = summary.truncated,
                searches = summary.searches,
                "Some searches hit the time limit before their iteration budget"
            );
        }

        info!(
            games = self.stats.games,
            search_iterations = summary.iterations,
            ai_wins = self.stats.ai_wins,
            ai_losses = self.stats.ai_losses,
            draws = self.stats.draws,
            elapsed_secs = start.elapsed().as_secs_f64(),
            "Arena finished"
        );

        Ok(&self.stats)
    }

    /// Play one match. Even-numbered matches start with player A, odd ones
    /// with player B.
    pub fn play_match(&mut self, index: u32) -> Result<MatchRecord> {
        let first = if index % 2 == 0 { Player::A } else { Player::B };
        let mut state = State::starting_with(first);
        let mut moves = Vec::with_capacity(self.metadata.num_actions);
        let mut rejected = 0;

        debug!(
            game = index + 1,
            first = %self.metadata.player_name(first),
            "Starting match"
        );

        loop {
            let mover = self.game.active_player(&state);
            let action = if mover == self.ai_player {
                let action = self.ai.select_action(&self.game, &state)?;
                self.game
                    .validate_action(&state, action)
                    .map_err(|e| anyhow!("search proposed an invalid move: {}", e))?;
                action
            } else {
                let (action, attempts) = self.request_move(&state)?;
                rejected += attempts;
                action
            };

            let transition = self.game.apply_action(&state, action)?;
            moves.push(action);
            debug!(
                player = %self.metadata.player_name(mover),
                action,
                ply = moves.len(),
                "Move played\n{}",
                render_board(&transition.state, &self.metadata)
            );

            state = transition.state;
            if let Some(result) =
                MatchResult::classify(transition.outcome, self.ai_player, mover)
            {
                return Ok(MatchRecord {
                    first,
                    moves,
                    rejected,
                    result,
                    final_state: state,
                });
            }
        }
    }

    /// Ask the opponent for a move until it proposes a legal one.
    ///
    /// Returns the accepted action and how many proposals were rejected.
    fn request_move(&mut self, state: &State) -> Result<(ActionId, u32)> {
        for attempt in 0..MAX_ATTEMPTS {
            let action = self.opponent.select_action(&self.game, state)?;
            match self.game.validate_action(state, action) {
                Ok(()) => return Ok((action, attempt)),
                Err(e) => debug!(action, attempt, "Rejected opponent move: {}", e),
            }
        }
        bail!(
            "{} opponent made no legal move in {} attempts",
            self.opponent.name(),
            MAX_ATTEMPTS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::base_config;
    use engine_core::Outcome;

    /// Plays a fixed list of actions in order, repeating the last one forever
    struct Scripted {
        actions: Vec<ActionId>,
        next: usize,
    }

    impl Scripted {
        fn new(actions: Vec<ActionId>) -> Self {
            Self { actions, next: 0 }
        }
    }

    impl Arena {
        fn with_opponent(mut self, opponent: Box<dyn Policy<TicTacToe>>) -> Self {
            self.opponent = opponent;
            self
        }
    }

    impl Policy<TicTacToe> for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn select_action(&mut self, _game: &TicTacToe, _state: &State) -> Result<ActionId> {
            let action = self.actions[self.next.min(self.actions.len() - 1)];
            self.next += 1;
            Ok(action)
        }
    }

    #[test]
    fn test_run_counts_every_game() {
        let mut config = base_config();
        config.games = 4;
        let mut arena = Arena::new(config).unwrap();

        let stats = arena.run().unwrap().clone();
        assert_eq!(stats.games, 4);
        assert_eq!(stats.ai_wins + stats.ai_losses + stats.draws + stats.illegal, 4);
        assert_eq!(stats.illegal, 0);
        assert!(stats.searches > 0);
        assert!(stats.total_moves >= 4 * 5);
    }

    #[test]
    fn test_final_board_renders_with_metadata_symbols() {
        let mut arena = Arena::new(base_config()).unwrap();
        let record = arena.play_match(0).unwrap();

        let board = render_board(&record.final_state, &arena.metadata);
        let x = board.matches('X').count();
        let o = board.matches('O').count();
        assert_eq!(x + o, record.moves.len());
        assert!(!board.contains('A') && !board.contains('B'));
        // A moved first in match 0
        assert!(x == o || x == o + 1);
    }

    #[test]
    fn test_first_player_alternates() {
        let mut arena = Arena::new(base_config()).unwrap();

        let first = arena.play_match(0).unwrap();
        let second = arena.play_match(1).unwrap();
        assert_eq!(first.first, Player::A);
        assert_eq!(second.first, Player::B);
    }

    #[test]
    fn test_matches_are_deterministic() {
        let mut a = Arena::new(base_config()).unwrap();
        let mut b = Arena::new(base_config()).unwrap();

        for index in 0..2 {
            let ra = a.play_match(index).unwrap();
            let rb = b.play_match(index).unwrap();
            assert_eq!(ra.moves, rb.moves);
            assert_eq!(ra.result, rb.result);
        }
    }

    #[test]
    fn test_occupied_cells_are_rejected_and_reasked() {
        // The script asks for the centre twice, so at least one request hits
        // an occupied cell
        let mut config = base_config();
        config.iterations = 500;
        let mut arena = Arena::new(config)
            .unwrap()
            .with_opponent(Box::new(Scripted::new(vec![4, 4, 0, 4, 2, 6, 8, 1, 3, 5, 7])));

        let record = arena.play_match(0).unwrap();
        assert!(record.rejected >= 1);
        assert_ne!(record.result, MatchResult::Illegal { ai_fault: false });
        assert_ne!(record.result, MatchResult::Illegal { ai_fault: true });

        // Every accepted move is distinct
        let mut seen = record.moves.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), record.moves.len());
        assert!(record.final_state.outcome().is_terminal());
        assert_ne!(record.final_state.outcome(), Outcome::IllegalMove);
    }

    #[test]
    fn test_opponent_without_legal_move_aborts() {
        let mut config = base_config();
        config.ai_player = "B".into();
        let mut arena = Arena::new(config)
            .unwrap()
            .with_opponent(Box::new(Scripted::new(vec![9])));

        let err = arena.play_match(0).unwrap_err();
        assert!(err.to_string().contains("no legal move"));
    }

    #[test]
    fn test_mcts_opponent() {
        let mut config = base_config();
        config.opponent = "mcts".into();
        config.games = 2;
        let mut arena = Arena::new(config).unwrap();

        let stats = arena.run().unwrap();
        assert_eq!(stats.games, 2);
        assert_eq!(stats.rejected_moves, 0);
    }
}
