//! Rollout policies for the simulation phase.
//!
//! A rollout plays a cloned state forward to the end of the game. The move
//! choice is pluggable so that tests can use deterministic policies and
//! stronger games can bias the playout.

use engine_core::{ActionId, Game, GameError, Outcome};
use rand::seq::SliceRandom;
use rand::Rng;

/// Chooses moves during a rollout.
pub trait RolloutPolicy: Send + Sync {
    /// Pick one of `legal_actions`, or `None` to end the rollout.
    ///
    /// `legal_actions` is never empty.
    fn choose<R: Rng + ?Sized>(&self, legal_actions: &[ActionId], rng: &mut R)
        -> Option<ActionId>;
}

/// Uniformly random playout, the classic MCTS default.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRandomRollout;

impl RolloutPolicy for UniformRandomRollout {
    fn choose<R: Rng + ?Sized>(
        &self,
        legal_actions: &[ActionId],
        rng: &mut R,
    ) -> Option<ActionId> {
        legal_actions.choose(rng).copied()
    }
}

/// Always plays the lowest legal action. Consumes no randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegalRollout;

impl RolloutPolicy for FirstLegalRollout {
    fn choose<R: Rng + ?Sized>(
        &self,
        legal_actions: &[ActionId],
        _rng: &mut R,
    ) -> Option<ActionId> {
        legal_actions.first().copied()
    }
}

/// Final outcome of one playout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolloutResult {
    pub outcome: Outcome,
    /// Moves played from the starting state
    pub depth: u32,
}

/// Play `state` forward with `policy` until the game ends.
///
/// A state that is still running but has no legal action left (or where the
/// policy declines to move) is scored as a draw. A move the game rejects as
/// illegal ends the playout with `Outcome::IllegalMove`. The input state is
/// cloned, never mutated.
pub fn simulate<G, P, R>(
    game: &G,
    policy: &P,
    state: &G::State,
    rng: &mut R,
) -> Result<RolloutResult, GameError>
where
    G: Game,
    P: RolloutPolicy,
    R: Rng + ?Sized,
{
    let mut current = state.clone();
    let mut depth = 0;

    loop {
        let outcome = game.outcome(&current);
        if outcome.is_terminal() {
            return Ok(RolloutResult { outcome, depth });
        }

        let legal = game.legal_actions(&current);
        if legal.is_empty() {
            break;
        }
        let Some(action) = policy.choose(&legal, rng) else {
            break;
        };

        current = match game.apply_action(&current, action) {
            Ok(transition) => transition.state,
            Err(e) if e.is_illegal_move() => {
                return Ok(RolloutResult {
                    outcome: Outcome::IllegalMove,
                    depth,
                })
            }
            Err(e) => return Err(e),
        };
        depth += 1;
    }

    Ok(RolloutResult {
        outcome: Outcome::Draw,
        depth,
    })
}
