//! Caller-side turn policy: insert, check for a win, and only then hand the
//! move to the other player.

use tracing::{info, warn};

use crate::error::MoveError;
use crate::game::{GameState, Player};

/// What a single move did to the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mover connected four; the turn stays with them.
    Won(Player),
    /// The grid filled up without a winner.
    Draw,
    /// Play passes to `next`.
    Continue { next: Player },
    /// The game was already decided; nothing was inserted.
    AlreadyWon,
}

/// Play one move for the current player.
///
/// A rejected column leaves the game untouched so the same player can pick
/// again.
pub fn play_move(state: &mut GameState, column: usize) -> Result<MoveOutcome, MoveError> {
    if state.win() {
        warn!(column, "move after the game was won");
        return Ok(MoveOutcome::AlreadyWon);
    }

    state.insert(column)?;

    if state.win() {
        let winner = state.current_player().clone();
        info!(winner = %winner, turn = state.turn_count(), "game won");
        return Ok(MoveOutcome::Won(winner));
    }
    if state.board().is_full() {
        info!(turn = state.turn_count(), "board full, game drawn");
        return Ok(MoveOutcome::Draw);
    }

    state.next_turn();
    Ok(MoveOutcome::Continue {
        next: state.current_player().clone(),
    })
}
