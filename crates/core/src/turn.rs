//! Single-turn resolution.
//!
//! Effect order is fixed and load-bearing:
//!   1. Reject the move (out of bounds / wall) as a `Bump`.
//!   2. Move the player and resolve the destination cell.
//!   3. Advance every drone, unless the turn already ended in `Victory`.
//!   4. A drone on the player's cell forces health to 0 (`DroneContact`).
//!   5. Health at or below 0 turns the tag into `Defeat`.
//!   6. The turn counter increments by exactly 1, bumps included.

use rand_chacha::ChaCha8Rng;

use crate::hostile;
use crate::state::GameState;
use crate::types::{CellKind, DefeatCause, Direction, Pos, TurnOutcome};

/// Advances `state` by one turn. Panics if the run already finished; that
/// is a driver bug, not a recoverable condition.
pub fn step(state: &mut GameState, direction: Direction, rng: &mut ChaCha8Rng) -> TurnOutcome {
    assert!(state.outcome.is_none(), "step called on a finished run");

    let outcome = resolve(state, direction, rng);
    state.turns_taken += 1;
    if let Some(terminal) = outcome.terminal() {
        state.outcome = Some(terminal);
    }
    outcome
}

fn resolve(state: &mut GameState, direction: Direction, rng: &mut ChaCha8Rng) -> TurnOutcome {
    let (dy, dx) = direction.delta();
    let candidate = Pos { y: state.player.pos.y + dy, x: state.player.pos.x + dx };

    let mut outcome = if state.board.cell_at(candidate) == CellKind::Wall {
        TurnOutcome::Bump
    } else {
        state.player.pos = candidate;
        resolve_cell(state, candidate)
    };
    if outcome == TurnOutcome::Victory {
        // The run is over; drones never get their closing move.
        return outcome;
    }

    // A turn is a move attempt followed by hostile motion; drones advance
    // on rejected moves too.
    hostile::advance_drones(&state.board, &mut state.drones, rng);

    if state.drones.iter().any(|drone| drone.pos == state.player.pos) {
        state.player.health = 0;
        outcome = TurnOutcome::Defeat(DefeatCause::DroneContact);
    } else if state.player.health <= 0 {
        outcome = TurnOutcome::Defeat(DefeatCause::TrapDamage);
    }
    outcome
}

fn resolve_cell(state: &mut GameState, pos: Pos) -> TurnOutcome {
    let max_health = state.difficulty.max_health;
    match state.board.cell_at(pos) {
        CellKind::Empty => TurnOutcome::Moved,
        CellKind::Trap => {
            state.player.health = (state.player.health - 1).max(0);
            state.board.set_cell(pos, CellKind::Empty);
            TurnOutcome::Trapped
        }
        CellKind::Medkit => {
            state.player.health = (state.player.health + 1).min(max_health);
            state.board.set_cell(pos, CellKind::Empty);
            TurnOutcome::Healed
        }
        CellKind::Helper => {
            state.player.health = (state.player.health + 1).min(max_health);
            let jam = state.difficulty.jam_turns;
            for drone in &mut state.drones {
                drone.frozen_turns = jam;
            }
            state.board.set_cell(pos, CellKind::Empty);
            TurnOutcome::Helped
        }
        CellKind::Exit => TurnOutcome::Victory,
        CellKind::Wall => unreachable!("wall moves are rejected before cell resolution"),
    }
}
