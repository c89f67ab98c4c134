//! Tension classification for the narration layer.
//!
//! Pure function of observable state. Thresholds, in integer form:
//! `High` at health <= 1/3 of max or a drone within distance 1, `Mid` at
//! health <= 2/3 of max or a drone within distance 2, `Low` otherwise.
//! Distance is Manhattan.

use crate::state::GameState;
use crate::types::{MoodReading, TensionLevel, TurnOutcome};

pub fn classify(state: &GameState, outcome: Option<TurnOutcome>) -> MoodReading {
    MoodReading { tension: tension(state), event: outcome.and_then(event_tag) }
}

fn tension(state: &GameState) -> TensionLevel {
    let health = state.player.health;
    let max_health = state.difficulty.max_health;
    let nearest = state.nearest_drone_distance();

    if health * 3 <= max_health || nearest.is_some_and(|distance| distance <= 1) {
        return TensionLevel::High;
    }
    if health * 3 <= max_health * 2 || nearest.is_some_and(|distance| distance <= 2) {
        return TensionLevel::Mid;
    }
    TensionLevel::Low
}

/// The discrete event the narrator reacts to. A plain move is not an event.
fn event_tag(outcome: TurnOutcome) -> Option<TurnOutcome> {
    match outcome {
        TurnOutcome::Moved => None,
        other => Some(other),
    }
}
