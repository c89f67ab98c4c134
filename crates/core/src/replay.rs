//! Direction journals and headless replay, for scenario tests and the fuzz
//! harness. A journal pins a seed and a difficulty; replaying it rebuilds
//! the board and feeds the recorded directions back through the resolver.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::Difficulty;
use crate::mapgen::{MapGenError, MapGenerator};
use crate::state::GameState;
use crate::turn;
use crate::types::{Direction, RunOutcome};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DirectionJournal {
    pub format_version: u16,
    pub seed: u64,
    pub difficulty_key: String,
    pub inputs: Vec<Direction>,
}

impl DirectionJournal {
    pub fn new(seed: u64, difficulty: &Difficulty) -> Self {
        Self {
            format_version: 1,
            seed,
            difficulty_key: difficulty.key.to_string(),
            inputs: Vec::new(),
        }
    }

    pub fn push(&mut self, direction: Direction) {
        self.inputs.push(direction);
    }
}

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    UnknownDifficulty(String),
    Generation(MapGenError),
    /// The journal kept recording inputs after the run finished.
    TrailingInput { consumed: usize },
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub outcome: Option<RunOutcome>,
    pub turns_taken: u32,
    pub final_snapshot_hash: u64,
}

pub fn replay_to_end(journal: &DirectionJournal) -> Result<ReplayResult, ReplayError> {
    let difficulty = Difficulty::by_key(&journal.difficulty_key)
        .ok_or_else(|| ReplayError::UnknownDifficulty(journal.difficulty_key.clone()))?;

    // One stream drives generation and every turn, so a seed plus the
    // direction list pins the entire run.
    let mut rng = ChaCha8Rng::seed_from_u64(journal.seed);
    let generated =
        MapGenerator::new(difficulty).generate(&mut rng).map_err(ReplayError::Generation)?;
    let mut state = GameState::new(difficulty, generated);

    let mut consumed = 0;
    for &direction in &journal.inputs {
        if state.outcome.is_some() {
            return Err(ReplayError::TrailingInput { consumed });
        }
        turn::step(&mut state, direction, &mut rng);
        consumed += 1;
    }

    Ok(ReplayResult {
        outcome: state.outcome,
        turns_taken: state.turns_taken,
        final_snapshot_hash: state.snapshot_hash(),
    })
}
