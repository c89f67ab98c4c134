use core::config::PRESETS;
use core::mapgen::{MapGenError, MapGenerator};
use core::{CellKind, Direction, GameState, RunOutcome, step};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn choose(rng: &mut ChaCha8Rng, slice: &[Direction]) -> Direction {
    slice[(rng.next_u64() as usize) % slice.len()]
}

fn run_fuzz_simulation(map_seed: u64, choice_seed: u64, max_turns: u32) -> Result<(), String> {
    for preset in PRESETS {
        let mut rng = ChaCha8Rng::seed_from_u64(map_seed);
        let generated = match MapGenerator::new(preset).generate(&mut rng) {
            Ok(generated) => generated,
            Err(MapGenError::UnsolvableLayout { .. }) => continue,
            Err(error) => {
                return Err(format!("preset {} rejected as invalid: {error}", preset.key));
            }
        };
        let mut state = GameState::new(preset, generated);
        let mut choice_rng = ChaCha8Rng::seed_from_u64(choice_seed);

        while state.outcome.is_none() && state.turns_taken < max_turns {
            let turns_before = state.turns_taken;
            let outcome = step(&mut state, choose(&mut choice_rng, &Direction::ALL), &mut rng);

            if state.turns_taken != turns_before + 1 {
                return Err(format!("turn counter skipped on map_seed {map_seed}"));
            }
            if state.player.health < 0 || state.player.health > preset.max_health {
                return Err(format!("health out of bounds on map_seed {map_seed}"));
            }
            if !state.board.in_bounds(state.player.pos) {
                return Err(format!("player out of bounds on map_seed {map_seed}"));
            }
            if state.board.cell_at(state.player.pos) == CellKind::Wall {
                return Err(format!("player inside a wall on map_seed {map_seed}"));
            }
            for (index, drone) in state.drones.iter().enumerate() {
                if state.board.cell_at(drone.pos) == CellKind::Wall {
                    return Err(format!("drone inside a wall on map_seed {map_seed}"));
                }
                if state.drones[index + 1..].iter().any(|other| other.pos == drone.pos) {
                    return Err(format!("two drones share a cell on map_seed {map_seed}"));
                }
            }
            match outcome.terminal() {
                Some(terminal) if state.outcome != Some(terminal) => {
                    return Err(format!("terminal tag not recorded on map_seed {map_seed}"));
                }
                None if state.outcome.is_some() => {
                    return Err(format!("run finished without a terminal tag on {map_seed}"));
                }
                _ => {}
            }
            if state.outcome == Some(RunOutcome::Victory)
                && state.player.pos != state.board.exit()
            {
                return Err(format!("victory away from the exit on map_seed {map_seed}"));
            }
        }
    }
    Ok(())
}

#[test]
fn random_walks_preserve_engine_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(24));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(map_seed, choice_seed)| {
            run_fuzz_simulation(map_seed, choice_seed, 600).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("random walks should preserve engine invariants");
}
