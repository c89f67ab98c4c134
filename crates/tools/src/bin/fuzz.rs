//! Headless random-walk harness: generates boards across every preset and
//! walks them with random directions, asserting engine invariants after
//! each turn.

use anyhow::Result;
use clap::Parser;
use game_core::config::PRESETS;
use game_core::{CellKind, Direction, GameState, MapGenError, MapGenerator, step};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Map seeds to walk per difficulty.
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    /// Turn cap per walk.
    #[arg(short, long, default_value_t = 400)]
    turns: u32,
}

fn choose(rng: &mut ChaCha8Rng, slice: &[Direction]) -> Direction {
    slice[(rng.next_u64() as usize) % slice.len()]
}

fn main() -> Result<()> {
    let args = Args::parse();
    println!("Fuzzing {} walks per difficulty from seed {}...", args.runs, args.seed);

    let mut finished = 0_u32;
    for run in 0..args.runs {
        let map_seed = args.seed.wrapping_add(u64::from(run));
        for preset in PRESETS {
            let mut rng = ChaCha8Rng::seed_from_u64(map_seed);
            let generated = match MapGenerator::new(preset).generate(&mut rng) {
                Ok(generated) => generated,
                Err(MapGenError::UnsolvableLayout { attempts }) => {
                    println!(
                        "seed {map_seed} [{}]: unsolvable after {attempts} attempts",
                        preset.key
                    );
                    continue;
                }
                Err(error) => panic!("preset {} rejected: {error}", preset.key),
            };
            let mut state = GameState::new(preset, generated);
            let mut choice_rng = ChaCha8Rng::seed_from_u64(map_seed ^ 0xD1CE);

            while state.outcome.is_none() && state.turns_taken < args.turns {
                let turns_before = state.turns_taken;
                step(&mut state, choose(&mut choice_rng, &Direction::ALL), &mut rng);

                assert_eq!(
                    state.turns_taken,
                    turns_before + 1,
                    "turn counter must advance by exactly one"
                );
                assert!(
                    (0..=preset.max_health).contains(&state.player.health),
                    "health out of bounds"
                );
                assert!(state.board.in_bounds(state.player.pos), "player out of bounds");
                assert_ne!(
                    state.board.cell_at(state.player.pos),
                    CellKind::Wall,
                    "player inside a wall"
                );
                for (index, drone) in state.drones.iter().enumerate() {
                    assert_ne!(
                        state.board.cell_at(drone.pos),
                        CellKind::Wall,
                        "drone inside a wall"
                    );
                    assert!(
                        !state.drones[index + 1..].iter().any(|other| other.pos == drone.pos),
                        "two drones share a cell"
                    );
                }
            }
            if state.outcome.is_some() {
                finished += 1;
            }
        }
    }

    println!("Fuzzing completed successfully ({finished} walks reached a terminal outcome).");
    Ok(())
}
