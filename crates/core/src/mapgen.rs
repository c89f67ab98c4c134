//! Board generation: uniform feature placement followed by a reachability
//! check, regenerating until the exit is provably reachable.

use std::collections::{BTreeSet, VecDeque};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;
use thiserror::Error;

use crate::config::Difficulty;
use crate::state::Board;
use crate::types::{CellKind, Pos};

/// Re-placement attempts before a configuration is declared unsolvable.
const MAX_GENERATION_ATTEMPTS: u32 = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapGenError {
    #[error("configuration places {required} features but only {available} open cells exist")]
    InvalidConfiguration { required: usize, available: usize },
    #[error("no layout with a reachable exit after {attempts} attempts")]
    UnsolvableLayout { attempts: u32 },
}

#[derive(Debug, Clone)]
pub struct GeneratedBoard {
    pub board: Board,
    /// Initial drone cells. The board keeps them `Empty`; drones are
    /// entities, not cell kinds.
    pub drone_spawns: Vec<Pos>,
}

pub struct MapGenerator {
    difficulty: Difficulty,
}

impl MapGenerator {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    pub fn generate(&self, rng: &mut ChaCha8Rng) -> Result<GeneratedBoard, MapGenError> {
        let required = self.difficulty.feature_count();
        let available = self.difficulty.open_cells();
        if required > available {
            return Err(MapGenError::InvalidConfiguration { required, available });
        }

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = self.place_features(rng);
            if path_exists(&candidate.board) {
                return Ok(candidate);
            }
        }
        Err(MapGenError::UnsolvableLayout { attempts: MAX_GENERATION_ATTEMPTS })
    }

    fn place_features(&self, rng: &mut ChaCha8Rng) -> GeneratedBoard {
        let mut board = Board::empty(self.difficulty.size);
        let start = board.start();
        let exit = board.exit();
        board.set_cell(exit, CellKind::Exit);

        let mut free: Vec<Pos> = (0..self.difficulty.size as i32)
            .flat_map(|y| (0..self.difficulty.size as i32).map(move |x| Pos { y, x }))
            .filter(|&pos| pos != start && pos != exit)
            .collect();

        for _ in 0..self.difficulty.wall_count {
            let pos = take_uniform(&mut free, rng);
            board.set_cell(pos, CellKind::Wall);
        }
        for _ in 0..self.difficulty.trap_count {
            let pos = take_uniform(&mut free, rng);
            board.set_cell(pos, CellKind::Trap);
        }

        // Medkits keep a one-cell standoff from both reserved corners
        // whenever the pool still has cells outside those neighborhoods.
        let standoff: Vec<Pos> =
            start.neighbors().into_iter().chain(exit.neighbors()).collect();
        for _ in 0..self.difficulty.medkit_count {
            let pos = take_uniform_avoiding(&mut free, &standoff, rng);
            board.set_cell(pos, CellKind::Medkit);
        }

        for _ in 0..self.difficulty.helper_count {
            let pos = take_uniform(&mut free, rng);
            board.set_cell(pos, CellKind::Helper);
        }

        // Drones never spawn adjacent to the start cell.
        let sanctuary = start.neighbors();
        let mut drone_spawns = Vec::with_capacity(self.difficulty.drone_count);
        for _ in 0..self.difficulty.drone_count {
            drone_spawns.push(take_uniform_avoiding(&mut free, &sanctuary, rng));
        }

        GeneratedBoard { board, drone_spawns }
    }
}

fn take_uniform(free: &mut Vec<Pos>, rng: &mut ChaCha8Rng) -> Pos {
    debug_assert!(!free.is_empty(), "placement pool exhausted despite budget check");
    let index = (rng.next_u64() % free.len() as u64) as usize;
    free.swap_remove(index)
}

fn take_uniform_avoiding(free: &mut Vec<Pos>, avoid: &[Pos], rng: &mut ChaCha8Rng) -> Pos {
    let allowed: Vec<usize> =
        (0..free.len()).filter(|&index| !avoid.contains(&free[index])).collect();
    if allowed.is_empty() {
        return take_uniform(free, rng);
    }
    let pick = (rng.next_u64() % allowed.len() as u64) as usize;
    free.swap_remove(allowed[pick])
}

/// Breadth-first search from start to exit over non-Wall cells. Traps,
/// medkits, helpers, and drone spawn cells are all traversable.
fn path_exists(board: &Board) -> bool {
    let goal = board.exit();
    let mut open = VecDeque::from([board.start()]);
    let mut seen = BTreeSet::from([board.start()]);

    while let Some(pos) = open.pop_front() {
        if pos == goal {
            return true;
        }
        for next in pos.neighbors() {
            if seen.contains(&next) {
                continue;
            }
            if board.cell_at(next) == CellKind::Wall {
                continue;
            }
            seen.insert(next);
            open.push_back(next);
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::config::{EASY, HARD, NORMAL, PRESETS};

    fn generate_with_seed(difficulty: Difficulty, seed: u64) -> GeneratedBoard {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        MapGenerator::new(difficulty).generate(&mut rng).expect("preset should generate")
    }

    fn kind_count(board: &Board, kind: CellKind) -> usize {
        board.cells.iter().filter(|&&cell| cell == kind).count()
    }

    #[test]
    fn same_seed_produces_identical_boards() {
        let a = generate_with_seed(NORMAL, 12_345);
        let b = generate_with_seed(NORMAL, 12_345);
        assert_eq!(a.board.cells, b.board.cells);
        assert_eq!(a.drone_spawns, b.drone_spawns);
    }

    #[test]
    fn placement_matches_configured_counts() {
        for preset in PRESETS {
            let generated = generate_with_seed(preset, 7);
            assert_eq!(kind_count(&generated.board, CellKind::Wall), preset.wall_count);
            assert_eq!(kind_count(&generated.board, CellKind::Trap), preset.trap_count);
            assert_eq!(kind_count(&generated.board, CellKind::Medkit), preset.medkit_count);
            assert_eq!(kind_count(&generated.board, CellKind::Helper), preset.helper_count);
            assert_eq!(kind_count(&generated.board, CellKind::Exit), 1);
            assert_eq!(generated.drone_spawns.len(), preset.drone_count);
        }
    }

    #[test]
    fn start_and_exit_cells_stay_reserved() {
        for seed in [1_u64, 2, 3, 40, 99, 1_024] {
            let generated = generate_with_seed(HARD, seed);
            let board = &generated.board;
            assert_eq!(board.cell_at(board.start()), CellKind::Empty);
            assert_eq!(board.cell_at(board.exit()), CellKind::Exit);
            assert!(!generated.drone_spawns.contains(&board.start()));
            assert!(!generated.drone_spawns.contains(&board.exit()));
        }
    }

    #[test]
    fn drone_spawns_are_distinct_empty_cells() {
        for seed in [5_u64, 77, 909] {
            let generated = generate_with_seed(HARD, seed);
            for (index, &spawn) in generated.drone_spawns.iter().enumerate() {
                assert_eq!(generated.board.cell_at(spawn), CellKind::Empty);
                assert!(!generated.drone_spawns[index + 1..].contains(&spawn));
            }
        }
    }

    #[test]
    fn drones_spawn_outside_the_start_sanctuary() {
        for seed in 0..30_u64 {
            let generated = generate_with_seed(HARD, seed);
            for &spawn in &generated.drone_spawns {
                assert!(
                    spawn.manhattan(generated.board.start()) > 1,
                    "seed {seed} spawned a drone adjacent to the start"
                );
            }
        }
    }

    #[test]
    fn medkits_avoid_the_corner_neighborhoods() {
        for seed in 0..20_u64 {
            let generated = generate_with_seed(NORMAL, seed);
            let board = &generated.board;
            let standoff: Vec<Pos> = board
                .start()
                .neighbors()
                .into_iter()
                .chain(board.exit().neighbors())
                .collect();
            for pos in standoff {
                assert_ne!(
                    board.cell_at(pos),
                    CellKind::Medkit,
                    "seed {seed} put a medkit next to a reserved corner"
                );
            }
        }
    }

    #[test]
    fn oversized_configuration_is_rejected_before_placement() {
        let mut difficulty = EASY;
        difficulty.wall_count = difficulty.size * difficulty.size;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = MapGenerator::new(difficulty).generate(&mut rng).unwrap_err();
        assert!(matches!(err, MapGenError::InvalidConfiguration { .. }));
    }

    #[test]
    fn walled_off_exit_fails_reachability() {
        let mut board = Board::empty(5);
        board.set_cell(board.exit(), CellKind::Exit);
        board.set_cell(Pos { y: 3, x: 4 }, CellKind::Wall);
        board.set_cell(Pos { y: 4, x: 3 }, CellKind::Wall);
        board.set_cell(Pos { y: 3, x: 3 }, CellKind::Wall);
        assert!(!path_exists(&board));
    }

    #[test]
    fn hazards_and_items_do_not_block_reachability() {
        let mut board = Board::empty(3);
        board.set_cell(board.exit(), CellKind::Exit);
        board.set_cell(Pos { y: 0, x: 1 }, CellKind::Trap);
        board.set_cell(Pos { y: 1, x: 1 }, CellKind::Medkit);
        board.set_cell(Pos { y: 1, x: 0 }, CellKind::Helper);
        assert!(path_exists(&board));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]
        #[test]
        fn generated_boards_always_reach_the_exit(seed in any::<u64>(), preset_index in 0_usize..3) {
            let preset = PRESETS[preset_index];
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            match MapGenerator::new(preset).generate(&mut rng) {
                Ok(generated) => prop_assert!(path_exists(&generated.board)),
                Err(error) => prop_assert!(
                    matches!(error, MapGenError::UnsolvableLayout { .. }),
                    "presets must never be invalid: {error}"
                ),
            }
        }
    }
}
