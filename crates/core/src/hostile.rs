//! Drone motion policy.
//!
//! Drones resolve in list order, so occupancy checks see already-moved
//! drones at their new cells and the whole pass replays bit-for-bit from
//! the same RNG stream. A frozen or boxed-in drone consumes no RNG draw.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::state::{Board, Drone};
use crate::types::{CellKind, Pos};

pub fn advance_drones(board: &Board, drones: &mut [Drone], rng: &mut ChaCha8Rng) {
    for index in 0..drones.len() {
        if drones[index].frozen_turns > 0 {
            drones[index].frozen_turns -= 1;
            continue;
        }

        let candidates: Vec<Pos> = drones[index]
            .pos
            .neighbors()
            .into_iter()
            .filter(|&next| {
                board.cell_at(next) != CellKind::Wall
                    && !drones
                        .iter()
                        .enumerate()
                        .any(|(other, drone)| other != index && drone.pos == next)
            })
            .collect();

        if candidates.is_empty() {
            continue;
        }
        let pick = (rng.next_u64() % candidates.len() as u64) as usize;
        drones[index].pos = candidates[pick];
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn frozen_drone_decrements_and_stays() {
        let board = Board::empty(5);
        let mut drones = [Drone { pos: Pos { y: 2, x: 2 }, frozen_turns: 2 }];
        advance_drones(&board, &mut drones, &mut rng(1));
        assert_eq!(drones[0].pos, Pos { y: 2, x: 2 });
        assert_eq!(drones[0].frozen_turns, 1);
        advance_drones(&board, &mut drones, &mut rng(1));
        assert_eq!(drones[0].frozen_turns, 0);
        assert_eq!(drones[0].pos, Pos { y: 2, x: 2 });
    }

    #[test]
    fn boxed_in_drone_stays_in_place() {
        let mut board = Board::empty(5);
        let center = Pos { y: 2, x: 2 };
        for wall in center.neighbors() {
            board.set_cell(wall, CellKind::Wall);
        }
        let mut drones = [Drone { pos: center, frozen_turns: 0 }];
        advance_drones(&board, &mut drones, &mut rng(3));
        assert_eq!(drones[0].pos, center);
    }

    #[test]
    fn drones_never_stack_on_one_cell() {
        // A 1x3 corridor carved into walls: the middle drone has nowhere
        // legal to go, the edge drones can only shuffle outward.
        let mut board = Board::empty(5);
        for y in 0..5 {
            for x in 0..5 {
                board.set_cell(Pos { y, x }, CellKind::Wall);
            }
        }
        for x in 0..5 {
            board.set_cell(Pos { y: 2, x }, CellKind::Empty);
        }
        let mut drones = [
            Drone { pos: Pos { y: 2, x: 1 }, frozen_turns: 0 },
            Drone { pos: Pos { y: 2, x: 2 }, frozen_turns: 0 },
            Drone { pos: Pos { y: 2, x: 3 }, frozen_turns: 0 },
        ];
        for seed in 0..50_u64 {
            let mut pass = drones;
            advance_drones(&board, &mut pass, &mut rng(seed));
            for (index, drone) in pass.iter().enumerate() {
                assert_ne!(board.cell_at(drone.pos), CellKind::Wall);
                assert!(
                    !pass[index + 1..].iter().any(|other| other.pos == drone.pos),
                    "seed {seed} stacked two drones"
                );
            }
            drones = pass;
        }
    }

    #[test]
    fn same_stream_replays_the_same_walk() {
        let board = Board::empty(6);
        let start = [
            Drone { pos: Pos { y: 1, x: 1 }, frozen_turns: 0 },
            Drone { pos: Pos { y: 4, x: 4 }, frozen_turns: 0 },
        ];

        let mut left = start;
        let mut left_rng = rng(42);
        let mut right = start;
        let mut right_rng = rng(42);
        for _ in 0..32 {
            advance_drones(&board, &mut left, &mut left_rng);
            advance_drones(&board, &mut right, &mut right_rng);
            assert_eq!(left, right);
        }
    }

    #[test]
    fn moves_stay_orthogonal_and_in_bounds() {
        let board = Board::empty(4);
        let mut drones = [Drone { pos: Pos { y: 0, x: 0 }, frozen_turns: 0 }];
        let mut stream = rng(7);
        for _ in 0..64 {
            let before = drones[0].pos;
            advance_drones(&board, &mut drones, &mut stream);
            let after = drones[0].pos;
            assert!(board.in_bounds(after));
            assert_eq!(before.manhattan(after), 1, "unfrozen drone with room must step once");
        }
    }
}
