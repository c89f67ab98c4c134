use crate::config::Difficulty;
use crate::mapgen::GeneratedBoard;
use crate::types::{CellKind, Pos, RunOutcome};

#[derive(Clone, Debug)]
pub struct Board {
    pub size: usize,
    pub cells: Vec<CellKind>,
}

impl Board {
    pub fn empty(size: usize) -> Self {
        Self { size, cells: vec![CellKind::Empty; size * size] }
    }

    pub fn start(&self) -> Pos {
        Pos { y: 0, x: 0 }
    }

    pub fn exit(&self) -> Pos {
        Pos { y: self.size as i32 - 1, x: self.size as i32 - 1 }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.size && (pos.y as usize) < self.size
    }

    /// Out-of-bounds reads as `Wall`, so movement checks treat the board
    /// perimeter and interior walls identically.
    pub fn cell_at(&self, pos: Pos) -> CellKind {
        if !self.in_bounds(pos) {
            return CellKind::Wall;
        }
        self.cells[self.index(pos)]
    }

    pub fn set_cell(&mut self, pos: Pos, kind: CellKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = kind;
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.size + (pos.x as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub health: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drone {
    pub pos: Pos,
    /// While positive the drone skips its move and the counter decrements.
    pub frozen_turns: u8,
}

/// Full mutable record of one run. Owned by the driver loop; the resolver
/// and classifier only ever borrow it.
pub struct GameState {
    pub difficulty: Difficulty,
    pub board: Board,
    pub player: Player,
    pub drones: Vec<Drone>,
    pub turns_taken: u32,
    pub outcome: Option<RunOutcome>,
}

impl GameState {
    pub fn new(difficulty: Difficulty, generated: GeneratedBoard) -> Self {
        let player = Player {
            pos: generated.board.start(),
            health: difficulty.start_health.min(difficulty.max_health),
        };
        let drones = generated
            .drone_spawns
            .iter()
            .map(|&pos| Drone { pos, frozen_turns: 0 })
            .collect();
        Self {
            difficulty,
            board: generated.board,
            player,
            drones,
            turns_taken: 0,
            outcome: None,
        }
    }

    /// Manhattan distance from the player to the closest drone, if any.
    pub fn nearest_drone_distance(&self) -> Option<u32> {
        self.drones.iter().map(|drone| self.player.pos.manhattan(drone.pos)).min()
    }

    /// Order-sensitive fingerprint of everything a turn can mutate. Two runs
    /// that fed identical inputs to identical seeds hash identically.
    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u32(self.turns_taken);
        hasher.write_i32(self.player.pos.y);
        hasher.write_i32(self.player.pos.x);
        hasher.write_i32(self.player.health);
        for drone in &self.drones {
            hasher.write_i32(drone.pos.y);
            hasher.write_i32(drone.pos.x);
            hasher.write_u8(drone.frozen_turns);
        }
        for &cell in &self.board.cells {
            hasher.write_u8(cell as u8);
        }
        hasher.finish()
    }
}
