//! Difficulty presets and the cell-budget rule they must satisfy.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Difficulty {
    pub key: &'static str,
    pub name: &'static str,
    /// Boards are square; start is (0,0) and exit (size-1, size-1).
    pub size: usize,
    pub max_health: i32,
    pub start_health: i32,
    pub wall_count: usize,
    pub trap_count: usize,
    pub medkit_count: usize,
    pub helper_count: usize,
    pub drone_count: usize,
    /// Turns every drone stays frozen after the player reaches a helper.
    pub jam_turns: u8,
    pub blurb: &'static str,
}

pub const EASY: Difficulty = Difficulty {
    key: "easy",
    name: "Easy",
    size: 7,
    max_health: 6,
    start_health: 6,
    wall_count: 7,
    trap_count: 5,
    medkit_count: 5,
    helper_count: 1,
    drone_count: 1,
    jam_turns: 2,
    blurb: "Compact map, extra health, single drone.",
};

pub const NORMAL: Difficulty = Difficulty {
    key: "normal",
    name: "Normal",
    size: 9,
    max_health: 5,
    start_health: 4,
    wall_count: 11,
    trap_count: 8,
    medkit_count: 3,
    helper_count: 1,
    drone_count: 2,
    jam_turns: 2,
    blurb: "Original balance: 2 drones, moderate hazards.",
};

pub const HARD: Difficulty = Difficulty {
    key: "hard",
    name: "Hard",
    size: 10,
    max_health: 5,
    start_health: 4,
    wall_count: 16,
    trap_count: 14,
    medkit_count: 3,
    helper_count: 1,
    drone_count: 3,
    jam_turns: 2,
    blurb: "Bigger map, more walls and traps, extra drone.",
};

pub const PRESETS: [Difficulty; 3] = [EASY, NORMAL, HARD];

impl Difficulty {
    pub fn by_key(key: &str) -> Option<Difficulty> {
        PRESETS.iter().copied().find(|difficulty| difficulty.key == key)
    }

    /// Cells consumed by placed features (walls, hazards, items, spawns).
    pub fn feature_count(&self) -> usize {
        self.wall_count
            + self.trap_count
            + self.medkit_count
            + self.helper_count
            + self.drone_count
    }

    /// Cells available for placement: the board minus start and exit.
    pub fn open_cells(&self) -> usize {
        self.size * self.size - 2
    }
}
