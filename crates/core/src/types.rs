use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    /// Orthogonal neighbors in scan order: up, right, down, left.
    pub fn neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }

    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Static contents of one board cell. Drones are entities layered on top of
/// the board, not cell kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CellKind {
    Empty,
    Wall,
    Trap,
    Medkit,
    Helper,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DefeatCause {
    TrapDamage,
    DroneContact,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    Victory,
    Defeat(DefeatCause),
}

/// Result of one `turn::step` call. Exactly one tag per turn; `Victory` and
/// `Defeat` are terminal and take precedence over the movement tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnOutcome {
    Bump,
    Moved,
    Trapped,
    Healed,
    Helped,
    Victory,
    Defeat(DefeatCause),
}

impl TurnOutcome {
    pub fn terminal(self) -> Option<RunOutcome> {
        match self {
            TurnOutcome::Victory => Some(RunOutcome::Victory),
            TurnOutcome::Defeat(cause) => Some(RunOutcome::Defeat(cause)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TensionLevel {
    Low,
    Mid,
    High,
}

/// Classifier output consumed by the narration layer: a continuous tension
/// level plus the discrete event of the turn, when the turn produced one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoodReading {
    pub tension: TensionLevel,
    pub event: Option<TurnOutcome>,
}
