pub mod config;
pub mod hostile;
pub mod mapgen;
pub mod mood;
pub mod replay;
pub mod state;
pub mod turn;
pub mod types;

pub use config::Difficulty;
pub use mapgen::{GeneratedBoard, MapGenError, MapGenerator};
pub use mood::classify;
pub use replay::{DirectionJournal, ReplayError, ReplayResult, replay_to_end};
pub use state::{Board, Drone, GameState, Player};
pub use turn::step;
pub use types::*;
