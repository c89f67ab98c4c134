//! Best-time and streak records, one block per difficulty, persisted as
//! JSON under the user's data directory. The engine never reads these back;
//! a failed write costs nothing but the record.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyStats {
    pub runs: u32,
    pub wins: u32,
    pub defeats: u32,
    pub quits: u32,
    pub best_turns: Option<u32>,
    pub win_streak: u32,
    pub best_streak: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StatsFile {
    pub format_version: u32,
    pub difficulties: BTreeMap<String, DifficultyStats>,
}

impl StatsFile {
    fn new() -> Self {
        Self { format_version: 1, difficulties: BTreeMap::new() }
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunResult {
    Victory,
    Defeat,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunRecord {
    pub new_best: bool,
    pub streak: u32,
    pub best_streak: u32,
}

pub struct StatsStore {
    path: Option<PathBuf>,
    file: StatsFile,
}

impl StatsStore {
    pub fn open_default() -> Self {
        let path = default_path();
        let file = path
            .as_deref()
            .and_then(|path| StatsFile::load(path).ok())
            .unwrap_or_else(StatsFile::new);
        Self { path, file }
    }

    pub fn at_path(path: PathBuf) -> Self {
        let file = StatsFile::load(&path).unwrap_or_else(|_| StatsFile::new());
        Self { path: Some(path), file }
    }

    pub fn record_run(&mut self, difficulty_key: &str, turns: u32, result: RunResult) -> RunRecord {
        let stats = self.file.difficulties.entry(difficulty_key.to_string()).or_default();
        stats.runs += 1;
        let mut new_best = false;

        match result {
            RunResult::Victory => {
                stats.wins += 1;
                stats.win_streak += 1;
                stats.best_streak = stats.best_streak.max(stats.win_streak);
                if stats.best_turns.is_none_or(|best| turns < best) {
                    stats.best_turns = Some(turns);
                    new_best = true;
                }
            }
            RunResult::Defeat => {
                stats.defeats += 1;
                stats.win_streak = 0;
            }
            RunResult::Quit => {
                stats.quits += 1;
                stats.win_streak = 0;
            }
        }

        let record =
            RunRecord { new_best, streak: stats.win_streak, best_streak: stats.best_streak };
        self.save();
        record
    }

    pub fn summary_line(&self, difficulty_key: &str) -> String {
        let Some(stats) = self.file.difficulties.get(difficulty_key) else {
            return "No data yet.".to_string();
        };
        let win_rate = if stats.runs > 0 {
            (stats.wins as f64 / stats.runs as f64) * 100.0
        } else {
            0.0
        };
        let best_turns =
            stats.best_turns.map_or_else(|| "-".to_string(), |turns| turns.to_string());
        format!(
            "runs {}, wins {} ({win_rate:.0}% rate), best {best_turns} turns, streak {} (best {})",
            stats.runs, stats.wins, stats.win_streak, stats.best_streak
        )
    }

    fn save(&self) {
        if let Some(path) = &self.path {
            let _ = self.file.write_atomic(path);
        }
    }
}

fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "SignalVault")
        .map(|dirs| dirs.data_dir().join("stats.json"))
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn json_round_trip_preserves_records() {
        let mut file = StatsFile::new();
        file.difficulties.insert(
            "normal".to_string(),
            DifficultyStats {
                runs: 7,
                wins: 4,
                defeats: 2,
                quits: 1,
                best_turns: Some(19),
                win_streak: 2,
                best_streak: 3,
            },
        );
        let json = serde_json::to_string(&file).unwrap();
        let decoded: StatsFile = serde_json::from_str(&json).unwrap();
        assert_eq!(file, decoded);
    }

    #[test]
    fn atomic_write_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let mut store = StatsStore::at_path(path.clone());
        store.record_run("easy", 14, RunResult::Victory);
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = StatsFile::load(&path).unwrap();
        assert_eq!(loaded.difficulties["easy"].wins, 1);
        assert_eq!(loaded.difficulties["easy"].best_turns, Some(14));
    }

    #[test]
    fn victories_extend_the_streak_and_improve_the_best() {
        let dir = tempdir().unwrap();
        let mut store = StatsStore::at_path(dir.path().join("stats.json"));

        let first = store.record_run("hard", 30, RunResult::Victory);
        assert!(first.new_best);
        assert_eq!(first.streak, 1);

        let second = store.record_run("hard", 22, RunResult::Victory);
        assert!(second.new_best, "fewer turns should set a new best");
        assert_eq!(second.streak, 2);

        let slower = store.record_run("hard", 40, RunResult::Victory);
        assert!(!slower.new_best);
        assert_eq!(slower.best_streak, 3);
    }

    #[test]
    fn defeats_and_quits_reset_the_streak() {
        let dir = tempdir().unwrap();
        let mut store = StatsStore::at_path(dir.path().join("stats.json"));

        store.record_run("normal", 12, RunResult::Victory);
        let after_defeat = store.record_run("normal", 8, RunResult::Defeat);
        assert_eq!(after_defeat.streak, 0);
        assert_eq!(after_defeat.best_streak, 1);

        store.record_run("normal", 15, RunResult::Victory);
        let after_quit = store.record_run("normal", 3, RunResult::Quit);
        assert_eq!(after_quit.streak, 0);
    }

    #[test]
    fn summary_line_reports_missing_difficulties() {
        let dir = tempdir().unwrap();
        let store = StatsStore::at_path(dir.path().join("stats.json"));
        assert_eq!(store.summary_line("easy"), "No data yet.");
    }
}
