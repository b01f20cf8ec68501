//! Flat per-player text files.
//!
//! Each player gets a folder named `<name>-<quest>-<color>` (lowercase) under
//! the data directory, holding two append-only files:
//!
//! - `results.txt`: one `game,wins,losses,draws,score,flags` line per game
//! - `shortcuts.txt`: one `shortcut<TAB>text` line per shortcut
//!
//! Later shortcut lines override earlier ones with the same name.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{GameError, Outcome, Result};

const RESULTS: &str = "results.txt";
const SHORTCUTS: &str = "shortcuts.txt";

/// One stored game result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub game: String,
    pub outcome: Outcome,
    /// Bit flags describing the options the game was played with.
    pub flags: u32,
}

impl ResultRecord {
    fn to_line(&self) -> String {
        let o = &self.outcome;
        format!("{},{},{},{},{},{}", self.game, o.wins, o.losses, o.draws, o.score, self.flags)
    }

    fn parse(line: &str) -> Result<Self> {
        let bad = || GameError::Storage(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("malformed result line {line:?}"),
        ));
        let fields: Vec<&str> = line.split(',').collect();
        let [game, wins, losses, draws, score, flags] = fields[..] else {
            return Err(bad());
        };
        let int = |text: &str| text.trim().parse::<i64>().map_err(|_| bad());
        Ok(Self {
            game: game.to_string(),
            outcome: Outcome {
                wins: u32::try_from(int(wins)?).map_err(|_| bad())?,
                losses: u32::try_from(int(losses)?).map_err(|_| bad())?,
                draws: u32::try_from(int(draws)?).map_err(|_| bad())?,
                score: int(score)?,
            },
            flags: u32::try_from(int(flags)?).map_err(|_| bad())?,
        })
    }
}

/// A player's data folder.
#[derive(Clone, Debug)]
pub struct PlayerStore {
    folder: PathBuf,
}

impl PlayerStore {
    /// Open (creating if needed) the folder for a player.
    pub fn open(data_dir: impl AsRef<Path>, name: &str, quest: &str, color: &str) -> Result<Self> {
        let base = format!("{name}-{quest}-{color}").to_lowercase();
        let folder = data_dir.as_ref().join(base);
        let created = !folder.exists();
        fs::create_dir_all(&folder)?;
        for file in [RESULTS, SHORTCUTS] {
            OpenOptions::new().create(true).append(true).open(folder.join(file))?;
        }
        if created {
            tracing::info!(folder = %folder.display(), "created player folder");
        }
        Ok(Self { folder })
    }

    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Append a game result.
    pub fn store_result(&self, game: &str, outcome: Outcome, flags: u32) -> Result<()> {
        let record = ResultRecord { game: game.to_string(), outcome, flags };
        self.append(RESULTS, &record.to_line())?;
        tracing::info!(game, %outcome, flags, "stored result");
        Ok(())
    }

    /// Every stored result, oldest first.
    pub fn load_results(&self) -> Result<Vec<ResultRecord>> {
        fs::read_to_string(self.folder.join(RESULTS))?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(ResultRecord::parse)
            .collect()
    }

    /// Append a shortcut definition.
    pub fn store_shortcut(&self, shortcut: &str, text: &str) -> Result<()> {
        if shortcut.is_empty() || shortcut.contains(char::is_whitespace) {
            return Err(GameError::InvalidOption(format!("bad shortcut {shortcut:?}")));
        }
        self.append(SHORTCUTS, &format!("{shortcut}\t{text}"))
    }

    /// All shortcuts, later definitions winning.
    pub fn load_shortcuts(&self) -> Result<FxHashMap<String, String>> {
        let text = fs::read_to_string(self.folder.join(SHORTCUTS))?;
        Ok(text
            .lines()
            .filter_map(|line| line.split_once('\t'))
            .map(|(shortcut, text)| (shortcut.to_string(), text.trim().to_string()))
            .collect())
    }

    fn append(&self, file: &str, line: &str) -> Result<()> {
        let mut handle = OpenOptions::new().create(true).append(true).open(self.folder.join(file))?;
        writeln!(handle, "{line}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlayerStore::open(dir.path(), "Arthur", "Grail", "Blue").unwrap();
        assert!(store.folder().ends_with("arthur-grail-blue"));
        assert!(store.folder().join(RESULTS).exists());
        assert!(store.folder().join(SHORTCUTS).exists());
        assert!(store.load_results().unwrap().is_empty());
    }

    #[test]
    fn test_results_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlayerStore::open(dir.path(), "a", "b", "c").unwrap();
        store.store_result("Pig", Outcome::win(104), 0).unwrap();
        store
            .store_result("Mate", Outcome { wins: 0, losses: 1, draws: 0, score: -12 }, 3)
            .unwrap();

        let results = store.load_results().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].game, "Pig");
        assert_eq!(results[0].outcome, Outcome::win(104));
        assert_eq!(results[1].outcome.score, -12);
        assert_eq!(results[1].flags, 3);

        let text = fs::read_to_string(store.folder().join(RESULTS)).unwrap();
        assert_eq!(text.lines().next(), Some("Pig,1,0,0,104,0"));
    }

    #[test]
    fn test_shortcuts_override() {
        let dir = tempfile::tempdir().unwrap();
        let store = PlayerStore::open(dir.path(), "a", "b", "c").unwrap();
        store.store_shortcut("gg", "quit").unwrap();
        store.store_shortcut("gg", "roll").unwrap();
        let shortcuts = store.load_shortcuts().unwrap();
        assert_eq!(shortcuts.get("gg").map(String::as_str), Some("roll"));
        assert!(store.store_shortcut("two words", "x").is_err());
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        PlayerStore::open(dir.path(), "a", "b", "c")
            .unwrap()
            .store_result("Flip", Outcome::draw(0), 0)
            .unwrap();
        let store = PlayerStore::open(dir.path(), "A", "B", "C").unwrap();
        assert_eq!(store.load_results().unwrap().len(), 1);
    }
}
