//! High score leaderboard system
//!
//! Persisted through a [`Storage`] backend, tracks the top 10 runs plus the
//! best score ever and the last name typed in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::platform::{Storage, StorageError};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

const SCORES_KEY: &str = "highScores";
const BEST_SCORE_KEY: &str = "bestScore";
const LAST_NAME_KEY: &str = "lastPlayerName";

/// Errors from saving a score
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The name was blank after trimming
    #[error("a player name is required")]
    EmptyName,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("failed to encode high scores: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub id: u64,
    pub name: String,
    pub score: u32,
    /// Level reached
    pub level: u32,
    /// Display date, formatted when the score was saved
    pub date: String,
}

/// High score leaderboard
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    /// Sorted by score, descending; ties keep insertion order
    pub entries: Vec<HighScoreEntry>,
    pub best_score: u32,
    pub last_player_name: String,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a score would make it into the table
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a run into the table. Returns the rank achieved (1-indexed) or
    /// None if it fell off the bottom.
    pub fn add_score(&mut self, name: &str, score: u32, level: u32, date: &str) -> Option<usize> {
        self.best_score = self.best_score.max(score);
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            id: self.next_id(),
            name: name.to_string(),
            score,
            level,
            date: date.to_string(),
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    fn next_id(&self) -> u64 {
        self.entries.iter().map(|e| e.id).max().map_or(1, |id| id + 1)
    }

    /// Record a finished run under `name` and persist everything.
    ///
    /// The name is trimmed; a blank name is rejected before anything is
    /// written.
    pub fn save_score(
        &mut self,
        storage: &mut impl Storage,
        name: &str,
        score: u32,
        level: u32,
        date: &str,
    ) -> Result<Option<usize>, ScoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoreError::EmptyName);
        }

        self.last_player_name = name.to_string();
        let rank = self.add_score(name, score, level, date);
        self.save(storage)?;

        log::info!("Saved score {score} for {name} (rank {rank:?})");
        Ok(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score in the table (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from storage; missing or corrupt data starts fresh
    pub fn load(storage: &impl Storage) -> Self {
        let entries = match storage.get(SCORES_KEY) {
            Some(json) => serde_json::from_str::<Vec<HighScoreEntry>>(&json).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable high scores: {e}");
                Vec::new()
            }),
            None => Vec::new(),
        };
        let best_score = storage
            .get(BEST_SCORE_KEY)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let last_player_name = storage.get(LAST_NAME_KEY).unwrap_or_default();

        log::info!("Loaded {} high scores", entries.len());
        Self {
            entries,
            best_score,
            last_player_name,
        }
    }

    /// Write the table, best score and last name to storage
    pub fn save(&self, storage: &mut impl Storage) -> Result<(), ScoreError> {
        let json = serde_json::to_string(&self.entries)?;
        storage.set(SCORES_KEY, &json)?;
        storage.set(BEST_SCORE_KEY, &self.best_score.to_string())?;
        storage.set(LAST_NAME_KEY, &self.last_player_name)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }

    /// Wipe the table and best score; the last player name is kept
    pub fn reset(&mut self, storage: &mut impl Storage) -> Result<(), ScoreError> {
        self.entries.clear();
        self.best_score = 0;
        storage.remove(SCORES_KEY)?;
        storage.remove(BEST_SCORE_KEY)?;
        log::info!("High scores reset");
        Ok(())
    }
}

/// Today's date for a new entry
#[cfg(target_arch = "wasm32")]
pub fn today() -> String {
    let date = js_sys::Date::new_0();
    format!(
        "{:02}/{:02}/{}",
        date.get_date(),
        date.get_month() + 1,
        date.get_full_year()
    )
}

#[cfg(not(target_arch = "wasm32"))]
pub fn today() -> String {
    "N/A".to_string()
}
