use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::store::{KeyValueStore, StoreError};

pub const STORE_KEY: &str = "highScores";
pub const MAX_ENTRIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub score: u32,
    pub name: String,
}

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored high scores are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("cannot encode high scores: {0}")]
    Encode(#[source] serde_json::Error),
}

/// The best scores seen so far, best first, persisted after every insert.
pub struct Leaderboard<S> {
    store: S,
    entries: Vec<LeaderboardEntry>,
    default_name: String,
}

impl<S: KeyValueStore> Leaderboard<S> {
    pub fn load(store: S, default_name: impl Into<String>) -> Result<Self, LeaderboardError> {
        let entries = match store.get(STORE_KEY)? {
            Some(raw) => serde_json::from_str(&raw).map_err(LeaderboardError::Corrupt)?,
            None => Vec::new(),
        };

        Ok(Leaderboard { store, entries, default_name: default_name.into() })
    }

    /// Adds a score, keeps the top entries and writes them back to the store.
    /// A blank name is replaced by the default one.
    pub fn record(&mut self, score: u32, name: &str) -> Result<&[LeaderboardEntry], LeaderboardError> {
        let name = match name.trim() {
            "" => self.default_name.clone(),
            _ => name.to_string(),
        };

        self.entries.push(LeaderboardEntry { score, name });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_ENTRIES);

        let raw = serde_json::to_string(&self.entries).map_err(LeaderboardError::Encode)?;
        self.store.set(STORE_KEY, raw)?;
        info!(score, entries = self.entries.len(), "saved high scores");

        Ok(&self.entries)
    }

    /// One `name - score` line per entry, best first.
    pub fn display_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{} - {}", e.name, e.score))
            .collect()
    }
}
