//! Saved player scores, written through a [`KeyValueStore`].

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{models::LeaderboardEntry, storage::KeyValueStore};

/// Storage key holding the serialized leaderboard.
pub const LEADERBOARD_KEY: &str = "players";

/// Manager for the persisted list of player scores.
///
/// Entries are kept in insertion order; [`Leaderboard::list`] sorts on demand.
pub struct Leaderboard<S> {
    store: S,
    entries: Vec<LeaderboardEntry>,
}

impl<S: KeyValueStore> Leaderboard<S> {
    /// Read the persisted list, falling back to an empty board when the blob
    /// is missing, unreadable, or malformed.
    pub fn load(store: S) -> Self {
        let entries = match store.get(LEADERBOARD_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<LeaderboardEntry>>(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(%err, "Discarding malformed leaderboard");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(?err, "Failed to read leaderboard");
                Vec::new()
            }
        };
        debug!(entries = entries.len(), "Leaderboard loaded");
        Self { store, entries }
    }

    /// Record `score` for `name`. Blank names are ignored and yield `false`.
    ///
    /// Duplicate names are kept; the name is stored exactly as typed.
    pub fn save(&mut self, name: &str, score: u32) -> Result<bool> {
        if name.trim().is_empty() {
            return Ok(false);
        }
        let mut updated = self.entries.clone();
        updated.push(LeaderboardEntry::new(name, score));
        self.persist(&updated)?;
        self.entries = updated;
        Ok(true)
    }

    /// Remove every entry whose name matches exactly, returning how many went.
    pub fn delete(&mut self, name: &str) -> Result<usize> {
        let updated: Vec<LeaderboardEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.player_name != name)
            .cloned()
            .collect();
        let removed = self.entries.len() - updated.len();
        self.persist(&updated)?;
        self.entries = updated;
        Ok(removed)
    }

    /// Entries sorted by descending score. Ties keep insertion order.
    pub fn list(&self) -> Vec<LeaderboardEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }

    /// Highest saved entry, if any.
    pub fn best(&self) -> Option<&LeaderboardEntry> {
        self.entries
            .iter()
            .rev()
            .max_by_key(|entry| entry.score)
    }

    /// Number of saved entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are saved.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write `entries` out; callers adopt them only once this succeeds.
    fn persist(&self, entries: &[LeaderboardEntry]) -> Result<()> {
        let serialized = serde_json::to_string_pretty(entries)
            .context("failed to serialize leaderboard")?;
        self.store
            .set(LEADERBOARD_KEY, &serialized)
            .context("failed to persist leaderboard")
    }
}
