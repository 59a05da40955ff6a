use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A movie queued for later
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub title: String,
    pub id: i64,
}

/// What happened on an add
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Ordered, duplicate-free list of movies the user wants to watch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
}

impl Watchlist {
    /// Creates an empty watchlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the pair unless an identical one is already queued
    pub fn add(&mut self, title: String, id: i64) -> AddOutcome {
        let entry = WatchlistEntry { title, id };

        if self.entries.contains(&entry) {
            tracing::warn!(title = %entry.title, id = entry.id, "Movie already in watchlist");
            return AddOutcome::AlreadyPresent;
        }

        tracing::info!(title = %entry.title, id = entry.id, "Added movie to watchlist");
        self.entries.push(entry);
        AddOutcome::Added
    }

    /// Removes the entry at a zero-based position
    pub fn remove(&mut self, index: usize) -> AppResult<WatchlistEntry> {
        if index >= self.entries.len() {
            return Err(AppError::NotFound(format!(
                "No watchlist entry at position {} (list has {})",
                index,
                self.entries.len()
            )));
        }

        Ok(self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
