//! Persisted bookmark set.
//!
//! Favorited movie summaries, unique by id with insertion order preserved
//! for display. The whole set is serialized to a single JSON file after
//! every mutation and rehydrated once at startup; a missing or malformed
//! file degrades to an empty set rather than an error.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::movie::Movie;

/// Errors that can occur while persisting bookmarks.
#[derive(Debug, Error)]
pub enum BookmarkError {
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bookmark set could not be serialized.
    #[error("Serialization error: {reason}")]
    Serialize { reason: String },
}

/// One persisted bookmark record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookmarkEntry {
    /// Movie summary as it looked when bookmarked
    pub movie: Movie,
    /// When the bookmark was created
    pub bookmarked_at: DateTime<Utc>,
}

/// Ordered set of bookmarked movies backed by a JSON file.
#[derive(Debug)]
pub struct BookmarkStore {
    path: Option<PathBuf>,
    entries: Vec<BookmarkEntry>,
}

impl BookmarkStore {
    /// Loads the bookmark set from the given file.
    ///
    /// An absent file yields an empty store. A malformed file is treated as
    /// empty and logged at warn level; the next mutation overwrites it.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "malformed bookmark file, starting with empty set"
                    );
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            path: Some(path),
            entries,
        }
    }

    /// Creates a store that never touches disk. Used in tests and by
    /// embedders that manage persistence themselves.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Vec::new(),
        }
    }

    /// Toggles a movie's bookmark and persists the full set.
    ///
    /// Returns true when the movie is bookmarked after the call. Insertion
    /// order of the remaining entries is preserved on removal.
    ///
    /// # Errors
    ///
    /// - `BookmarkError::Io` - If the bookmark file could not be written
    /// - `BookmarkError::Serialize` - If the set could not be serialized
    pub fn toggle(&mut self, movie: &Movie) -> Result<bool, BookmarkError> {
        let bookmarked = match self.entries.iter().position(|e| e.movie.id == movie.id) {
            Some(index) => {
                self.entries.remove(index);
                false
            }
            None => {
                self.entries.push(BookmarkEntry {
                    movie: movie.clone(),
                    bookmarked_at: Utc::now(),
                });
                true
            }
        };

        self.persist()?;
        Ok(bookmarked)
    }

    /// Whether the given movie id is bookmarked.
    pub fn is_bookmarked(&self, movie_id: u64) -> bool {
        self.entries.iter().any(|e| e.movie.id == movie_id)
    }

    /// Bookmarked movies whose titles contain the substring,
    /// case-insensitively, in insertion order.
    pub fn filter(&self, substring: &str) -> Vec<&Movie> {
        let needle = substring.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.movie.title.to_lowercase().contains(&needle))
            .map(|e| &e.movie)
            .collect()
    }

    /// All bookmarked movies in insertion order.
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.entries.iter().map(|e| &e.movie)
    }

    /// Number of bookmarked movies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the current set, for comparing persisted states.
    ///
    /// # Errors
    ///
    /// - `BookmarkError::Serialize` - If the set could not be serialized
    pub fn serialized(&self) -> Result<String, BookmarkError> {
        serde_json::to_string_pretty(&self.entries).map_err(|e| BookmarkError::Serialize {
            reason: e.to_string(),
        })
    }

    /// Path of the backing file, when the store is file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self) -> Result<(), BookmarkError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let contents = self.serialized()?;
        fs::write(path, contents)?;
        Ok(())
    }
}
