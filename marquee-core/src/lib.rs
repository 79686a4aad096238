//! Marquee Core - Movie discovery domain logic
//!
//! This crate provides the fundamental building blocks for movie discovery:
//! domain types for catalog entries, the debounced browse/pagination state
//! machine, the persisted bookmark store, and configuration management.
//! No network I/O lives here; remote catalog access is in `marquee-catalog`.

pub mod bookmarks;
pub mod browse;
pub mod config;
pub mod detail;
pub mod movie;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use bookmarks::{BookmarkError, BookmarkStore};
pub use browse::{BrowseController, BrowsePhase, PageRequest};
pub use config::MarqueeConfig;
pub use detail::{DetailBundle, DetailRequest, DetailSession};
pub use movie::{Movie, MovieDetail, MoviePage};

/// Core errors that can bubble up from any Marquee subsystem.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Bookmark error: {0}")]
    Bookmark(#[from] BookmarkError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Bookmark(BookmarkError::Io(_)) => {
                "Could not write the bookmark file".to_string()
            }
            MarqueeError::Bookmark(BookmarkError::Serialize { .. }) => {
                "Could not save bookmarks".to_string()
            }
            MarqueeError::Configuration { reason } => format!("Configuration error: {reason}"),
            MarqueeError::Io(_) => "File system error occurred".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
