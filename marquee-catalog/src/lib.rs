//! Marquee Catalog - Remote movie catalog access
//!
//! HTTP client for a TMDB-compatible movie catalog API: paged
//! discover/search, trending, and on-demand detail + trailer lookups,
//! behind a provider trait with a deterministic mock for offline use.

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]

pub mod errors;
pub mod providers;

// Re-export main types
pub use errors::CatalogError;
pub use providers::mock::MockCatalog;
pub use providers::tmdb::TmdbCatalog;
pub use providers::CatalogProvider;

/// Convenience type alias for Results with CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;
