//! Provider implementations for movie catalog access.

use async_trait::async_trait;
use marquee_core::detail::DetailBundle;
use marquee_core::movie::{Movie, MovieDetail, MoviePage};
use url::Url;

use crate::errors::CatalogError;

pub mod mock;
pub mod tmdb;

pub use mock::MockCatalog;
pub use tmdb::TmdbCatalog;

/// Trait for movie catalog providers.
///
/// Implementations provide catalog access through different backends
/// (the real HTTP API, mock providers for testing and offline development).
#[async_trait]
pub trait CatalogProvider: Send + Sync + std::fmt::Debug {
    /// Fetches one page of movies, sorted by popularity descending.
    ///
    /// An absent or empty query browses the popular catalog; otherwise the
    /// query is searched by text. No retry is performed on failure.
    ///
    /// # Errors
    /// - `CatalogError::Network` - Transport failure or non-success status
    /// - `CatalogError::Api` - The API reported a logical failure
    /// - `CatalogError::Parse` - Malformed or unexpected response payload
    async fn fetch_page(&self, query: Option<&str>, page: u32) -> Result<MoviePage, CatalogError>;

    /// Fetches the unpaged trending-today list.
    ///
    /// # Errors
    /// - `CatalogError::Network` - Transport failure or non-success status
    /// - `CatalogError::Api` - The API reported a logical failure
    /// - `CatalogError::Parse` - Malformed or unexpected response payload
    async fn fetch_trending(&self) -> Result<Vec<Movie>, CatalogError>;

    /// Fetches full detail for one movie.
    ///
    /// # Errors
    /// - `CatalogError::Network` - Transport failure or non-success status
    /// - `CatalogError::Api` - The API reported a logical failure
    /// - `CatalogError::Parse` - Malformed or unexpected response payload
    async fn fetch_detail(&self, movie_id: u64) -> Result<MovieDetail, CatalogError>;

    /// Looks up the movie's trailer link.
    ///
    /// Resolves the first video entry hosted on YouTube and typed as a
    /// trailer; absence of a match is `Ok(None)`, not an error.
    ///
    /// # Errors
    /// - `CatalogError::Network` - Transport failure or non-success status
    /// - `CatalogError::Api` - The API reported a logical failure
    /// - `CatalogError::Parse` - Malformed or unexpected response payload
    async fn fetch_trailer(&self, movie_id: u64) -> Result<Option<Url>, CatalogError>;

    /// Two-stage detail pipeline: detail, then trailer lookup.
    ///
    /// A trailer-lookup failure degrades to a bundle without a trailer
    /// rather than blocking the detail view.
    ///
    /// # Errors
    /// - `CatalogError::Network` - Detail fetch transport failure
    /// - `CatalogError::Api` - Detail fetch reported a logical failure
    /// - `CatalogError::Parse` - Malformed detail payload
    async fn fetch_detail_with_trailer(&self, movie_id: u64) -> Result<DetailBundle, CatalogError> {
        let detail = self.fetch_detail(movie_id).await?;
        let trailer_url = match self.fetch_trailer(movie_id).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "trailer lookup failed, omitting trailer");
                None
            }
        };

        Ok(DetailBundle {
            detail,
            trailer_url,
        })
    }
}
