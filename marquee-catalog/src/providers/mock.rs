//! Deterministic catalog provider for tests and offline development.

use std::collections::HashSet;

use async_trait::async_trait;
use marquee_core::movie::{Genre, Movie, MovieDetail, MoviePage, SpokenLanguage};
use url::Url;

use super::CatalogProvider;
use crate::errors::CatalogError;

/// In-memory catalog with predictable contents.
///
/// Serves `page_size` movies per page across `total_pages` pages, with
/// optional injected failures per endpoint, so controller and CLI flows can
/// be exercised without network access.
#[derive(Debug, Clone)]
pub struct MockCatalog {
    total_pages: u32,
    page_size: usize,
    failing_pages: HashSet<u32>,
    fail_detail: bool,
    fail_trailer: bool,
    trailer_key: Option<String>,
}

impl MockCatalog {
    /// Creates a mock catalog with 5 pages of 20 movies each.
    pub fn new() -> Self {
        Self {
            total_pages: 5,
            page_size: 20,
            failing_pages: HashSet::new(),
            fail_detail: false,
            fail_trailer: false,
            trailer_key: Some("abc123".to_string()),
        }
    }

    /// Sets the number of pages the catalog reports.
    #[must_use]
    pub fn with_total_pages(mut self, total_pages: u32) -> Self {
        self.total_pages = total_pages;
        self
    }

    /// Sets the number of movies per page.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Makes fetches of the given page fail with a network error.
    #[must_use]
    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_pages.insert(page);
        self
    }

    /// Makes detail fetches fail with a network error.
    #[must_use]
    pub fn with_failing_detail(mut self) -> Self {
        self.fail_detail = true;
        self
    }

    /// Makes trailer lookups fail with a network error.
    #[must_use]
    pub fn with_failing_trailer(mut self) -> Self {
        self.fail_trailer = true;
        self
    }

    /// Sets the trailer video key; `None` means no trailer exists.
    #[must_use]
    pub fn with_trailer_key(mut self, key: Option<&str>) -> Self {
        self.trailer_key = key.map(str::to_string);
        self
    }

    fn movie(&self, query: Option<&str>, id: u64) -> Movie {
        let label = query.filter(|q| !q.is_empty()).unwrap_or("Popular");
        Movie {
            id,
            title: format!("{label} Movie {id}"),
            poster_path: Some(format!("/poster-{id}.jpg")),
            release_date: Some("2024-06-01".to_string()),
            vote_average: 7.5,
            original_language: "en".to_string(),
        }
    }
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for MockCatalog {
    async fn fetch_page(&self, query: Option<&str>, page: u32) -> Result<MoviePage, CatalogError> {
        if self.failing_pages.contains(&page) {
            return Err(CatalogError::Network {
                reason: format!("mock failure fetching page {page}"),
            });
        }

        let movies = if page > self.total_pages {
            Vec::new()
        } else {
            let start = u64::from(page.saturating_sub(1)) * self.page_size as u64 + 1;
            (start..start + self.page_size as u64)
                .map(|id| self.movie(query, id))
                .collect()
        };

        Ok(MoviePage {
            movies,
            page,
            total_pages: self.total_pages,
        })
    }

    async fn fetch_trending(&self) -> Result<Vec<Movie>, CatalogError> {
        Ok((1..=10).map(|id| self.movie(Some("Trending"), id)).collect())
    }

    async fn fetch_detail(&self, movie_id: u64) -> Result<MovieDetail, CatalogError> {
        if self.fail_detail {
            return Err(CatalogError::Network {
                reason: "mock failure fetching detail".to_string(),
            });
        }

        Ok(MovieDetail {
            movie: self.movie(None, movie_id),
            runtime: Some(136),
            overview: Some("A mock overview.".to_string()),
            tagline: Some("Mock all the things".to_string()),
            budget: 63_000_000,
            revenue: 463_517_383,
            status: Some("Released".to_string()),
            genres: vec![Genre {
                id: 28,
                name: "Action".to_string(),
            }],
            production_companies: Vec::new(),
            production_countries: Vec::new(),
            spoken_languages: vec![SpokenLanguage {
                iso_639_1: "en".to_string(),
                english_name: "English".to_string(),
            }],
            vote_count: 1000,
        })
    }

    async fn fetch_trailer(&self, _movie_id: u64) -> Result<Option<Url>, CatalogError> {
        if self.fail_trailer {
            return Err(CatalogError::Network {
                reason: "mock failure fetching videos".to_string(),
            });
        }

        match &self.trailer_key {
            Some(key) => {
                let url = Url::parse(&format!("https://www.youtube.com/watch?v={key}")).map_err(
                    |e| CatalogError::Parse {
                        reason: format!("invalid trailer key: {e}"),
                    },
                )?;
                Ok(Some(url))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pages_are_deterministic() {
        let catalog = MockCatalog::new();

        let first = catalog.fetch_page(Some("batman"), 1).await.unwrap();
        assert_eq!(first.movies.len(), 20);
        assert_eq!(first.movies[0].id, 1);
        assert!(first.movies[0].title.contains("batman"));
        assert!(first.has_more());

        let second = catalog.fetch_page(Some("batman"), 2).await.unwrap();
        assert_eq!(second.movies[0].id, 21);
    }

    #[tokio::test]
    async fn test_last_page_reports_no_more() {
        let catalog = MockCatalog::new().with_total_pages(2);
        let page = catalog.fetch_page(None, 2).await.unwrap();

        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_failing_page() {
        let catalog = MockCatalog::new().with_failing_page(2);

        assert!(catalog.fetch_page(None, 1).await.is_ok());
        assert!(catalog.fetch_page(None, 2).await.is_err());
    }

    #[tokio::test]
    async fn test_detail_bundle_with_trailer() {
        let catalog = MockCatalog::new();
        let bundle = catalog.fetch_detail_with_trailer(603).await.unwrap();

        assert_eq!(bundle.detail.movie.id, 603);
        assert_eq!(
            bundle.trailer_url.unwrap().as_str(),
            "https://www.youtube.com/watch?v=abc123"
        );
    }

    #[tokio::test]
    async fn test_detail_bundle_without_trailer() {
        let catalog = MockCatalog::new().with_trailer_key(None);
        let bundle = catalog.fetch_detail_with_trailer(603).await.unwrap();

        assert!(bundle.trailer_url.is_none());
    }

    #[tokio::test]
    async fn test_trailer_failure_degrades_gracefully() {
        let catalog = MockCatalog::new().with_failing_trailer();
        let bundle = catalog.fetch_detail_with_trailer(603).await.unwrap();

        assert_eq!(bundle.detail.movie.id, 603);
        assert!(bundle.trailer_url.is_none());
    }

    #[tokio::test]
    async fn test_detail_failure_propagates() {
        let catalog = MockCatalog::new().with_failing_detail();

        assert!(catalog.fetch_detail_with_trailer(603).await.is_err());
    }

    #[tokio::test]
    async fn test_trending_is_unpaged() {
        let catalog = MockCatalog::new();
        let trending = catalog.fetch_trending().await.unwrap();

        assert_eq!(trending.len(), 10);
    }
}
