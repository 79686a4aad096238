//! TMDB-compatible catalog provider over HTTP.

use async_trait::async_trait;
use marquee_core::config::ApiConfig;
use marquee_core::movie::{Movie, MovieDetail, MoviePage};
use serde::Deserialize;
use url::Url;

use super::CatalogProvider;
use crate::errors::CatalogError;

/// Movie catalog provider backed by the TMDB HTTP API.
///
/// Authenticates every request with the configured bearer token. Requests
/// are fired once; failures surface immediately to the caller without retry.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

/// Paged list response from the catalog's list endpoints.
#[derive(Debug, Deserialize)]
struct PagedResults {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default = "first_page")]
    total_pages: u32,
    #[serde(default)]
    results: Vec<Movie>,
}

fn first_page() -> u32 {
    1
}

/// Video list response from the per-movie videos endpoint.
#[derive(Debug, Deserialize)]
struct VideoList {
    #[serde(default)]
    results: Vec<VideoEntry>,
}

#[derive(Debug, Deserialize)]
struct VideoEntry {
    #[serde(default)]
    site: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    key: String,
}

/// Well-formed error payload the API returns on logical failures.
#[derive(Debug, Deserialize)]
struct ApiFailure {
    success: Option<bool>,
    status_message: Option<String>,
}

impl TmdbCatalog {
    /// Creates a catalog client from API configuration.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Network` - If the HTTP client could not be built
    pub fn new(config: &ApiConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| CatalogError::Network {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, CatalogError> {
        tracing::debug!(url, "catalog request");

        let mut request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| CatalogError::Network {
            reason: format!("HTTP request failed: {e}"),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| CatalogError::Network {
            reason: format!("failed to read response body: {e}"),
        })?;

        if let Some(error) = classify_failure(status, &body) {
            return Err(error);
        }

        serde_json::from_str(&body).map_err(|e| CatalogError::Parse {
            reason: format!("JSON parsing failed: {e}"),
        })
    }
}

#[async_trait]
impl CatalogProvider for TmdbCatalog {
    async fn fetch_page(&self, query: Option<&str>, page: u32) -> Result<MoviePage, CatalogError> {
        let endpoint = match query {
            Some(q) if !q.is_empty() => format!(
                "{}/search/movie?query={}&sort_by=popularity.desc&page={}",
                self.base_url,
                urlencoding::encode(q),
                page
            ),
            _ => format!(
                "{}/discover/movie?sort_by=popularity.desc&page={}",
                self.base_url, page
            ),
        };

        let paged: PagedResults = self.get_json(&endpoint).await?;
        Ok(MoviePage {
            movies: paged.results,
            page: paged.page,
            total_pages: paged.total_pages,
        })
    }

    async fn fetch_trending(&self) -> Result<Vec<Movie>, CatalogError> {
        let endpoint = format!("{}/trending/movie/day", self.base_url);
        let paged: PagedResults = self.get_json(&endpoint).await?;
        Ok(paged.results)
    }

    async fn fetch_detail(&self, movie_id: u64) -> Result<MovieDetail, CatalogError> {
        let endpoint = format!("{}/movie/{movie_id}", self.base_url);
        self.get_json(&endpoint).await
    }

    async fn fetch_trailer(&self, movie_id: u64) -> Result<Option<Url>, CatalogError> {
        let endpoint = format!("{}/movie/{movie_id}/videos", self.base_url);
        let videos: VideoList = self.get_json(&endpoint).await?;
        Ok(select_trailer(&videos.results))
    }
}

/// Classify a response as a failure, if it is one.
///
/// A well-formed error payload (`success: false`) counts as an API-reported
/// logical failure regardless of status code; any other non-success status
/// is a transport-level failure.
fn classify_failure(status: u16, body: &str) -> Option<CatalogError> {
    if let Ok(failure) = serde_json::from_str::<ApiFailure>(body) {
        if failure.success == Some(false) {
            return Some(CatalogError::Api {
                reason: failure
                    .status_message
                    .unwrap_or_else(|| "unknown catalog error".to_string()),
            });
        }
    }

    if !(200..300).contains(&status) {
        return Some(CatalogError::Network {
            reason: format!("HTTP status {status}"),
        });
    }

    None
}

/// Select the trailer link from a video list.
///
/// Takes the first entry hosted on YouTube and typed as a trailer; entries
/// whose key does not form a valid watch URL are skipped.
fn select_trailer(entries: &[VideoEntry]) -> Option<Url> {
    entries
        .iter()
        .find(|v| v.site == "YouTube" && v.kind == "Trailer")
        .and_then(|v| Url::parse(&format!("https://www.youtube.com/watch?v={}", v.key)).ok())
}
