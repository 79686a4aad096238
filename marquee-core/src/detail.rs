//! Last-selection-wins detail loading session.
//!
//! Selecting a movie produces a token-stamped request; the embedder performs
//! the two-stage detail + trailer lookup and hands the combined result back.
//! A result whose token no longer matches the current selection is stale and
//! is discarded, so out-of-order completions can never populate the overlay
//! for the wrong movie.

use url::Url;

use crate::movie::MovieDetail;

/// Combined outcome of the detail + trailer lookup pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailBundle {
    /// Full movie detail
    pub detail: MovieDetail,
    /// Trailer link, when the video list contains a matching entry
    pub trailer_url: Option<Url>,
}

/// A detail fetch the embedder must perform for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRequest {
    /// Selected movie identifier
    pub movie_id: u64,
    token: u64,
}

/// Tracks the selected movie and guards against stale detail responses.
#[derive(Debug, Default)]
pub struct DetailSession {
    token: u64,
    selected: Option<u64>,
    bundle: Option<DetailBundle>,
    error: Option<String>,
}

impl DetailSession {
    /// Creates an empty session with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a movie, superseding any outstanding request.
    ///
    /// Returns the request to perform. Exactly one request is issued per
    /// distinct selection; responses to earlier selections become stale.
    pub fn select(&mut self, movie_id: u64) -> DetailRequest {
        self.token += 1;
        self.selected = Some(movie_id);
        self.bundle = None;
        self.error = None;
        DetailRequest {
            movie_id,
            token: self.token,
        }
    }

    /// Clears the selection; any in-flight response becomes stale.
    pub fn clear(&mut self) {
        self.token += 1;
        self.selected = None;
        self.bundle = None;
        self.error = None;
    }

    /// Applies a completed lookup, discarding it when stale.
    pub fn apply(
        &mut self,
        request: &DetailRequest,
        result: Result<DetailBundle, impl Into<String>>,
    ) {
        if request.token != self.token {
            tracing::debug!(movie_id = request.movie_id, "discarding stale detail response");
            return;
        }

        match result {
            Ok(bundle) => self.bundle = Some(bundle),
            Err(message) => self.error = Some(message.into()),
        }
    }

    /// Currently selected movie id, if any.
    pub fn selected_id(&self) -> Option<u64> {
        self.selected
    }

    /// Loaded detail bundle for the current selection, if it has arrived.
    pub fn bundle(&self) -> Option<&DetailBundle> {
        self.bundle.as_ref()
    }

    /// User-visible error for the current selection's lookup, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::Movie;

    fn bundle(id: u64, title: &str) -> DetailBundle {
        DetailBundle {
            detail: MovieDetail {
                movie: Movie {
                    id,
                    title: title.to_string(),
                    poster_path: None,
                    release_date: None,
                    vote_average: 8.0,
                    original_language: "en".to_string(),
                },
                runtime: Some(120),
                overview: None,
                tagline: None,
                budget: 0,
                revenue: 0,
                status: None,
                genres: Vec::new(),
                production_companies: Vec::new(),
                production_countries: Vec::new(),
                spoken_languages: Vec::new(),
                vote_count: 100,
            },
            trailer_url: None,
        }
    }

    #[test]
    fn test_apply_current_selection() {
        let mut session = DetailSession::new();
        let request = session.select(603);

        session.apply(&request, Ok::<_, String>(bundle(603, "The Matrix")));

        assert_eq!(session.selected_id(), Some(603));
        assert_eq!(session.bundle().unwrap().detail.movie.title, "The Matrix");
    }

    #[test]
    fn test_stale_response_after_reselection_discarded() {
        let mut session = DetailSession::new();
        let old_request = session.select(603);
        let new_request = session.select(27205);

        // The 603 response arrives after the selection moved on.
        session.apply(&old_request, Ok::<_, String>(bundle(603, "The Matrix")));
        assert!(session.bundle().is_none());

        session.apply(&new_request, Ok::<_, String>(bundle(27205, "Inception")));
        assert_eq!(session.bundle().unwrap().detail.movie.id, 27205);
    }

    #[test]
    fn test_stale_response_after_clear_discarded() {
        let mut session = DetailSession::new();
        let request = session.select(603);
        session.clear();

        session.apply(&request, Ok::<_, String>(bundle(603, "The Matrix")));

        assert_eq!(session.selected_id(), None);
        assert!(session.bundle().is_none());
    }

    #[test]
    fn test_lookup_failure_recorded() {
        let mut session = DetailSession::new();
        let request = session.select(603);

        session.apply(&request, Err("network unreachable"));

        assert!(session.bundle().is_none());
        assert_eq!(session.error(), Some("network unreachable"));
    }
}
