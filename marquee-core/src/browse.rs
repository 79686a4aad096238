//! Debounced search and infinite-scroll pagination state machine.
//!
//! `BrowseController` owns all list-browsing state: the raw and debounced
//! query, the current page, the has-more flag, and the accumulated results.
//! It performs no I/O. Embedders feed it events (`set_query`,
//! `signal_near_end`), drain fetch requests with `poll`, perform the network
//! call themselves, and hand the outcome back via `apply_page` /
//! `apply_failure`. Responses carry the request they answer, and a
//! generation counter discards anything belonging to a superseded query.

use std::time::{Duration, Instant};

use crate::movie::{Movie, MoviePage};

/// Observable phase of the browse lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowsePhase {
    /// No fetch issued yet
    Idle,
    /// A page fetch is in flight
    Loading,
    /// Last fetch succeeded
    Loaded,
    /// Last fetch failed
    Failed,
}

/// A page fetch the embedder must perform.
///
/// Returned by [`BrowseController::poll`] and passed back, with the outcome,
/// to [`BrowseController::apply_page`] or [`BrowseController::apply_failure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Search query; `None` means browse the popular catalog
    pub query: Option<String>,
    /// Page number to fetch (1-based)
    pub page: u32,
    generation: u64,
}

/// Search/pagination controller.
///
/// Single-owner state container; all transitions run to completion on the
/// caller's thread. Time is injected through `Instant` arguments so the
/// debounce contract is testable without sleeping.
#[derive(Debug)]
pub struct BrowseController {
    debounce: Duration,
    raw_query: String,
    debounced_query: String,
    debounce_deadline: Option<Instant>,
    /// Set when the debounced query must be (re)fetched from page 1
    dirty: bool,
    page: u32,
    has_more: bool,
    near_end: bool,
    in_flight: bool,
    generation: u64,
    movies: Vec<Movie>,
    error: Option<String>,
    phase: BrowsePhase,
}

impl BrowseController {
    /// Creates a controller with the given debounce quiet period.
    ///
    /// The initial (empty) query is considered fresh, so the first `poll`
    /// emits a page-1 request against the popular catalog.
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            raw_query: String::new(),
            debounced_query: String::new(),
            debounce_deadline: None,
            dirty: true,
            page: 1,
            has_more: true,
            near_end: false,
            in_flight: false,
            generation: 0,
            movies: Vec::new(),
            error: None,
            phase: BrowsePhase::Idle,
        }
    }

    /// Records a raw query change and re-arms the debounce deadline.
    ///
    /// The deadline is reset, not stacked: every keystroke pushes the
    /// debounced update another full quiet period into the future.
    pub fn set_query(&mut self, raw: impl Into<String>, now: Instant) {
        let raw = raw.into();
        if raw == self.raw_query {
            return;
        }
        self.raw_query = raw;
        self.debounce_deadline = Some(now + self.debounce);
    }

    /// Raises the near-end-of-list signal.
    ///
    /// Ignored while a fetch is in flight or when no more pages exist, so
    /// duplicate or overlapping page requests are never issued.
    pub fn signal_near_end(&mut self) {
        if self.in_flight || !self.has_more {
            return;
        }
        self.near_end = true;
    }

    /// Emits the next page fetch to perform, if any.
    ///
    /// A settled query change wins over a pending near-end signal: it resets
    /// pagination to page 1, clears the accumulated list, and bumps the
    /// generation so in-flight responses for the old query become stale.
    pub fn poll(&mut self, now: Instant) -> Option<PageRequest> {
        if let Some(deadline) = self.debounce_deadline {
            if now >= deadline {
                self.debounce_deadline = None;
                if self.raw_query != self.debounced_query {
                    self.debounced_query = self.raw_query.clone();
                    self.dirty = true;
                }
            }
        }

        if self.dirty {
            self.dirty = false;
            self.generation += 1;
            self.page = 1;
            self.has_more = true;
            self.near_end = false;
            self.movies.clear();
            self.error = None;
            self.in_flight = true;
            self.phase = BrowsePhase::Loading;
            tracing::debug!(query = %self.debounced_query, "fetching first page for query");
            return Some(self.request(1));
        }

        if self.near_end && self.has_more && !self.in_flight {
            self.near_end = false;
            self.page += 1;
            self.in_flight = true;
            self.phase = BrowsePhase::Loading;
            tracing::debug!(page = self.page, "fetching next page");
            return Some(self.request(self.page));
        }

        None
    }

    /// Applies a successful page response.
    ///
    /// Stale responses (generation mismatch after a query change) are
    /// discarded without touching any state. Page 1 replaces the accumulated
    /// list; later pages append to it.
    pub fn apply_page(&mut self, request: &PageRequest, page: MoviePage) {
        if request.generation != self.generation {
            tracing::debug!(page = request.page, "discarding stale page response");
            return;
        }

        self.in_flight = false;
        self.has_more = page.has_more();
        self.error = None;
        if request.page == 1 {
            self.movies = page.movies;
        } else {
            self.movies.extend(page.movies);
        }
        self.phase = BrowsePhase::Loaded;
    }

    /// Applies a failed page fetch.
    ///
    /// Failure is terminal for the query: auto-paging stops until the user
    /// changes the query. A first-page failure clears the list; a later-page
    /// failure keeps the accumulated prefix as the last known good set.
    pub fn apply_failure(&mut self, request: &PageRequest, message: impl Into<String>) {
        if request.generation != self.generation {
            tracing::debug!(page = request.page, "discarding stale page failure");
            return;
        }

        self.in_flight = false;
        self.has_more = false;
        self.error = Some(message.into());
        if request.page == 1 {
            self.movies.clear();
        }
        self.phase = BrowsePhase::Failed;
    }

    /// Accumulated result list for the current debounced query.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// User-visible error message from the last failed fetch, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether more pages exist beyond the last fetched one.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Whether a page fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Current observable phase.
    pub fn phase(&self) -> BrowsePhase {
        self.phase
    }

    /// The query the accumulated list belongs to.
    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    fn request(&self, page: u32) -> PageRequest {
        let query = if self.debounced_query.is_empty() {
            None
        } else {
            Some(self.debounced_query.clone())
        };
        PageRequest {
            query,
            page,
            generation: self.generation,
        }
    }
}
