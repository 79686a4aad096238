//! CLI command implementations

use std::time::{Duration, Instant};

use clap::Subcommand;
use marquee_catalog::{CatalogProvider, TmdbCatalog};
use marquee_core::MarqueeConfig;
use marquee_core::bookmarks::BookmarkStore;
use marquee_core::browse::BrowseController;
use marquee_core::detail::{DetailBundle, DetailSession};
use marquee_core::movie::{Movie, format_money};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog (an empty query browses popular titles)
    Search {
        /// Search query text
        query: String,
        /// Number of pages to fetch via auto-paging
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },
    /// Show today's trending movies
    Trending,
    /// Show full detail for one movie, including its trailer link
    Detail {
        /// Catalog movie identifier
        id: u64,
    },
    /// Manage bookmarked movies
    Bookmark {
        #[command(subcommand)]
        action: BookmarkAction,
    },
}

/// Bookmark management subcommands
#[derive(Subcommand)]
pub enum BookmarkAction {
    /// Bookmark a movie by catalog id
    Add {
        /// Catalog movie identifier
        id: u64,
    },
    /// Remove a bookmark by catalog id
    Remove {
        /// Catalog movie identifier
        id: u64,
    },
    /// List bookmarks in the order they were added
    List {
        /// Only show titles containing this text (case-insensitive)
        #[arg(long)]
        find: Option<String>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    let config = MarqueeConfig::from_env();

    match command {
        Commands::Search { query, pages } => {
            let catalog = build_catalog(&config)?;
            let bookmarks = BookmarkStore::load(&config.storage.bookmarks_path);
            let controller =
                drive_search(&catalog, config.browse.debounce, &query, pages.max(1)).await;
            print_search_results(&controller, &bookmarks);
            Ok(())
        }
        Commands::Trending => {
            let catalog = build_catalog(&config)?;
            let bookmarks = BookmarkStore::load(&config.storage.bookmarks_path);
            show_trending(&catalog, &bookmarks).await
        }
        Commands::Detail { id } => {
            let catalog = build_catalog(&config)?;
            show_detail(&catalog, id).await
        }
        Commands::Bookmark { action } => {
            let mut bookmarks = BookmarkStore::load(&config.storage.bookmarks_path);
            match action {
                BookmarkAction::Add { id } => {
                    let catalog = build_catalog(&config)?;
                    bookmark_add(&catalog, &mut bookmarks, id).await
                }
                BookmarkAction::Remove { id } => bookmark_remove(&mut bookmarks, id),
                BookmarkAction::List { find } => {
                    print_bookmarks(&bookmarks, find.as_deref());
                    Ok(())
                }
            }
        }
    }
}

/// Build the real catalog client, requiring a configured API token.
fn build_catalog(config: &MarqueeConfig) -> anyhow::Result<TmdbCatalog> {
    config
        .require_token()
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    TmdbCatalog::new(&config.api).map_err(|e| anyhow::anyhow!(e.user_message()))
}

/// Drive the browse state machine through a query and `pages` fetches.
///
/// Settles the debounce, fetches page 1, then raises the near-end signal
/// once per additional requested page, exactly as a scrolling list would.
async fn drive_search<P: CatalogProvider>(
    catalog: &P,
    debounce: Duration,
    query: &str,
    pages: u32,
) -> BrowseController {
    let mut controller = BrowseController::new(debounce);
    let start = Instant::now();
    controller.set_query(query, start);

    // The CLI has no keystroke stream, so the quiet period is already over;
    // advance the injected clock instead of sleeping through it.
    let mut clock = start + debounce;
    let mut fetched = 0u32;

    while let Some(request) = controller.poll(clock) {
        match catalog
            .fetch_page(request.query.as_deref(), request.page)
            .await
        {
            Ok(page) => controller.apply_page(&request, page),
            Err(e) => controller.apply_failure(&request, e.user_message()),
        }

        fetched += 1;
        if fetched < pages {
            controller.signal_near_end();
        }
        clock += debounce;
    }

    controller
}

fn print_search_results(controller: &BrowseController, bookmarks: &BookmarkStore) {
    let query = controller.debounced_query();
    if query.is_empty() {
        println!("Popular movies");
    } else {
        println!("Search results for '{query}'");
    }
    println!("{:-<60}", "");

    if let Some(error) = controller.error() {
        println!("Error: {error}");
    }

    if controller.movies().is_empty() {
        if controller.error().is_none() {
            println!("No movies found. Try a different search term.");
        }
        return;
    }

    for movie in controller.movies() {
        println!(
            "{}",
            format_movie_line(movie, bookmarks.is_bookmarked(movie.id))
        );
    }

    if controller.has_more() {
        println!("\nMore pages available; rerun with a larger --pages value.");
    }
}

/// Show the trending-today list
///
/// # Errors
/// Fails when the trending fetch fails
async fn show_trending<P: CatalogProvider>(
    catalog: &P,
    bookmarks: &BookmarkStore,
) -> anyhow::Result<()> {
    let trending = catalog
        .fetch_trending()
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    println!("Trending Movies");
    println!("{:-<60}", "");

    for (rank, movie) in trending.iter().enumerate() {
        println!(
            "{:>2}. {}",
            rank + 1,
            format_movie_line(movie, bookmarks.is_bookmarked(movie.id))
        );
    }

    Ok(())
}

/// Show the detail view for one movie
///
/// # Errors
/// Fails when the detail fetch fails; a missing trailer is not an error
async fn show_detail<P: CatalogProvider>(catalog: &P, movie_id: u64) -> anyhow::Result<()> {
    let mut session = DetailSession::new();
    let request = session.select(movie_id);

    let result = catalog
        .fetch_detail_with_trailer(movie_id)
        .await
        .map_err(|e| e.user_message());
    session.apply(&request, result);

    match session.bundle() {
        Some(bundle) => {
            println!("{}", render_detail(bundle));
            Ok(())
        }
        None => Err(anyhow::anyhow!(
            session
                .error()
                .unwrap_or("detail lookup failed")
                .to_string()
        )),
    }
}

/// Bookmark a movie by id, resolving its summary through the catalog
///
/// # Errors
/// Fails when the movie cannot be resolved or the bookmark file written
async fn bookmark_add<P: CatalogProvider>(
    catalog: &P,
    bookmarks: &mut BookmarkStore,
    movie_id: u64,
) -> anyhow::Result<()> {
    if bookmarks.is_bookmarked(movie_id) {
        println!("Movie {movie_id} is already bookmarked.");
        return Ok(());
    }

    let detail = catalog
        .fetch_detail(movie_id)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    bookmarks.toggle(&detail.movie)?;
    println!("Bookmarked: {}", detail.movie.title);

    Ok(())
}

/// Remove a bookmark by id
///
/// # Errors
/// Fails when the bookmark file cannot be written
fn bookmark_remove(bookmarks: &mut BookmarkStore, movie_id: u64) -> anyhow::Result<()> {
    let Some(movie) = bookmarks.movies().find(|m| m.id == movie_id).cloned() else {
        println!("Movie {movie_id} is not bookmarked.");
        return Ok(());
    };

    bookmarks.toggle(&movie)?;
    println!("Removed bookmark: {}", movie.title);

    Ok(())
}

fn print_bookmarks(bookmarks: &BookmarkStore, find: Option<&str>) {
    println!("Bookmarked Movies");
    println!("{:-<60}", "");

    let movies: Vec<&Movie> = match find {
        Some(needle) => bookmarks.filter(needle),
        None => bookmarks.movies().collect(),
    };

    if movies.is_empty() {
        match find {
            Some(needle) => println!("No bookmarks match '{needle}'."),
            None => {
                println!("No bookmarks yet.");
                println!("Use 'marquee bookmark add <id>' to bookmark a movie.");
            }
        }
        return;
    }

    for movie in movies {
        println!("{}", format_movie_line(movie, true));
    }
}

/// One list line: bookmark marker, id, title, year, language, rating.
fn format_movie_line(movie: &Movie, bookmarked: bool) -> String {
    let marker = if bookmarked { "*" } else { " " };
    let year = movie
        .release_year()
        .map_or_else(|| "N/A".to_string(), |y| y.to_string());

    format!(
        "{marker} [{:>8}] {}  ({year}, {}, {:.1}/10)",
        movie.id, movie.title, movie.original_language, movie.vote_average
    )
}

/// Render the detail overlay as plain text.
fn render_detail(bundle: &DetailBundle) -> String {
    let detail = &bundle.detail;
    let movie = &detail.movie;
    let mut lines = Vec::new();

    lines.push(movie.title.clone());
    if let Some(tagline) = detail.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(format!("\"{tagline}\""));
    }

    let year = movie
        .release_year()
        .map_or_else(|| "N/A".to_string(), |y| y.to_string());
    let runtime = detail
        .format_runtime()
        .unwrap_or_else(|| "N/A".to_string());
    lines.push(format!(
        "{year} | {runtime} | {:.1}/10 ({} votes)",
        movie.vote_average, detail.vote_count
    ));
    lines.push(String::new());

    if let Some(overview) = detail.overview.as_deref().filter(|o| !o.is_empty()) {
        lines.push(overview.to_string());
        lines.push(String::new());
    }

    lines.push(format!("Genres:    {}", join_or_na(detail.genres.iter().map(|g| g.name.as_str()))));
    lines.push(format!(
        "Released:  {}",
        movie.release_date.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!(
        "Countries: {}",
        join_or_na(detail.production_countries.iter().map(|c| c.name.as_str()))
    ));
    lines.push(format!(
        "Status:    {}",
        detail.status.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!(
        "Languages: {}",
        join_or_na(
            detail
                .spoken_languages
                .iter()
                .map(|l| l.english_name.as_str())
        )
    ));
    lines.push(format!(
        "Budget:    {}",
        if detail.budget > 0 {
            format_money(detail.budget)
        } else {
            "N/A".to_string()
        }
    ));
    lines.push(format!(
        "Revenue:   {}",
        if detail.revenue > 0 {
            format_money(detail.revenue)
        } else {
            "N/A".to_string()
        }
    ));
    lines.push(format!(
        "Companies: {}",
        join_or_na(
            detail
                .production_companies
                .iter()
                .map(|c| c.name.as_str())
        )
    ));

    match &bundle.trailer_url {
        Some(url) => lines.push(format!("Trailer:   {url}")),
        None => lines.push("Trailer:   No trailer available.".to_string()),
    }

    lines.join("\n")
}

fn join_or_na<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = items.collect();
    if joined.is_empty() {
        "N/A".to_string()
    } else {
        joined.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use marquee_catalog::MockCatalog;

    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(500);

    #[tokio::test]
    async fn test_search_accumulates_requested_pages() {
        let catalog = MockCatalog::new();
        let controller = drive_search(&catalog, DEBOUNCE, "batman", 2).await;

        assert_eq!(controller.movies().len(), 40);
        assert!(controller.has_more());
        assert!(controller.error().is_none());
        assert_eq!(controller.debounced_query(), "batman");
    }

    #[tokio::test]
    async fn test_search_stops_at_last_page() {
        let catalog = MockCatalog::new().with_total_pages(2);
        let controller = drive_search(&catalog, DEBOUNCE, "batman", 10).await;

        assert_eq!(controller.movies().len(), 40);
        assert!(!controller.has_more());
    }

    #[tokio::test]
    async fn test_search_empty_query_browses_popular() {
        let catalog = MockCatalog::new();
        let controller = drive_search(&catalog, DEBOUNCE, "", 1).await;

        assert_eq!(controller.movies().len(), 20);
        assert!(controller.movies()[0].title.starts_with("Popular"));
    }

    #[tokio::test]
    async fn test_search_first_page_failure_reports_error() {
        let catalog = MockCatalog::new().with_failing_page(1);
        let controller = drive_search(&catalog, DEBOUNCE, "batman", 3).await;

        assert!(controller.movies().is_empty());
        assert!(controller.error().is_some());
        assert!(!controller.has_more());
    }

    #[tokio::test]
    async fn test_search_later_page_failure_keeps_prefix() {
        let catalog = MockCatalog::new().with_failing_page(2);
        let controller = drive_search(&catalog, DEBOUNCE, "batman", 3).await;

        assert_eq!(controller.movies().len(), 20);
        assert!(controller.error().is_some());
    }

    #[tokio::test]
    async fn test_bookmark_add_and_remove_round_trip() {
        let catalog = MockCatalog::new();
        let mut bookmarks = BookmarkStore::in_memory();

        bookmark_add(&catalog, &mut bookmarks, 27205).await.unwrap();
        assert!(bookmarks.is_bookmarked(27205));

        // Adding again is a no-op, not a toggle-off.
        bookmark_add(&catalog, &mut bookmarks, 27205).await.unwrap();
        assert!(bookmarks.is_bookmarked(27205));

        bookmark_remove(&mut bookmarks, 27205).unwrap();
        assert!(!bookmarks.is_bookmarked(27205));
    }

    #[tokio::test]
    async fn test_bookmark_add_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        let catalog = MockCatalog::new();

        let mut bookmarks = BookmarkStore::load(&path);
        bookmark_add(&catalog, &mut bookmarks, 27205).await.unwrap();

        let reloaded = BookmarkStore::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.is_bookmarked(27205));
    }

    #[test]
    fn test_format_movie_line() {
        let movie = Movie {
            id: 414906,
            title: "The Batman".to_string(),
            poster_path: None,
            release_date: Some("2022-03-01".to_string()),
            vote_average: 7.7,
            original_language: "en".to_string(),
        };

        let line = format_movie_line(&movie, true);
        assert!(line.starts_with('*'));
        assert!(line.contains("The Batman"));
        assert!(line.contains("2022"));
        assert!(line.contains("7.7/10"));

        let line = format_movie_line(&movie, false);
        assert!(line.starts_with(' '));
    }

    #[tokio::test]
    async fn test_render_detail_with_trailer() {
        let catalog = MockCatalog::new();
        let bundle = catalog.fetch_detail_with_trailer(603).await.unwrap();

        let rendered = render_detail(&bundle);
        assert!(rendered.contains("Popular Movie 603"));
        assert!(rendered.contains("2h 16m"));
        assert!(rendered.contains("Genres:    Action"));
        assert!(rendered.contains("Budget:    $63 Million"));
        assert!(rendered.contains("https://www.youtube.com/watch?v=abc123"));
    }

    #[tokio::test]
    async fn test_render_detail_without_trailer() {
        let catalog = MockCatalog::new().with_trailer_key(None);
        let bundle = catalog.fetch_detail_with_trailer(603).await.unwrap();

        let rendered = render_detail(&bundle);
        assert!(rendered.contains("No trailer available."));
    }
}
