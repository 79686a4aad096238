//! Movie domain types shared across the Marquee crates.
//!
//! Field names follow the catalog API wire format, so the same types
//! deserialize API payloads and serialize the persisted bookmark file.

use serde::{Deserialize, Serialize};

/// Movie summary as returned by list endpoints.
///
/// Immutable once received; identified uniquely by `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Unique catalog identifier
    pub id: u64,
    /// Display title
    pub title: String,
    /// Poster image path, relative to the image base URL
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Release date as `YYYY-MM-DD`
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average rating on a 0-10 scale
    #[serde(default)]
    pub vote_average: f64,
    /// Original language code (ISO 639-1)
    #[serde(default)]
    pub original_language: String,
}

impl Movie {
    /// Release year parsed from the release date, if present.
    pub fn release_year(&self) -> Option<u16> {
        self.release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .and_then(|year| year.parse().ok())
    }

    /// Full poster URL against the given image base, if the movie has one.
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{image_base_url}{path}"))
    }
}

/// Genre classification entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
}

/// Production country entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

/// Spoken language entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    pub english_name: String,
}

/// Full movie detail as returned by the per-movie endpoint.
///
/// Superset of the summary; fetched on demand for a selected movie and
/// discarded when the selection clears.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    /// Summary fields, flattened in the wire payload
    #[serde(flatten)]
    pub movie: Movie,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Plot overview
    #[serde(default)]
    pub overview: Option<String>,
    /// Marketing tagline
    #[serde(default)]
    pub tagline: Option<String>,
    /// Production budget in dollars (0 when unknown)
    #[serde(default)]
    pub budget: u64,
    /// Box office revenue in dollars (0 when unknown)
    #[serde(default)]
    pub revenue: u64,
    /// Release status, e.g. "Released"
    #[serde(default)]
    pub status: Option<String>,
    /// Genre list
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// Production company list
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    /// Production country list
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    /// Spoken language list
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    /// Total number of votes behind the average rating
    #[serde(default)]
    pub vote_count: u64,
}

impl MovieDetail {
    /// Format runtime as "2h 16m"; None when the runtime is unknown.
    pub fn format_runtime(&self) -> Option<String> {
        self.runtime
            .map(|minutes| format!("{}h {}m", minutes / 60, minutes % 60))
    }
}

/// One page of catalog results plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    /// Movies on this page, in catalog order
    pub movies: Vec<Movie>,
    /// Page number this response covers (1-based)
    pub page: u32,
    /// Total number of pages reported by the catalog
    pub total_pages: u32,
}

impl MoviePage {
    /// Whether more pages exist beyond this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Format a dollar amount as a humanized string, e.g. "$1.50 Billion".
///
/// Whole multiples of the unit drop the decimals ("$63 Million").
pub fn format_money(amount: u64) -> String {
    const UNITS: [(u64, &str); 3] = [
        (1_000_000_000, "Billion"),
        (1_000_000, "Million"),
        (1_000, "Thousand"),
    ];

    for (scale, label) in UNITS {
        if amount >= scale {
            let value = amount as f64 / scale as f64;
            return if amount % scale == 0 {
                format!("${value:.0} {label}")
            } else {
                format!("${value:.2} {label}")
            };
        }
    }

    format!("${amount}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_movie() -> Movie {
        Movie {
            id: 603,
            title: "The Matrix".to_string(),
            poster_path: Some("/matrix.jpg".to_string()),
            release_date: Some("1999-03-30".to_string()),
            vote_average: 8.2,
            original_language: "en".to_string(),
        }
    }

    #[test]
    fn test_release_year() {
        assert_eq!(sample_movie().release_year(), Some(1999));

        let mut undated = sample_movie();
        undated.release_date = None;
        assert_eq!(undated.release_year(), None);

        let mut garbled = sample_movie();
        garbled.release_date = Some("soon".to_string());
        assert_eq!(garbled.release_year(), None);
    }

    #[test]
    fn test_poster_url() {
        let movie = sample_movie();
        assert_eq!(
            movie.poster_url("https://image.tmdb.org/t/p/w500"),
            Some("https://image.tmdb.org/t/p/w500/matrix.jpg".to_string())
        );

        let mut posterless = sample_movie();
        posterless.poster_path = None;
        assert_eq!(posterless.poster_url("https://image.tmdb.org/t/p/w500"), None);
    }

    #[test]
    fn test_page_has_more() {
        let page = MoviePage {
            movies: Vec::new(),
            page: 1,
            total_pages: 5,
        };
        assert!(page.has_more());

        let last = MoviePage {
            movies: Vec::new(),
            page: 5,
            total_pages: 5,
        };
        assert!(!last.has_more());
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1_500_000_000), "$1.50 Billion");
        assert_eq!(format_money(63_000_000), "$63 Million");
        assert_eq!(format_money(825_532_764), "$825.53 Million");
        assert_eq!(format_money(12_500), "$12.50 Thousand");
        assert_eq!(format_money(999), "$999");
    }

    #[test]
    fn test_format_runtime() {
        let detail = MovieDetail {
            movie: sample_movie(),
            runtime: Some(136),
            overview: None,
            tagline: None,
            budget: 0,
            revenue: 0,
            status: None,
            genres: Vec::new(),
            production_companies: Vec::new(),
            production_countries: Vec::new(),
            spoken_languages: Vec::new(),
            vote_count: 0,
        };

        assert_eq!(detail.format_runtime(), Some("2h 16m".to_string()));
    }

    #[test]
    fn test_detail_deserializes_flattened_summary() {
        let payload = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/matrix.jpg",
            "release_date": "1999-03-30",
            "vote_average": 8.2,
            "original_language": "en",
            "runtime": 136,
            "overview": "A computer hacker learns the truth.",
            "tagline": "Free your mind",
            "budget": 63000000,
            "revenue": 463517383,
            "status": "Released",
            "genres": [{"id": 28, "name": "Action"}],
            "production_companies": [{"id": 79, "name": "Village Roadshow Pictures"}],
            "production_countries": [{"iso_3166_1": "US", "name": "United States of America"}],
            "spoken_languages": [{"iso_639_1": "en", "english_name": "English"}],
            "vote_count": 26000
        }"#;

        let detail: MovieDetail = serde_json::from_str(payload).unwrap();

        assert_eq!(detail.movie.id, 603);
        assert_eq!(detail.movie.title, "The Matrix");
        assert_eq!(detail.runtime, Some(136));
        assert_eq!(detail.genres[0].name, "Action");
        assert_eq!(detail.spoken_languages[0].english_name, "English");
    }
}
