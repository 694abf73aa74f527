//! TMDB movie list response types and listing categories.

use std::fmt;

use serde::Deserialize;

// --- Categories ---

/// A TMDB movie listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieCategory {
    /// Movies currently in theaters (`movie/now_playing`).
    NowPlaying,
    /// Popular movies (`movie/popular`).
    Popular,
    /// Top rated movies (`movie/top_rated`).
    TopRated,
    /// Upcoming releases (`movie/upcoming`).
    Upcoming,
}

impl MovieCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::NowPlaying, Self::Popular, Self::TopRated, Self::Upcoming];

    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::NowPlaying => "movie/now_playing",
            Self::Popular => "movie/popular",
            Self::TopRated => "movie/top_rated",
            Self::Upcoming => "movie/upcoming",
        }
    }

    /// Command-line selector name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NowPlaying => "now-playing",
            Self::Popular => "popular",
            Self::TopRated => "top-rated",
            Self::Upcoming => "upcoming",
        }
    }

    /// Heading printed above a listing.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NowPlaying => "Now Playing Movies",
            Self::Popular => "Popular Movies",
            Self::TopRated => "Top Rated Movies",
            Self::Upcoming => "Upcoming Movies",
        }
    }
}

impl fmt::Display for MovieCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Movie list ---

/// Response from the `movie/{category}` list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieListResponse {
    /// Current page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Movies on this page. `None` when the key is missing or null.
    #[serde(default)]
    pub results: Option<Vec<MovieSummary>>,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: Option<u32>,
    /// Total number of results.
    #[serde(default)]
    pub total_results: Option<u32>,
}

impl MovieListResponse {
    /// Consumes the response, yielding its movies (empty when absent).
    #[must_use]
    pub fn into_results(self) -> Vec<MovieSummary> {
        self.results.unwrap_or_default()
    }
}

/// The subset of a TMDB movie record this tool displays.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// Localized title.
    #[serde(default)]
    pub title: Option<String>,
    /// Release date as sent by TMDB (YYYY-MM-DD, not parsed).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Average vote, 0 to 10.
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]

    use super::*;

    #[test]
    fn test_category_paths_are_distinct() {
        // Arrange
        let mut paths: Vec<&str> = MovieCategory::ALL.iter().map(|c| c.path()).collect();

        // Act
        paths.sort_unstable();
        paths.dedup();

        // Assert
        assert_eq!(paths.len(), MovieCategory::ALL.len());
    }

    #[test]
    fn test_category_display_uses_selector() {
        assert_eq!(MovieCategory::NowPlaying.to_string(), "now-playing");
        assert_eq!(MovieCategory::TopRated.to_string(), "top-rated");
        assert_eq!(MovieCategory::Upcoming.title(), "Upcoming Movies");
    }

    #[test]
    fn test_parse_popular_fixture() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_popular.json");

        // Act
        let response: MovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.page, Some(1));
        let movies = response.into_results();
        assert_eq!(movies.len(), 3);
        assert_eq!(movies[0].title.as_deref(), Some("The Long Night Shift"));
        assert_eq!(movies[0].release_date.as_deref(), Some("2025-03-14"));
    }

    #[test]
    fn test_missing_fields_decode_to_none() {
        // Arrange
        let json = include_str!("../../../../fixtures/tmdb/movie_missing_fields.json");

        // Act
        let movies = serde_json::from_str::<MovieListResponse>(json)
            .unwrap()
            .into_results();

        // Assert
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0], MovieSummary::default());
        assert!(movies[1].title.is_some());
        assert!(movies[1].overview.is_none());
        assert!(movies[1].vote_average.is_none());
    }

    #[test]
    fn test_missing_results_yields_empty() {
        // Arrange
        let json = r#"{"page":1,"total_pages":0,"total_results":0}"#;

        // Act
        let response: MovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.into_results().is_empty());
    }

    #[test]
    fn test_null_results_yields_empty() {
        // Arrange
        let json = r#"{"results":null}"#;

        // Act
        let response: MovieListResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert!(response.into_results().is_empty());
    }

    #[test]
    fn test_parse_error_response() {
        // Arrange
        let json = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let error: TmdbErrorResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(error.status_code, 7);
        assert!(error.status_message.contains("Invalid API key"));
    }
}
