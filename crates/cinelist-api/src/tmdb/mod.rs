//! TMDB API client module.
//!
//! Handles HTTP requests to the TMDB API v3 movie list endpoints
//! (now playing, popular, top rated, upcoming).

mod api;
mod client;
mod error;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{API_KEY_ENV, DEFAULT_TIMEOUT, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{ApiError, TmdbError};
pub use types::{MovieCategory, MovieListResponse, MovieSummary};
