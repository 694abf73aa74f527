//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::TmdbError;
use super::types::{MovieCategory, MovieSummary};

/// TMDB movie listing trait.
///
/// Abstracts the listing fetch for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Fetches the first results page of a listing category.
    ///
    /// Returns an empty list when the response carries no `results`.
    ///
    /// # Errors
    ///
    /// Returns a [`TmdbError`] on timeout, connection failure, HTTP error
    /// status, or an undecodable body.
    async fn movie_list(&self, category: MovieCategory) -> Result<Vec<MovieSummary>, TmdbError>;
}
