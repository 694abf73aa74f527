//! Plain-text rendering of movie listings.

use std::borrow::Cow;
use std::io::{self, Write};

use cinelist_api::tmdb::MovieSummary;

/// Width of the banner and separator rules.
const RULE_WIDTH: usize = 80;

/// Overviews longer than this many characters are truncated.
const OVERVIEW_MAX_CHARS: usize = 150;

/// Characters kept from a truncated overview before the ellipsis.
const OVERVIEW_KEEP_CHARS: usize = 147;

/// Placeholder for a missing title, release date or rating.
const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a missing overview.
const NO_OVERVIEW: &str = "No overview available.";

/// Writes the listing: a count banner, then one numbered block per movie
/// followed by a separator rule. Prints `No movies found.` for an empty list.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_movies<W: Write>(out: &mut W, movies: &[MovieSummary]) -> io::Result<()> {
    if movies.is_empty() {
        return writeln!(out, "No movies found.");
    }

    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{heavy}")?;
    writeln!(out, "Found {} movies:", movies.len())?;
    writeln!(out, "{heavy}")?;
    writeln!(out)?;

    for (index, movie) in (1_usize..).zip(movies) {
        writeln!(
            out,
            "{index}. {}",
            movie.title.as_deref().unwrap_or(NOT_AVAILABLE)
        )?;
        writeln!(
            out,
            "   Release Date: {}",
            movie.release_date.as_deref().unwrap_or(NOT_AVAILABLE)
        )?;
        writeln!(out, "   Rating: {}/10", format_rating(movie.vote_average))?;
        writeln!(
            out,
            "   Overview: {}",
            movie
                .overview
                .as_deref()
                .map_or(Cow::Borrowed(NO_OVERVIEW), truncate_overview)
        )?;
        writeln!(out, "{light}")?;
    }

    Ok(())
}

/// Cuts overviews longer than 150 characters down to 147 plus `...`.
#[must_use]
pub fn truncate_overview(overview: &str) -> Cow<'_, str> {
    if overview.chars().count() <= OVERVIEW_MAX_CHARS {
        return Cow::Borrowed(overview);
    }
    let mut truncated: String = overview.chars().take(OVERVIEW_KEEP_CHARS).collect();
    truncated.push_str("...");
    Cow::Owned(truncated)
}

/// Formats a vote average with at least one decimal, or `N/A`.
#[must_use]
pub fn format_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(value) if value.fract().abs() < f64::EPSILON => format!("{value:.1}"),
        Some(value) => value.to_string(),
        None => String::from(NOT_AVAILABLE),
    }
}
