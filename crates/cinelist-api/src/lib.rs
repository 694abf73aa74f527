//! API client library for cinelist.
//!
//! Provides a client for the TMDB movie listing endpoints.

/// TMDB API client.
pub mod tmdb;
