//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::api::LocalMovieApi;
use super::error::{ApiError, TmdbError};
use super::types::{MovieCategory, MovieListResponse, MovieSummary};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Environment variable read when no API key is passed to the builder.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key, sent as the `api_key` query parameter.
    api_key: String,
    /// Response language (`language` query parameter).
    language: Option<String>,
    /// Release region (`region` query parameter).
    region: Option<String>,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    api_key_env: String,
    user_agent: Option<String>,
    timeout: Duration,
    language: Option<String>,
    region: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            api_key_env: String::from(API_KEY_ENV),
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
            language: None,
            region: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key. Takes precedence over the environment variable.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the environment variable consulted when no key is passed
    /// (default: `TMDB_API_KEY`).
    #[must_use]
    pub fn api_key_env(mut self, name: impl Into<String>) -> Self {
        self.api_key_env = name.into();
        self
    }

    /// Sets the User-Agent (default: `cinelist-api/<version>`).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the response language (e.g. "en-US").
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the release region (ISO 3166-1, e.g. "US").
    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - [`TmdbError::MissingApiKey`] if no non-empty key was passed and the
    ///   environment variable is unset or empty.
    /// - [`TmdbError::Request`] if the URL or `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient, TmdbError> {
        self.build_with_env(|name| std::env::var(name).ok())
    }

    /// Builds the client, resolving the fallback key through `lookup_env`.
    fn build_with_env<F>(self, lookup_env: F) -> Result<TmdbClient, TmdbError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let api_key = self
            .api_key
            .filter(|key| !key.is_empty())
            .or_else(|| lookup_env(&self.api_key_env).filter(|key| !key.is_empty()))
            .ok_or_else(|| TmdbError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            })?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL).map_err(|e| TmdbError::Request(Box::new(e)))?
        };

        let user_agent = self.user_agent.unwrap_or_else(|| {
            String::from(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
        });

        let http_client = Client::builder()
            .user_agent(user_agent)
            .timeout(self.timeout)
            .gzip(true)
            .build()
            .map_err(|e| TmdbError::Request(Box::new(e)))?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
            language: self.language,
            region: self.region,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Fetches movies currently in theaters.
    ///
    /// # Errors
    ///
    /// See [`LocalMovieApi::movie_list`].
    pub async fn now_playing(&self) -> Result<Vec<MovieSummary>, TmdbError> {
        self.movie_list(MovieCategory::NowPlaying).await
    }

    /// Fetches popular movies.
    ///
    /// # Errors
    ///
    /// See [`LocalMovieApi::movie_list`].
    pub async fn popular(&self) -> Result<Vec<MovieSummary>, TmdbError> {
        self.movie_list(MovieCategory::Popular).await
    }

    /// Fetches top rated movies.
    ///
    /// # Errors
    ///
    /// See [`LocalMovieApi::movie_list`].
    pub async fn top_rated(&self) -> Result<Vec<MovieSummary>, TmdbError> {
        self.movie_list(MovieCategory::TopRated).await
    }

    /// Fetches upcoming movies.
    ///
    /// # Errors
    ///
    /// See [`LocalMovieApi::movie_list`].
    pub async fn upcoming(&self) -> Result<Vec<MovieSummary>, TmdbError> {
        self.movie_list(MovieCategory::Upcoming).await
    }

    /// Sends a single GET with the API key and optional language/region
    /// query params, and decodes the JSON body. No retries.
    #[instrument(skip_all, fields(path = path))]
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TmdbError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TmdbError::Request(Box::new(e)))?;

        let mut query: Vec<(&str, &str)> = vec![("api_key", self.api_key.as_str())];
        if let Some(ref language) = self.language {
            query.push(("language", language.as_str()));
        }
        if let Some(ref region) = self.region {
            query.push(("region", region.as_str()));
        }

        let request = self
            .http_client
            .get(url)
            .query(&query)
            .build()
            .map_err(TmdbError::from_transport)?;

        // The full URL carries the API key; log the path only.
        tracing::debug!(path, "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(TmdbError::from_transport)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            tracing::debug!(%status, "TMDB API error response");
            return Err(ApiError::from_response(status, &body).into());
        }

        let body = response.text().await.map_err(TmdbError::from_transport)?;
        serde_json::from_str(&body).map_err(|e| TmdbError::Request(Box::new(e)))
    }
}

impl LocalMovieApi for TmdbClient {
    #[instrument(skip_all, fields(category = %category))]
    async fn movie_list(&self, category: MovieCategory) -> Result<Vec<MovieSummary>, TmdbError> {
        let response: MovieListResponse = self.get_json(category.path()).await?;
        tracing::debug!(
            page = response.page,
            total_pages = response.total_pages,
            total_results = response.total_results,
            "TMDB movie list received"
        );
        Ok(response.into_results())
    }
}
