//! TMDB client error types.

use reqwest::StatusCode;
use thiserror::Error;

use super::types::TmdbErrorResponse;

/// Errors returned by [`TmdbClient`](super::TmdbClient).
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// No API key was passed and the fallback environment variable is unset.
    #[error("TMDB API key is required. Set {env_var} environment variable or pass it directly.")]
    MissingApiKey {
        /// Environment variable consulted for the key.
        env_var: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out. Please check your internet connection.")]
    Timeout(#[source] reqwest::Error),

    /// The TMDB host could not be reached.
    #[error("Failed to connect to TMDB API. Please check your internet connection.")]
    Connect(#[source] reqwest::Error),

    /// TMDB answered with an HTTP error status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Any other failure (request build, body read, JSON decode).
    #[error("An error occurred: {0}")]
    Request(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TmdbError {
    /// Classifies a transport-level `reqwest` error.
    ///
    /// The URL is stripped since its query string carries the API key.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_connect() {
            Self::Connect(err)
        } else {
            Self::Request(Box::new(err))
        }
    }

    /// Environment variable to set, if this is a missing-key error.
    #[must_use]
    pub fn missing_api_key_env(&self) -> Option<&str> {
        match self {
            Self::MissingApiKey { env_var } => Some(env_var),
            _ => None,
        }
    }
}

/// HTTP error status returned by TMDB.
///
/// 4xx and 5xx are not told apart beyond the 401 and 404 cases.
#[derive(Debug, Error, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum ApiError {
    /// HTTP 401.
    #[error("Invalid API key. Please check your TMDB_API_KEY.")]
    Unauthorized,

    /// HTTP 404.
    #[error("Resource not found.")]
    NotFound,

    /// Any other status >= 400.
    #[error("HTTP error occurred: {status}: {detail}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// TMDB `status_message`, or the raw body when it is not TMDB JSON.
        detail: String,
    },
}

impl ApiError {
    /// Builds the error for a failed response from its status and body.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let detail = serde_json::from_str::<TmdbErrorResponse>(body).map_or_else(
                    |_| {
                        let trimmed = body.trim();
                        if trimmed.is_empty() {
                            String::from(status.canonical_reason().unwrap_or("no detail"))
                        } else {
                            String::from(trimmed)
                        }
                    },
                    |e| format!("code={}, message={}", e.status_code, e.status_message),
                );
                Self::Status { status, detail }
            }
        }
    }

    /// HTTP status behind this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Status { status, .. } => *status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_has_specialized_message() {
        // Arrange
        let body = r#"{"status_code":7,"status_message":"Invalid API key: You must be granted a valid key.","success":false}"#;

        // Act
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, body);

        // Assert
        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(
            err.to_string(),
            "Invalid API key. Please check your TMDB_API_KEY."
        );
        assert!(!err.to_string().contains("HTTP error occurred"));
    }

    #[test]
    fn test_not_found() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "");

        assert_eq!(err, ApiError::NotFound);
        assert_eq!(err.to_string(), "Resource not found.");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_status_uses_tmdb_message() {
        // Arrange
        let body = r#"{"status_code":11,"status_message":"Internal error: Something went wrong.","success":false}"#;

        // Act
        let err = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, body);

        // Assert
        let message = err.to_string();
        assert!(message.starts_with("HTTP error occurred: 500 Internal Server Error"));
        assert!(message.contains("code=11"));
        assert!(message.contains("Something went wrong"));
    }

    #[test]
    fn test_other_status_with_plain_body() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "  upstream down \n");

        assert_eq!(
            err,
            ApiError::Status {
                status: StatusCode::BAD_GATEWAY,
                detail: String::from("upstream down"),
            }
        );
    }

    #[test]
    fn test_other_status_with_empty_body_uses_reason() {
        let err = ApiError::from_response(StatusCode::FORBIDDEN, "");

        assert_eq!(err.to_string(), "HTTP error occurred: 403 Forbidden: Forbidden");
    }

    #[test]
    fn test_missing_api_key_names_env_var() {
        // Arrange
        let err = TmdbError::MissingApiKey {
            env_var: String::from("TMDB_API_KEY"),
        };

        // Act & Assert
        assert_eq!(err.missing_api_key_env(), Some("TMDB_API_KEY"));
        assert!(err.to_string().contains("Set TMDB_API_KEY environment variable"));
        assert_eq!(TmdbError::from(ApiError::NotFound).missing_api_key_env(), None);
    }

    #[test]
    fn test_api_error_display_is_transparent() {
        let err = TmdbError::from(ApiError::Unauthorized);

        assert_eq!(
            err.to_string(),
            "Invalid API key. Please check your TMDB_API_KEY."
        );
    }
}
