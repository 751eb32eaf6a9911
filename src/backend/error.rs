//! Error types for the backend module.
//!
//! Two user-visible error kinds exist: validation (handled in `query`) and
//! request failures, which all map to a banner message here.

use std::path::PathBuf;

use thiserror::Error;

use crate::status::sanitize_banner_text;

/// Generic banner text for a non-2xx response without a usable `detail`.
const GENERIC_HTTP_ERROR: &str = "Network response was not ok";

/// Banner prefix for transport and body-processing failures.
const FETCH_FAILURE_PREFIX: &str = "Failed to fetch data. Please check the backend service. Error: ";

/// Errors that can occur while fetching or saving a forecast.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The endpoint that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The endpoint that timed out.
        url: String,
    },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// The endpoint that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The server's JSON `detail` field, when present and parseable.
        detail: Option<String>,
    },

    /// File system error while saving the response (create file, write, etc.)
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configured endpoint is not a valid URL.
    #[error("invalid endpoint URL: {url}")]
    InvalidEndpoint {
        /// The invalid URL string.
        url: String,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an HTTP status error with an optional server detail message.
    pub fn http_status(url: impl Into<String>, status: u16, detail: Option<String>) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
            detail,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid endpoint error.
    pub fn invalid_endpoint(url: impl Into<String>) -> Self {
        Self::InvalidEndpoint { url: url.into() }
    }

    /// Returns the banner message for this error.
    ///
    /// Non-2xx responses show the server's sanitized `detail` text verbatim,
    /// falling back to a generic message; everything else is prefixed with
    /// the fetch-failure text.
    #[must_use]
    pub fn banner_message(&self) -> String {
        match self {
            Self::HttpStatus {
                detail: Some(detail),
                ..
            } => sanitize_banner_text(detail),
            Self::HttpStatus { detail: None, .. } => GENERIC_HTTP_ERROR.to_string(),
            other => format!("{FETCH_FAILURE_PREFIX}{other}"),
        }
    }
}

// Note on From trait implementations: no `From<reqwest::Error>` or
// `From<std::io::Error>` because the variants require context (url, path)
// the source errors don't carry. The helper constructors are the seam.
