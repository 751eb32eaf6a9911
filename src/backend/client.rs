//! HTTP client wrapper for the forecast endpoint.
//!
//! This module provides the `BackendClient` struct which issues the forecast
//! request with proper timeout configuration and error classification.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::FetchError;
use super::save::{SaveResult, save_response};
use crate::query::Query;
use crate::user_agent;

/// JSON body of the forecast request.
#[derive(Debug, Serialize)]
struct PromptBody<'a> {
    prompt: &'a str,
}

/// JSON body of an error response; `detail` is optional.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

/// HTTP client for the forecast backend.
///
/// Created once and reused across interactions, taking advantage of
/// connection pooling.
///
/// # Example
///
/// ```no_run
/// use forecaster_core::backend::{BackendClient, DEFAULT_ENDPOINT, DEFAULT_FILENAME};
/// use forecaster_core::query::Query;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BackendClient::new(DEFAULT_ENDPOINT)?;
/// let query = Query::parse("6 month revenue forecast")?;
/// let saved = client
///     .download_forecast(&query, Path::new("."), DEFAULT_FILENAME)
///     .await?;
/// println!("Saved to: {}", saved.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    endpoint: Url,
}

impl BackendClient {
    /// Creates a new client for the given endpoint with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidEndpoint`] when the endpoint is not a
    /// valid URL, or [`FetchError::Network`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(endpoint: &str) -> Result<Self, FetchError> {
        Self::with_timeouts(endpoint, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a new client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`new`](Self::new).
    pub fn with_timeouts(
        endpoint: &str,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let endpoint =
            Url::parse(endpoint).map_err(|_| FetchError::invalid_endpoint(endpoint))?;
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|e| FetchError::network(endpoint.as_str(), e))?;
        Ok(Self { client, endpoint })
    }

    /// Returns the endpoint host for display purposes.
    #[must_use]
    pub fn host(&self) -> &str {
        self.endpoint.host_str().unwrap_or("backend")
    }

    /// Returns the configured endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Sends the forecast request and returns the raw 2xx response.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if:
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx); the JSON `detail`
    ///   field is extracted when the body allows it
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    pub async fn fetch_forecast(&self, query: &Query) -> Result<reqwest::Response, FetchError> {
        debug!("sending forecast request");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&PromptBody {
                prompt: query.as_str(),
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::timeout(self.endpoint.as_str())
                } else {
                    FetchError::network(self.endpoint.as_str(), e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = extract_error_detail(response).await;
            debug!(status = status.as_u16(), ?detail, "backend returned error status");
            return Err(FetchError::http_status(
                self.endpoint.as_str(),
                status.as_u16(),
                detail,
            ));
        }

        Ok(response)
    }

    /// Fetches the forecast and streams it to a file in `output_dir`.
    ///
    /// The filename comes from the response `Content-Disposition` header when
    /// present, otherwise `fallback_filename`; an existing file is never
    /// overwritten (a numeric suffix is added instead).
    ///
    /// # Errors
    ///
    /// Returns the errors of [`fetch_forecast`](Self::fetch_forecast), plus
    /// [`FetchError::Io`] when writing to disk fails.
    #[must_use = "save result contains the path to the saved forecast"]
    #[instrument(skip(self, query), fields(endpoint = %self.endpoint))]
    pub async fn download_forecast(
        &self,
        query: &Query,
        output_dir: &Path,
        fallback_filename: &str,
    ) -> Result<SaveResult, FetchError> {
        let response = self.fetch_forecast(query).await?;
        save_response(response, output_dir, fallback_filename).await
    }
}

/// Reads a non-2xx response body and extracts its JSON `detail` field.
///
/// Returns `None` when the body cannot be read, is not JSON, or carries no
/// non-empty `detail`.
async fn extract_error_detail(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let parsed: ErrorBody = serde_json::from_str(&body).ok()?;
    parsed.detail.filter(|detail| !detail.trim().is_empty())
}
