//! HTTP client for the forecast backend.
//!
//! This module sends the forecast request and streams the binary response to
//! disk.
//!
//! # Features
//!
//! - Single `POST` with a JSON `{"prompt": ...}` body
//! - Structured error types carrying the server's `detail` message
//! - Streaming save (memory-efficient for large spreadsheets)
//! - Configurable timeouts (30s connect, 5min read by default)
//! - Duplicate filename handling (adds numeric suffix)

mod client;
mod constants;
mod error;
mod save;

pub use client::BackendClient;
pub use constants::{CONNECT_TIMEOUT_SECS, DEFAULT_ENDPOINT, DEFAULT_FILENAME, READ_TIMEOUT_SECS};
pub use error::FetchError;
pub use save::SaveResult;
