//! Forecaster Core Library
//!
//! This library provides the core functionality for the forecaster client,
//! which sends a natural-language query to a forecast backend and saves the
//! returned spreadsheet to disk.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`backend`] - HTTP client for the forecast endpoint with streaming save
//! - [`controller`] - Search-and-download flow over an injected status sink
//! - [`query`] - Query trimming and emptiness validation
//! - [`status`] - Interaction status model and the `StatusSink` seam
//! - [`ui`] - Terminal status sink (spinner + banner)

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod controller;
pub mod query;
pub mod status;
pub mod ui;
mod user_agent;

// Re-export commonly used types
pub use backend::{
    BackendClient, CONNECT_TIMEOUT_SECS, DEFAULT_ENDPOINT, DEFAULT_FILENAME, FetchError,
    READ_TIMEOUT_SECS, SaveResult,
};
pub use controller::{SearchController, SearchOutcome};
pub use query::{Query, QueryError};
pub use status::{Status, StatusSink, sanitize_banner_text};
pub use ui::TerminalUi;
