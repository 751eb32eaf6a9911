//! Constants for the backend module (endpoint, filename, timeouts).

/// Default forecast endpoint (local backend service).
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/forecast_from_prompt";

/// Default filename for the saved spreadsheet.
pub const DEFAULT_FILENAME: &str = "forecast.xlsx";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes; forecast generation can be slow).
pub const READ_TIMEOUT_SECS: u64 = 300;
