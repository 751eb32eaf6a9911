//! Search-and-download controller.
//!
//! One call per submitted query: validate, report Loading, fetch and save,
//! report Done or Error. Every completed interaction leaves the sink in a
//! non-Loading state, and the controller stays usable after any failure.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, instrument};

use crate::backend::BackendClient;
use crate::query::Query;
use crate::status::{Status, StatusSink};

/// Result of one `handle_search` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The forecast was fetched and saved to this path.
    Saved(PathBuf),
    /// The query was empty; no request was made.
    Rejected,
    /// The request or the save failed; the sink received the banner message.
    Failed,
    /// Another search was already in flight; the call was a no-op.
    Ignored,
}

/// Controller wiring a query source to the backend and a status sink.
///
/// UI handles are injected (the sink) rather than resolved from any global
/// registry. At most one request is in flight at a time: a search submitted
/// while another is outstanding is ignored, so the running interaction alone
/// decides the final status.
pub struct SearchController<S: StatusSink> {
    client: BackendClient,
    sink: S,
    output_dir: PathBuf,
    filename: String,
    in_flight: AtomicBool,
}

impl<S: StatusSink> SearchController<S> {
    /// Creates a controller over the given client and sink.
    pub fn new(
        client: BackendClient,
        sink: S,
        output_dir: impl Into<PathBuf>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            client,
            sink,
            output_dir: output_dir.into(),
            filename: filename.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Handles one submitted query.
    ///
    /// Empty input produces an error banner without touching the network.
    /// Otherwise the sink sees Loading, then exactly one of Done or Error;
    /// the loading indicator is cleared on every path.
    #[instrument(skip(self, raw_query))]
    pub async fn handle_search(&self, raw_query: &str) -> SearchOutcome {
        let query = match Query::parse(raw_query) {
            Ok(query) => query,
            Err(err) => {
                self.sink.transition(&Status::Error(err.to_string()));
                return SearchOutcome::Rejected;
            }
        };

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("search ignored; a request is already in flight");
            return SearchOutcome::Ignored;
        };

        self.sink.transition(&Status::Loading);
        debug!(query = %query, "search started");

        match self
            .client
            .download_forecast(&query, &self.output_dir, &self.filename)
            .await
        {
            Ok(saved) => {
                self.sink.transition(&Status::Done(saved.path.clone()));
                SearchOutcome::Saved(saved.path)
            }
            Err(err) => {
                debug!(error = %err, "search failed");
                self.sink.transition(&Status::Error(err.banner_message()));
                SearchOutcome::Failed
            }
        }
    }

    /// Returns the injected status sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Releases the in-flight flag when the interaction ends, on every path.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
