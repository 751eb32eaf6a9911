//! Query validation.
//!
//! The only validation the client performs is emptiness: a query that trims
//! to nothing is rejected before any network call is made.

use std::fmt;

use thiserror::Error;

/// Errors that can occur while validating a query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The query was empty or whitespace-only.
    #[error("Please enter a query.")]
    Empty,
}

/// A validated, trimmed forecast query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Parses raw user input into a query.
    ///
    /// Surrounding whitespace is trimmed; interior whitespace is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Empty`] when the trimmed input is empty.
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
