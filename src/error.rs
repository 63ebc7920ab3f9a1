//! Error handling for TraceVis-RS
//!
//! This module defines the error taxonomy for the ingestion side of the
//! application and a Result alias used throughout the crate.
//!
//! End of stream is not an error: sources report it as `Ok(None)`.
//! Geometric edge cases in the simplifier are ordinary branches and never
//! surface here either.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for TraceVis-RS operations
#[derive(Error, Debug)]
pub enum TraceVisError {
    /// A sample record could not be parsed. Fatal for the whole session.
    #[error("Malformed sample on line {line} ({content:?}): {reason}")]
    MalformedSample {
        line: usize,
        content: String,
        reason: String,
    },

    /// The sample source could not be opened
    #[error("Sample source unavailable at {path:?}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors related to channel communication
    #[error("Channel error: {0}")]
    Channel(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TraceVisError>,
    },
}

impl TraceVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TraceVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a malformed-sample error for a 1-based line number
    pub fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        TraceVisError::MalformedSample {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error ends ingestion for the session
    pub fn is_fatal(&self) -> bool {
        match self {
            TraceVisError::MalformedSample { .. } | TraceVisError::SourceUnavailable { .. } => true,
            TraceVisError::WithContext { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

/// Result type alias for TraceVis-RS operations
pub type Result<T> = std::result::Result<T, TraceVisError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
