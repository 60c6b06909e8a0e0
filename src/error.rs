//! Custom error types for rustmedai.
//!
//! This module defines all error types used throughout the application.
//! All functions return `Result<T, MedaiError>` instead of using `unwrap()`.

use thiserror::Error;

/// Main error type for rustmedai operations.
///
/// Only `Config`, `Parse`, `Csv` and `Io` are fatal to a caller. The others are
/// reported per query or per node and never abort sibling work.
#[derive(Debug, Error)]
pub enum MedaiError {
    /// Venue id not present in the registry
    #[error("unavailable conference '{venue}'")]
    UnknownVenue {
        /// The lower-cased venue id as requested
        venue: String,
    },

    /// Fetching the listing page failed
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A located node lacks the structure its source adapter expects
    #[error("unexpected page structure at '{hop}' for \"{title}\"")]
    AdapterMismatch {
        /// The traversal step that found nothing
        hop: &'static str,
        /// Title of the offending node
        title: String,
    },

    /// Selector or markup handling error
    #[error("Parse error: {0}")]
    Parse(String),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// A query task died before producing a result
    #[error("query task failed: {0}")]
    Task(String),
}

/// Failure of the fetch collaborator.
///
/// `Display` matches the user-visible error line without its `Error: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Server answered with a non-success status
    #[error("{status} {reason}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase
        reason: String,
    },

    /// No usable response (DNS, connect, TLS, timeout, body read)
    #[error("{reason}")]
    Connection {
        /// Human-readable cause
        reason: String,
    },
}

/// Result type alias using `MedaiError`
pub type Result<T> = std::result::Result<T, MedaiError>;

/// Extension trait for adding context to Option types
pub trait OptionExt<T> {
    /// Convert Option to Result with an adapter mismatch at `hop`
    fn ok_or_mismatch(self, hop: &'static str, title: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_mismatch(self, hop: &'static str, title: &str) -> Result<T> {
        self.ok_or_else(|| MedaiError::AdapterMismatch {
            hop,
            title: title.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let http = TransportError::Http {
            status: 404,
            reason: "Not Found".to_string(),
        };
        assert_eq!(http.to_string(), "404 Not Found");

        let conn = TransportError::Connection {
            reason: "connection refused".to_string(),
        };
        assert_eq!(MedaiError::from(conn).to_string(), "connection refused");
    }

    #[test]
    fn test_ok_or_mismatch() {
        let missing: Option<u8> = None;
        match missing.ok_or_mismatch("nav", "Some Title") {
            Err(MedaiError::AdapterMismatch { hop, title }) => {
                assert_eq!(hop, "nav");
                assert_eq!(title, "Some Title");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert_eq!(Some(3).ok_or_mismatch("nav", "t").ok(), Some(3));
    }
}
