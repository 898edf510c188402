// Error types for the ingestion/reporting pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, RcpError>;

/// Errors that can occur while ingesting or querying badge events
#[derive(Debug, Error)]
pub enum RcpError {
    /// No candidate encoding decoded the events file
    #[error("events file did not decode with any supported encoding")]
    Decode,

    /// The events file contained zero valid rows after filtering
    #[error("no valid data rows found in events file")]
    EmptyBatch,

    /// A field value that must parse (id_point, time, date) did not
    #[error("invalid {field} value: {value:?}")]
    RowValue { field: &'static str, value: String },

    /// Read or write failure against the event store
    #[error("storage error: {0}")]
    Storage(String),

    /// A reporting query was given an unusable date or month
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem failure (events file read, archive move)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RcpError {
    /// Create a row value error
    pub fn row_value(field: &'static str, value: impl Into<String>) -> Self {
        RcpError::RowValue {
            field,
            value: value.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        RcpError::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        RcpError::Config(msg.into())
    }

    /// Create an invalid date error
    pub fn invalid_date(msg: impl Into<String>) -> Self {
        RcpError::InvalidDate(msg.into())
    }
}
