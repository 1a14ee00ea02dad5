//! Error types for the roster library.

use thiserror::Error;

use crate::draft::Field;

/// Failures reading or writing the persisted collection.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The stored value is not a JSON array of employees.
    #[error("stored collection is malformed: {0}")]
    Malformed(#[source] serde_json::Error),

    /// One element of the stored array is not an employee.
    #[error("stored record {index} is malformed: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode collection: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage backend refused the operation (unavailable, quota exceeded).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Reasons a draft cannot become an [`Employee`](crate::Employee).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("required field '{}' is empty", .0.label())]
    MissingField(Field),

    #[error("unknown state code '{0}'")]
    UnknownState(String),

    #[error("unknown department '{0}'")]
    UnknownDepartment(String),
}

/// Failures of a form submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("could not publish employee: {0}")]
    Store(#[from] StoreError),

    /// Every identifier above the largest stored one is taken.
    #[error("no identifier left above {0}")]
    IdsExhausted(u64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid page size {0} (expected 10, 25, 50 or 100)")]
    PageSize(usize),
}
