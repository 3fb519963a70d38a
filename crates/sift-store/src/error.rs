//! Store error types.

use sift_expr::ValidationError;
use thiserror::Error;

/// Named filter store errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage layer error.
    #[error("storage error: {0}")]
    Storage(#[from] sled::Error),

    /// Library (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// No filter stored under the name.
    #[error("no filter named `{0}`")]
    NotFound(String),

    /// Create-only save against an existing name.
    #[error("a filter named `{0}` already exists")]
    DuplicateName(String),

    /// The filter failed normalization and was not persisted.
    #[error("invalid filter: {}", sift_expr::ErrorList(.0))]
    Invalid(Vec<ValidationError>),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
