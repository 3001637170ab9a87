//! Error types for dataset loading and projection requests

use thiserror::Error;

/// Errors raised by the library
#[derive(Error, Debug)]
pub enum Error {
    /// A projection parameter could not be coerced to its numeric type.
    /// Raised before the table is touched.
    #[error("Invalid input for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The dataset does not have the shape an earnings table needs
    #[error("Dataset error: {0}")]
    Dataset(String),
}

impl Error {
    pub fn invalid_input(field: &'static str, value: impl Into<String>) -> Self {
        Error::InvalidInput {
            field,
            value: value.into(),
        }
    }

    pub fn dataset(message: impl Into<String>) -> Self {
        Error::Dataset(message.into())
    }

    /// True for rejected projection requests; callers typically keep the
    /// previous result and ignore the request.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
