//! Facade-level error type: `McppError` plus the I/O and serialization
//! failures that only show up at the external boundary (§6).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("{0}")]
    Core(#[from] mcpp_core::McppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "image")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported file extension {0:?}")]
    UnsupportedExtension(String),

    #[error("malformed text grid: {0}")]
    MalformedGrid(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
