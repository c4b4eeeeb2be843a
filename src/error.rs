//! Error types for the configuration exporter

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid registry: {0}")]
    InvalidRegistry(String),

    #[error("Unknown variant: {0} (expected minimal, full or passthrough)")]
    UnknownVariant(String),
}
