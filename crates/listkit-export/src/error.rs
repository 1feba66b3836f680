//! Export engine error types.

use thiserror::Error;

use listkit_models::ValidationResult;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug, Error)]
pub enum ExportError {
    /// Blocking validation errors; no artifact was generated.
    #[error("Listing is not ready for export: {} error(s)", result.errors.len())]
    Validation { result: ValidationResult },

    /// The channel slug has no registered exporter.
    #[error("Unsupported channel '{requested}'; supported channels: {}", supported.join(", "))]
    UnsupportedChannel {
        requested: String,
        supported: Vec<String>,
    },

    /// Listing or channel absent from the persistence store.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The channel is checker-only; flat-file generation is not implemented.
    #[error("Flat-file generation is not yet implemented for channel '{slug}'")]
    GenerationUnsupported { slug: String },

    /// Unexpected failure during artifact assembly. Aborts the request and
    /// carries full detail for operator triage.
    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Store error: {0}")]
    Store(#[from] listkit_store::StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Zip(String),
}

impl ExportError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    pub fn validation(result: ValidationResult) -> Self {
        Self::Validation { result }
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Zip(e.to_string())
    }
}
