//! Unified error type exposed by **`folio-core`**.
//!
//! Backend crates convert their internal errors into one of these variants
//! before bubbling them up to the [`FolioClient`](crate::FolioClient).  The
//! streaming pipeline itself never produces a `FolioError`; it forwards
//! whatever error type the transport yields.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Debug, Error)]
pub enum FolioError {
    /// The provider answered successfully but without a body to decode.
    /// Raised before any pipeline stage starts.
    #[error("response has no body to stream")]
    MissingBody,

    /// Generic forwarding of any backend-specific error that doesn’t fit another
    /// category.
    #[error("backend returned an error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),

    #[error("invalid: {0}")]
    Invalid(String),
}
