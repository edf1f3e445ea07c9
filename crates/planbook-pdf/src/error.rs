//! Error types for PDF generation

use std::path::PathBuf;

use planbook_core::LinkError;
use thiserror::Error;

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Errors that can occur during PDF generation
#[derive(Error, Debug)]
pub enum PdfError {
    /// Typst compilation error
    #[error("Typst compilation failed: {0}")]
    Compilation(String),

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// Image referenced by the book is missing or unreadable
    #[error("Missing asset {}: {source}", path.display())]
    MissingAsset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Image placed in the document but never loaded into the asset store
    #[error("Asset not loaded: {0}")]
    AssetNotLoaded(String),

    /// Navigation link could not be resolved
    #[error("Unresolvable link: {0}")]
    Link(#[from] LinkError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
