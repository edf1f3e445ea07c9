//! planbook-pdf - PDF rendering for planbook documents via Typst
//!
//! Serializes a laid-out [`planbook_core::Document`] to PDF using Typst as
//! the rendering backend.
//!
//! # Architecture
//!
//! 1. **AssetStore** - Icons and cover images, read into memory up front
//! 2. **Transpiler** - Converts the document to Typst markup, resolving links
//! 3. **Compiler** - Compiles Typst markup to PDF bytes
//!
//! # Example
//!
//! ```ignore
//! use planbook_core::{build, Preset};
//! use planbook_pdf::{render_pdf, AssetStore};
//!
//! let book = Preset::ProjectNotes.config().validate()?;
//! let assets = AssetStore::load(Path::new("."), book.assets())?;
//! let doc = build(&book)?;
//! let pdf = render_pdf(&doc, &assets, &book.fonts)?;
//! ```

mod assets;
mod compiler;
mod error;
mod transpiler;

use std::path::Path;

use planbook_core::Document;
use tracing::info;

pub use assets::{Asset, AssetStore};
pub use compiler::Compiler;
pub use error::{PdfError, Result};
pub use transpiler::Transpiler;

/// Render a laid-out document to PDF bytes
///
/// # Arguments
/// * `doc` - The document to render
/// * `assets` - Every image the document places
/// * `fonts` - Font files for header and footer text
pub fn render_pdf<P: AsRef<Path>>(
    doc: &Document,
    assets: &AssetStore,
    fonts: &[P],
) -> Result<Vec<u8>> {
    let typst_markup = Transpiler::transpile(doc, assets)?;
    let pdf = Compiler::compile_with_fonts(&typst_markup, assets, fonts)?;
    info!(pages = doc.len(), bytes = pdf.len(), "PDF rendered");
    Ok(pdf)
}

/// Write PDF bytes to `path` in one go
///
/// A failed write is reported, never retried.
pub fn write_pdf(pdf: &[u8], path: &Path) -> Result<()> {
    std::fs::write(path, pdf)?;
    info!(path = %path.display(), "PDF written");
    Ok(())
}
