//! Typst to PDF compiler
//!
//! Compiles Typst markup to PDF bytes using typst-as-lib. Images are served
//! from the in-memory [`AssetStore`], never from disk.

use std::path::Path;

use tracing::{debug, warn};
use typst_as_lib::TypstEngine;

use crate::assets::AssetStore;
use crate::error::{PdfError, Result};

/// Compiler for converting Typst markup to PDF
pub struct Compiler;

impl Compiler {
    /// Compile Typst markup to PDF bytes
    ///
    /// # Arguments
    /// * `markup` - Typst markup string
    /// * `assets` - Images the markup refers to
    ///
    /// # Returns
    /// PDF bytes on success
    pub fn compile(markup: &str, assets: &AssetStore) -> Result<Vec<u8>> {
        Self::compile_with_fonts::<&Path>(markup, assets, &[])
    }

    /// Compile with custom fonts
    ///
    /// # Arguments
    /// * `markup` - Typst markup string
    /// * `assets` - Images the markup refers to
    /// * `font_paths` - Paths to font files to include
    ///
    /// # Returns
    /// PDF bytes on success
    pub fn compile_with_fonts<P: AsRef<Path>>(
        markup: &str,
        assets: &AssetStore,
        font_paths: &[P],
    ) -> Result<Vec<u8>> {
        let mut fonts = Vec::with_capacity(font_paths.len());
        for font_path in font_paths {
            let font_path = font_path.as_ref();
            let font_bytes = std::fs::read(font_path).map_err(|e| {
                PdfError::Font(format!("Failed to read font {}: {}", font_path.display(), e))
            })?;
            fonts.push(font_bytes);
        }
        if fonts.is_empty() {
            warn!("No fonts supplied, header and footer text will not be visible");
        }

        let files: Vec<(&str, Vec<u8>)> = assets
            .files()
            .map(|(path, bytes)| (path, bytes.to_vec()))
            .collect();

        let engine = TypstEngine::builder()
            .main_file(markup.to_string())
            .fonts(fonts)
            .with_static_file_resolver(files)
            .build();

        // compiled is Warned<Result<Document, Error>>
        let compiled = engine.compile();
        for warning in &compiled.warnings {
            debug!(message = %warning.message, "typst warning");
        }

        let document = compiled
            .output
            .map_err(|e| PdfError::Compilation(format!("{:?}", e)))?;

        // Generate PDF
        let options = typst_pdf::PdfOptions::default();
        let pdf_bytes = typst_pdf::pdf(&document, &options)
            .map_err(|e| PdfError::Compilation(format!("PDF generation failed: {:?}", e)))?;

        Ok(pdf_bytes.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_placed_shapes() {
        let markup = r#"#set page(width: 210mm, height: 297mm, margin: 0pt)
#{
  place(top + left, line(start: (10mm, 40mm), end: (200mm, 40mm), stroke: 0.2mm + rgb(200, 200, 200)))
  place(top + left, dx: 10mm, dy: 32mm, rect(width: 8mm, height: 8mm, fill: none, stroke: 0.2mm + rgb(0, 0, 0)))
  place(top + left, polygon(stroke: 0.5mm + rgb(200, 200, 200), (15mm, 0mm), (7.5mm, 12.99mm), (-7.5mm, 12.99mm), (-15mm, 0mm), (-7.5mm, -12.99mm), (7.5mm, -12.99mm)))
}
"#;
        let result = Compiler::compile(markup, &AssetStore::new());
        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());

        let pdf = result.unwrap();
        // PDF files start with %PDF
        assert!(
            pdf.starts_with(b"%PDF"),
            "Output doesn't start with PDF header"
        );
    }

    #[test]
    fn test_compile_with_svg_asset_link() {
        let mut assets = AssetStore::new();
        assets.insert(
            "icons/home.svg",
            br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10"/></svg>"#.to_vec(),
        );
        let markup = r#"#set page(width: 210mm, height: 297mm, margin: 0pt)
#{
  place(top + left, dx: 190mm, dy: 5mm, link((page: 2, x: 0pt, y: 0pt), image("/assets/0.svg", width: 10mm, height: 10mm, fit: "stretch")))
}
#pagebreak()
#{
  place(top + left, dx: 0mm, dy: 0mm, rect(width: 210mm, height: 22mm, fill: rgb(200, 220, 255), stroke: none))
}
"#;
        let result = Compiler::compile(markup, &assets);
        assert!(result.is_ok(), "Compilation failed: {:?}", result.err());
    }

    #[test]
    fn test_missing_font_file() {
        let result = Compiler::compile_with_fonts("", &AssetStore::new(), &["/nonexistent/font.ttf"]);
        assert!(matches!(result, Err(PdfError::Font(_))));
    }
}
