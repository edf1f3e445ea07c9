//! planbook CLI - Command-line interface library
//!
//! This library provides the CLI functionality for planbook:
//! - Generate: Lay out a book and write it as PDF
//! - Outline: Print the page sequence and link targets without rendering
//! - Init: Write a built-in book layout as an editable TOML file
//!
//! # Library Usage
//!
//! ```ignore
//! use planbook_cli::{generate_command, BookSource, GenerateOptions};
//!
//! let source = BookSource::Preset(PresetArg::Campaign);
//! generate_command(&source, &GenerateOptions::default())?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Generate the campaign binder from images under ./images
//! planbook generate --preset campaign
//!
//! # Start a custom book from a preset and render it
//! planbook init --preset project-notes --output notes.toml
//! planbook generate --config notes.toml --font fonts/DejaVuSans.ttf
//!
//! # Inspect the page sequence
//! planbook outline --config notes.toml
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{generate_command, init_command, outline_command, outline_lines};
pub use app::{run_cli, BookSource, GenerateOptions, PresetArg};
