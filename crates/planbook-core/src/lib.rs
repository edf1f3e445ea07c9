//! planbook-core - page layout for printable planning binders
//!
//! Turns a book configuration (sections, page counts, backgrounds, index
//! flags) into a fully laid-out [`Document`]: every page with its drawing
//! primitives and an internal link graph between index rows, content pages
//! and the per-page navigation toolbar.
//!
//! # Pipeline
//!
//! 1. [`BookConfig`] - raw TOML configuration, or a [`Preset`]
//! 2. [`BookConfig::validate`] - typed [`Book`], all configuration errors raised here
//! 3. [`build`] - single pass producing the [`Document`]
//!
//! Serializing the document to PDF lives in `planbook-pdf`.
//!
//! # Example
//!
//! ```
//! use planbook_core::{build, BookConfig};
//!
//! let config = BookConfig::from_toml_str(r#"
//! [[sections]]
//! title = "Story"
//! icon = "icons/story.png"
//! pages = 2
//! "#).unwrap();
//!
//! let doc = build(&config.validate().unwrap()).unwrap();
//! assert_eq!(doc.len(), 2);
//! ```

pub mod background;
pub mod builder;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod links;
pub mod presets;

pub use background::BackgroundKind;
pub use builder::build;
pub use config::{Book, BookConfig, PageSettings, Section, SectionContent};
pub use document::{Document, Page, PageKind, Primitive};
pub use error::{ConfigError, LayoutError, LinkError, Result};
pub use links::{LinkId, LinkRegistry};
pub use presets::Preset;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
