//! Error types for layout and configuration

use std::path::PathBuf;

use thiserror::Error;

use crate::links::LinkId;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur while building a document layout
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Link table invariant violated
    #[error(transparent)]
    Link(#[from] LinkError),
}

/// Configuration errors, all raised before any page is built
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Background tag that is not one of the supported kinds
    #[error("Unknown background '{tag}' in section '{section}' (expected lined, checkbox-lined or hex)")]
    UnknownBackground { section: String, tag: String },

    /// The configuration lists no sections at all
    #[error("Configuration has no sections")]
    NoSections,

    /// A section or part that would produce no pages
    #[error("Section '{section}' has no pages")]
    EmptySection { section: String },

    /// Two top-level sections share a title
    #[error("Section '{section}' appears more than once")]
    DuplicateSection { section: String },

    /// More navigation icons than fit between the page margins
    #[error("Toolbar of {icons} icons needs {needed} mm, only {available} mm fit between the margins")]
    ToolbarOverflow {
        icons: usize,
        needed: f64,
        available: f64,
    },

    /// A section with parts but no item count
    #[error("Section '{section}' has parts but no items")]
    MissingItems { section: String },

    /// A page setting outside its valid range
    #[error("Invalid page setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },

    /// Configuration file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Create an invalid setting error
    pub fn invalid_setting(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            reason: reason.into(),
        }
    }
}

/// Link registry errors. These are programming errors, not user-facing ones.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LinkError {
    /// `bind` called twice for the same link
    #[error("Link {link} is already bound to page {existing} (attempted page {page})")]
    AlreadyBound { link: LinkId, existing: u32, page: u32 },

    /// `resolve` called before `bind`
    #[error("Link {link} was never bound to a page")]
    Unbound { link: LinkId },

    /// Id not allocated by this registry
    #[error("Link {link} was not allocated by this registry")]
    UnknownLink { link: LinkId },

    /// Bound page does not exist in the finished document
    #[error("Link {link} points at page {page}, but the document has {page_count} pages")]
    DanglingTarget {
        link: LinkId,
        page: u32,
        page_count: usize,
    },
}
