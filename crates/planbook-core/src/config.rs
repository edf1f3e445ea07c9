//! Book configuration
//!
//! A book is described in TOML:
//!
//! ```toml
//! title = "DND Campaign"
//! cover = "images/cover.jpg"
//!
//! [page]
//! hex_size = 15.0
//!
//! [[sections]]
//! title = "Maps"
//! icon = "images/icons/maps.png"
//! pages = 5
//! background = "hex"
//! has_index = true
//!
//! [[sections]]
//! title = "Project Notes"
//! icon = "images/icons/home.png"
//! has_index = true
//! items = 12
//!
//! [[sections.parts]]
//! title = "Notes"
//! icon = "images/icons/journal-alt.png"
//! pages = 10
//! background = "lined"
//! ```
//!
//! [`BookConfig`] is the raw, serializable form. [`BookConfig::validate`]
//! checks it and produces a typed [`Book`] for the builder.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::background::{BackgroundKind, UnknownBackground};
use crate::geometry::{hex_tiling, lined_rows};
use crate::error::ConfigError;

/// Most writing rows or hexagons a single background may draw
pub const MAX_BACKGROUND_SHAPES: usize = 10_000;

/// Page geometry, in millimetres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Page width (A4: 210)
    pub width: f64,
    /// Page height (A4: 297)
    pub height: f64,
    /// Left and right margin
    pub margin: f64,
    /// Top margin used for index layout
    pub margin_top: f64,
    /// Bottom margin used for index layout
    pub margin_bottom: f64,
    /// Height of the colored header band
    pub header_height: f64,
    /// Side of navigation icons
    pub icon_size: f64,
    /// Top of the toolbar icons
    pub toolbar_y: f64,
    /// Gap between toolbar icons
    pub toolbar_gap: f64,
    /// First writing row
    pub row_top: f64,
    /// Last writing row (inclusive)
    pub row_bottom: f64,
    /// Distance between writing rows
    pub row_spacing: f64,
    /// Side of the to-do checkboxes
    pub checkbox_size: f64,
    /// Hexagon circumradius for map pages
    pub hex_size: f64,
    /// Width of an index row box
    pub index_box_width: f64,
    /// Height of an index row box
    pub index_box_height: f64,
    /// Vertical gap between index rows
    pub index_row_gap: f64,
    /// Override for the number of rows per index page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_per_index_page: Option<u32>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 10.0,
            margin_top: 10.0,
            margin_bottom: 10.0,
            header_height: 22.0,
            icon_size: 10.0,
            toolbar_y: 5.0,
            toolbar_gap: 5.0,
            row_top: 40.0,
            row_bottom: 290.0,
            row_spacing: 10.0,
            checkbox_size: 8.0,
            hex_size: 15.0,
            index_box_width: 150.0,
            index_box_height: 15.0,
            index_row_gap: 5.0,
            rows_per_index_page: None,
        }
    }
}

impl PageSettings {
    /// Vertical distance between index rows
    pub fn index_row_pitch(&self) -> f64 {
        self.index_box_height + self.index_row_gap
    }

    /// Width of a toolbar holding `icons` icons
    pub fn toolbar_width(&self, icons: usize) -> f64 {
        if icons == 0 {
            return 0.0;
        }
        icons as f64 * (self.icon_size + self.toolbar_gap) - self.toolbar_gap
    }

    /// Index rows that fit on one page.
    ///
    /// Without an override this is the usable height divided by the row
    /// pitch, minus one row reserved for the header (12 on A4).
    pub fn rows_per_index_page(&self) -> u32 {
        if let Some(rows) = self.rows_per_index_page {
            return rows;
        }
        let available = self.height - self.margin_top - self.margin_bottom;
        let rows = (available / self.index_row_pitch()).floor() as i64 - 1;
        rows.max(0) as u32
    }

    /// Check that the geometry can be laid out
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("icon_size", self.icon_size),
            ("row_spacing", self.row_spacing),
            ("checkbox_size", self.checkbox_size),
            ("hex_size", self.hex_size),
            ("index_box_height", self.index_box_height),
        ];
        for (name, value) in positive {
            if value <= 0.0 || !value.is_finite() {
                return Err(ConfigError::invalid_setting(
                    name,
                    format!("must be a positive number, got {}", value),
                ));
            }
        }
        let finite = [
            ("margin", self.margin),
            ("margin_top", self.margin_top),
            ("margin_bottom", self.margin_bottom),
            ("header_height", self.header_height),
            ("toolbar_y", self.toolbar_y),
            ("toolbar_gap", self.toolbar_gap),
            ("row_top", self.row_top),
            ("row_bottom", self.row_bottom),
            ("index_box_width", self.index_box_width),
            ("index_row_gap", self.index_row_gap),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(ConfigError::invalid_setting(
                    name,
                    format!("must be a finite number, got {}", value),
                ));
            }
        }

        let rows = lined_rows(self.row_top, self.row_bottom, self.row_spacing).len();
        if rows > MAX_BACKGROUND_SHAPES {
            return Err(ConfigError::invalid_setting(
                "row_spacing",
                format!(
                    "{} draws {} rows per page, at most {} are allowed",
                    self.row_spacing, rows, MAX_BACKGROUND_SHAPES
                ),
            ));
        }
        let hexes = hex_tiling(self.width, self.height, self.hex_size).len();
        if hexes > MAX_BACKGROUND_SHAPES {
            return Err(ConfigError::invalid_setting(
                "hex_size",
                format!(
                    "{} draws {} hexagons per page, at most {} are allowed",
                    self.hex_size, hexes, MAX_BACKGROUND_SHAPES
                ),
            ));
        }

        if self.margin < 0.0 || self.margin * 2.0 >= self.width {
            return Err(ConfigError::invalid_setting(
                "margin",
                format!("{} leaves no room on a {} wide page", self.margin, self.width),
            ));
        }
        if self.index_row_gap < 0.0 {
            return Err(ConfigError::invalid_setting(
                "index_row_gap",
                "must not be negative",
            ));
        }
        let index_rows = self.rows_per_index_page();
        if index_rows == 0 {
            return Err(ConfigError::invalid_setting(
                "rows_per_index_page",
                "no index row fits on a page",
            ));
        }
        // slot 0 is the header, rows occupy slots 1..=index_rows
        let last_row_bottom =
            self.margin_top + index_rows as f64 * self.index_row_pitch() + self.index_box_height;
        let usable_bottom = self.height - self.margin_bottom;
        if last_row_bottom > usable_bottom {
            return Err(ConfigError::invalid_setting(
                "rows_per_index_page",
                format!(
                    "{} rows end at {} mm, past the usable bottom at {} mm",
                    index_rows, last_row_bottom, usable_bottom
                ),
            ));
        }
        Ok(())
    }
}

fn default_title() -> String {
    "Planbook".to_string()
}

fn default_pages() -> u32 {
    1
}

fn default_background() -> String {
    BackgroundKind::Lined.as_str().to_string()
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Raw book configuration, as read from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookConfig {
    /// Document title
    #[serde(default = "default_title")]
    pub title: String,
    /// Output file name, defaults to `<title>.pdf`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Full-page cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    /// Font files for header and footer text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fonts: Vec<String>,
    /// Page geometry
    #[serde(default)]
    pub page: PageSettings,
    /// Top-level sections in document order
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            output: None,
            cover: None,
            fonts: Vec::new(),
            page: PageSettings::default(),
            sections: Vec::new(),
        }
    }
}

/// Raw top-level section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub title: String,
    /// Toolbar and index icon
    pub icon: String,
    /// Content pages; ignored when the section has parts
    #[serde(default = "default_pages")]
    pub pages: u32,
    /// Background tag: `lined`, `checkbox-lined` or `hex`
    #[serde(default = "default_background")]
    pub background: String,
    /// Emit index pages linking to every item
    #[serde(default, alias = "hasIndex", skip_serializing_if = "is_false")]
    pub has_index: bool,
    /// Number of items, required with parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<u32>,
    /// Per-item page runs (notes, to-do, people)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<PartConfig>,
}

/// Raw per-item part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartConfig {
    pub title: String,
    pub icon: String,
    #[serde(default = "default_pages")]
    pub pages: u32,
    #[serde(default = "default_background")]
    pub background: String,
}

impl BookConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the configuration and convert it into a typed [`Book`].
    ///
    /// Every background tag is parsed here, so an unknown tag fails the whole
    /// build before the first page exists.
    pub fn validate(&self) -> Result<Book, ConfigError> {
        self.page.validate()?;
        if self.sections.is_empty() {
            return Err(ConfigError::NoSections);
        }

        let mut titles = HashSet::new();
        for section in &self.sections {
            if !titles.insert(section.title.as_str()) {
                return Err(ConfigError::DuplicateSection {
                    section: section.title.clone(),
                });
            }
        }

        let sections = self
            .sections
            .iter()
            .map(SectionConfig::validate)
            .collect::<Result<Vec<_>, _>>()?;

        // every section icon, plus the lateral icons of the widest item
        let lateral = sections
            .iter()
            .map(|section| match &section.content {
                SectionContent::Items { parts, .. } => parts.len(),
                SectionContent::Pages { .. } => 0,
            })
            .max()
            .unwrap_or(0);
        let icons = sections.len() + lateral;
        let needed = self.page.toolbar_width(icons);
        let available = self.page.width - 2.0 * self.page.margin;
        if needed > available {
            return Err(ConfigError::ToolbarOverflow {
                icons,
                needed,
                available,
            });
        }

        Ok(Book {
            title: self.title.clone(),
            output: self
                .output
                .clone()
                .unwrap_or_else(|| format!("{}.pdf", self.title)),
            cover: self.cover.clone(),
            fonts: self.fonts.clone(),
            page: self.page.clone(),
            sections,
        })
    }
}

fn parse_background(section: &str, tag: &str) -> Result<BackgroundKind, ConfigError> {
    tag.parse()
        .map_err(|UnknownBackground(tag)| ConfigError::UnknownBackground {
            section: section.to_string(),
            tag,
        })
}

impl SectionConfig {
    fn validate(&self) -> Result<Section, ConfigError> {
        let content = if self.parts.is_empty() {
            if self.pages == 0 {
                return Err(ConfigError::EmptySection {
                    section: self.title.clone(),
                });
            }
            SectionContent::Pages {
                count: self.pages,
                background: parse_background(&self.title, &self.background)?,
            }
        } else {
            let items = match self.items {
                Some(items) if items > 0 => items,
                _ => {
                    return Err(ConfigError::MissingItems {
                        section: self.title.clone(),
                    })
                }
            };
            let parts = self
                .parts
                .iter()
                .map(|part| {
                    let name = format!("{} / {}", self.title, part.title);
                    if part.pages == 0 {
                        return Err(ConfigError::EmptySection { section: name });
                    }
                    Ok(Part {
                        title: part.title.clone(),
                        icon: part.icon.clone(),
                        pages: part.pages,
                        background: parse_background(&name, &part.background)?,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            SectionContent::Items { count: items, parts }
        };

        Ok(Section {
            title: self.title.clone(),
            icon: self.icon.clone(),
            has_index: self.has_index,
            content,
        })
    }
}

/// A validated book, ready for layout
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub title: String,
    pub output: String,
    pub cover: Option<String>,
    pub fonts: Vec<String>,
    pub page: PageSettings,
    pub sections: Vec<Section>,
}

impl Book {
    /// Every image the book references (cover, section and part icons),
    /// deduplicated, in first-use order
    pub fn assets(&self) -> Vec<&str> {
        let mut assets = Vec::new();
        if let Some(cover) = &self.cover {
            push_unique(&mut assets, cover);
        }
        for section in &self.sections {
            push_unique(&mut assets, &section.icon);
            if let SectionContent::Items { parts, .. } = &section.content {
                for part in parts {
                    push_unique(&mut assets, &part.icon);
                }
            }
        }
        assets
    }
}

fn push_unique<'a>(assets: &mut Vec<&'a str>, path: &'a str) {
    if !assets.contains(&path) {
        assets.push(path);
    }
}

/// A validated top-level section
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub icon: String,
    pub has_index: bool,
    pub content: SectionContent,
}

impl Section {
    /// Number of index rows this section needs
    pub fn item_count(&self) -> u32 {
        match &self.content {
            SectionContent::Pages { count, .. } => *count,
            SectionContent::Items { count, .. } => *count,
        }
    }
}

/// What a section's content pages look like
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    /// A run of pages, each page its own item
    Pages {
        count: u32,
        background: BackgroundKind,
    },
    /// `count` items, each with one page run per part
    Items { count: u32, parts: Vec<Part> },
}

/// A validated per-item part
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub title: String,
    pub icon: String,
    pub pages: u32,
    pub background: BackgroundKind,
}
