//! Document model
//!
//! The builder's output: an ordered list of pages, each holding the drawing
//! primitives a serializer needs, plus the link table that turns icon
//! placements into page destinations.

use crate::background::BackgroundKind;
use crate::error::LinkError;
use crate::geometry::Point;
use crate::links::{LinkId, LinkRegistry};

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Background line gray
    pub const LIGHT_GRAY: Rgb = Rgb(200, 200, 200);
    /// Footer text gray
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    /// Header band
    pub const HEADER_BLUE: Rgb = Rgb(200, 220, 255);
    /// Index row boxes
    pub const INDEX_FILL: Rgb = Rgb(220, 230, 240);
}

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line width in mm
    pub width: f64,
    pub color: Rgb,
}

impl Stroke {
    /// Default hairline width used by the PDF backend (0.2mm)
    pub const HAIRLINE: f64 = 0.2;

    pub const fn new(width: f64, color: Rgb) -> Self {
        Self { width, color }
    }

    pub const fn hairline(color: Rgb) -> Self {
        Self::new(Self::HAIRLINE, color)
    }
}

/// Horizontal text alignment inside a text box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A single drawing operation, in page millimetres
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Straight line
    Line { from: Point, to: Point, stroke: Stroke },

    /// Axis-aligned rectangle, outlined and/or filled
    Rect {
        origin: Point,
        width: f64,
        height: f64,
        stroke: Option<Stroke>,
        fill: Option<Rgb>,
    },

    /// Closed outline through the given points
    Polygon { points: Vec<Point>, stroke: Stroke },

    /// Image asset, optionally a hyperlink to another page
    Image {
        /// Asset path as written in the configuration
        asset: String,
        origin: Point,
        width: f64,
        height: f64,
        link: Option<LinkId>,
    },

    /// A single line of text, vertically centered in its box
    Text {
        origin: Point,
        width: f64,
        height: f64,
        content: String,
        /// Font size in points
        size: f64,
        italic: bool,
        color: Rgb,
        align: Align,
    },
}

/// What a page is for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    /// Full-page cover image
    Cover,

    /// Index listing for a section
    Index {
        /// Top-level section title
        section: String,
    },

    /// Writing page
    Content {
        /// Top-level section title
        section: String,
        /// Zero-based item index for sections with an index or with parts
        item: Option<usize>,
        /// Part title for sections with parts
        part: Option<String>,
    },
}

impl PageKind {
    /// Section this page belongs to, if any
    pub fn section(&self) -> Option<&str> {
        match self {
            PageKind::Cover => None,
            PageKind::Index { section } | PageKind::Content { section, .. } => Some(section),
        }
    }
}

/// A single page of the document
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number
    pub number: u32,
    /// Header title
    pub title: String,
    pub kind: PageKind,
    /// Background pattern, content pages only
    pub background: Option<BackgroundKind>,
    /// Drawing operations in paint order
    pub primitives: Vec<Primitive>,
}

impl Page {
    /// Create an empty page
    pub fn new(number: u32, title: impl Into<String>, kind: PageKind) -> Self {
        Self {
            number,
            title: title.into(),
            kind,
            background: None,
            primitives: Vec::new(),
        }
    }

    /// Add a drawing operation
    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    /// Every linked image on the page as `(asset, link)`
    pub fn link_placements(&self) -> impl Iterator<Item = (&str, LinkId)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Image {
                asset,
                link: Some(link),
                ..
            } => Some((asset.as_str(), *link)),
            _ => None,
        })
    }

    /// Count of horizontal lines, handy for inspecting backgrounds
    pub fn horizontal_lines(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { from, to, .. } if from.y == to.y))
            .count()
    }
}

/// A complete laid-out document
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub pages: Vec<Page>,
    pub links: LinkRegistry,
}

impl Document {
    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Look up a page by its 1-based number
    pub fn page(&self, number: u32) -> Option<&Page> {
        let index = usize::try_from(number).ok()?.checked_sub(1)?;
        self.pages.get(index)
    }

    /// Pages of a given section
    pub fn section_pages<'a>(&'a self, section: &'a str) -> impl Iterator<Item = &'a Page> + 'a {
        self.pages
            .iter()
            .filter(move |p| p.kind.section() == Some(section))
    }

    /// Resolve a link to a page that exists in this document
    pub fn resolve(&self, link: LinkId) -> Result<&Page, LinkError> {
        let page = self.links.resolve(link)?;
        self.page(page).ok_or(LinkError::DanglingTarget {
            link,
            page,
            page_count: self.pages.len(),
        })
    }

    /// Every asset path referenced by the document, deduplicated, in first-use order
    pub fn assets(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for page in &self.pages {
            for primitive in &page.primitives {
                if let Primitive::Image { asset, .. } = primitive {
                    if !seen.contains(&asset.as_str()) {
                        seen.push(asset.as_str());
                    }
                }
            }
        }
        seen
    }
}
