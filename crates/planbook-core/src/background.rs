//! Page background patterns
//!
//! Every content page gets exactly one of three patterns: plain lined paper,
//! lined paper with a checkbox at the start of each row, or a hexagon grid
//! for maps.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::PageSettings;
use crate::document::{Primitive, Rgb, Stroke};
use crate::geometry::{hex_tiling, hexagon_vertices, lined_rows, Point};

/// Gap between a checkbox and its writing line, in mm
const CHECKBOX_GAP: f64 = 2.0;

/// Stroke width of hexagon outlines, in mm
const HEX_STROKE_WIDTH: f64 = 0.5;

/// Background pattern of a content page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundKind {
    /// Horizontal writing lines
    Lined,
    /// Writing lines with a checkbox per row
    CheckboxLined,
    /// Hexagon map grid
    Hex,
}

impl BackgroundKind {
    /// Configuration tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lined => "lined",
            Self::CheckboxLined => "checkbox-lined",
            Self::Hex => "hex",
        }
    }
}

impl fmt::Display for BackgroundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised background tag
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown background '{0}' (expected lined, checkbox-lined or hex)")]
pub struct UnknownBackground(pub String);

impl FromStr for BackgroundKind {
    type Err = UnknownBackground;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lined" => Ok(Self::Lined),
            "checkbox-lined" => Ok(Self::CheckboxLined),
            "hex" => Ok(Self::Hex),
            other => Err(UnknownBackground(other.to_string())),
        }
    }
}

/// Drawing operations for a background pattern
pub fn render(kind: BackgroundKind, settings: &PageSettings) -> Vec<Primitive> {
    match kind {
        BackgroundKind::Lined => lined(settings),
        BackgroundKind::CheckboxLined => checkbox_lined(settings),
        BackgroundKind::Hex => hex(settings),
    }
}

fn rows(settings: &PageSettings) -> impl Iterator<Item = f64> {
    lined_rows(settings.row_top, settings.row_bottom, settings.row_spacing)
}

fn lined(settings: &PageSettings) -> Vec<Primitive> {
    let stroke = Stroke::hairline(Rgb::LIGHT_GRAY);
    let right = settings.width - settings.margin;
    rows(settings)
        .map(|y| Primitive::Line {
            from: Point::new(settings.margin, y),
            to: Point::new(right, y),
            stroke,
        })
        .collect()
}

fn checkbox_lined(settings: &PageSettings) -> Vec<Primitive> {
    let stroke = Stroke::hairline(Rgb::BLACK);
    let size = settings.checkbox_size;
    let line_start = settings.margin + size + CHECKBOX_GAP;
    let right = settings.width - settings.margin;

    let mut primitives = Vec::new();
    for y in rows(settings) {
        primitives.push(Primitive::Rect {
            origin: Point::new(settings.margin, y - size),
            width: size,
            height: size,
            stroke: Some(stroke),
            fill: None,
        });
        primitives.push(Primitive::Line {
            from: Point::new(line_start, y),
            to: Point::new(right, y),
            stroke,
        });
    }
    primitives
}

fn hex(settings: &PageSettings) -> Vec<Primitive> {
    let stroke = Stroke::new(HEX_STROKE_WIDTH, Rgb::LIGHT_GRAY);
    hex_tiling(settings.width, settings.height, settings.hex_size)
        .map(|center| Primitive::Polygon {
            points: hexagon_vertices(center, settings.hex_size).to_vec(),
            stroke,
        })
        .collect()
}
