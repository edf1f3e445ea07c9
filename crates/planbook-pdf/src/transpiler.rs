//! Document to Typst markup transpiler
//!
//! Every page becomes one code block of absolutely `place`d Typst elements
//! on a zero-margin page, so no markup whitespace ends up in the flow. Linked
//! images are wrapped in `link` with a position dictionary, which is where
//! each link's bound page number is resolved.

use planbook_core::document::{Align, Primitive, Rgb, Stroke};
use planbook_core::geometry::Point;
use planbook_core::{Document, Page};

use crate::assets::AssetStore;
use crate::error::Result;

/// Transpiler for converting a laid-out document to Typst markup
pub struct Transpiler;

impl Transpiler {
    /// Transpile a document to Typst markup.
    ///
    /// Fails if an image is not in `assets` or a link cannot be resolved to a
    /// page of the document.
    pub fn transpile(doc: &Document, assets: &AssetStore) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!(
            "#set document(title: \"{}\")\n",
            escape_string(&doc.title)
        ));
        output.push_str(&format!(
            "#set page(width: {}, height: {}, margin: 0pt)\n",
            mm(doc.width),
            mm(doc.height)
        ));

        for (i, page) in doc.pages.iter().enumerate() {
            if i > 0 {
                output.push_str("#pagebreak()\n");
            }
            output.push_str(&Self::transpile_page(doc, page, assets)?);
        }

        Ok(output)
    }

    /// Transpile a single page
    fn transpile_page(doc: &Document, page: &Page, assets: &AssetStore) -> Result<String> {
        let mut output = format!("// page {}\n#{{\n", page.number);
        for primitive in &page.primitives {
            output.push_str("  ");
            output.push_str(&Self::transpile_primitive(doc, primitive, assets)?);
            output.push('\n');
        }
        output.push_str("}\n");
        Ok(output)
    }

    /// Transpile a single drawing operation
    fn transpile_primitive(
        doc: &Document,
        primitive: &Primitive,
        assets: &AssetStore,
    ) -> Result<String> {
        let markup = match primitive {
            Primitive::Line { from, to, stroke } => format!(
                "place(top + left, line(start: {}, end: {}, stroke: {}))",
                point(*from),
                point(*to),
                stroke_value(stroke)
            ),

            Primitive::Rect {
                origin,
                width,
                height,
                stroke,
                fill,
            } => {
                let fill = fill.map(color).unwrap_or_else(|| "none".to_string());
                let stroke = stroke
                    .as_ref()
                    .map(stroke_value)
                    .unwrap_or_else(|| "none".to_string());
                format!(
                    "place(top + left, dx: {}, dy: {}, rect(width: {}, height: {}, fill: {}, stroke: {}))",
                    mm(origin.x),
                    mm(origin.y),
                    mm(*width),
                    mm(*height),
                    fill,
                    stroke
                )
            }

            Primitive::Polygon { points, stroke } => {
                let vertices: Vec<String> = points.iter().map(|p| point(*p)).collect();
                format!(
                    "place(top + left, polygon(stroke: {}, {}))",
                    stroke_value(stroke),
                    vertices.join(", ")
                )
            }

            Primitive::Image {
                asset,
                origin,
                width,
                height,
                link,
            } => {
                let image = format!(
                    "image(\"{}\", width: {}, height: {}, fit: \"stretch\")",
                    escape_string(assets.virtual_path(asset)?),
                    mm(*width),
                    mm(*height)
                );
                let body = match link {
                    Some(link) => {
                        let target = doc.resolve(*link)?;
                        format!(
                            "link((page: {}, x: 0pt, y: 0pt), {})",
                            target.number, image
                        )
                    }
                    None => image,
                };
                format!(
                    "place(top + left, dx: {}, dy: {}, {})",
                    mm(origin.x),
                    mm(origin.y),
                    body
                )
            }

            Primitive::Text {
                origin,
                width,
                height,
                content,
                size,
                italic,
                color: text_color,
                align,
            } => {
                let alignment = match align {
                    Align::Left => "left + horizon",
                    Align::Center => "center + horizon",
                };
                let style = if *italic { ", style: \"italic\"" } else { "" };
                format!(
                    "place(top + left, dx: {}, dy: {}, box(width: {}, height: {}, align({}, text(size: {}pt, fill: {}{}, \"{}\"))))",
                    mm(origin.x),
                    mm(origin.y),
                    mm(*width),
                    mm(*height),
                    alignment,
                    number(*size),
                    color(*text_color),
                    style,
                    escape_string(content)
                )
            }
        };
        Ok(markup)
    }
}

/// Format a number with at most three decimals and no trailing zeros
fn number(value: f64) -> String {
    let formatted = format!("{:.3}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// A length in millimetres
fn mm(value: f64) -> String {
    format!("{}mm", number(value))
}

/// A point as a Typst coordinate pair
fn point(p: Point) -> String {
    format!("({}, {})", mm(p.x), mm(p.y))
}

fn color(rgb: Rgb) -> String {
    format!("rgb({}, {}, {})", rgb.0, rgb.1, rgb.2)
}

fn stroke_value(stroke: &Stroke) -> String {
    format!("{} + {}", mm(stroke.width), color(stroke.color))
}

/// Escape special characters for a Typst string literal
fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c => escaped.push(c),
        }
    }
    escaped
}
