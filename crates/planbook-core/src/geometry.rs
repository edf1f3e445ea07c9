//! Geometry primitives
//!
//! Row positions for lined paper and the hexagon tessellation used by map
//! pages. All coordinates are millimetres with the origin at the top-left
//! corner of the page and y growing downwards.

use std::f64::consts::PI;

/// A point on the page, in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Slack for float division when counting rows, so `(290 - 40) / 10` is 25
/// and not 24.999...
const ROW_EPSILON: f64 = 1e-9;

/// Lazy sequence of row y-coordinates, see [`lined_rows`]
#[derive(Debug, Clone)]
pub struct LinedRows {
    top: f64,
    spacing: f64,
    next: usize,
    count: usize,
}

impl Iterator for LinedRows {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.count {
            return None;
        }
        let y = self.top + self.next as f64 * self.spacing;
        self.next += 1;
        Some(y)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LinedRows {}

/// Row positions from `top` to `bottom` (inclusive) every `spacing` mm.
///
/// Yields `floor((bottom - top) / spacing) + 1` values. Empty when
/// `bottom < top` or `spacing` is not positive.
pub fn lined_rows(top: f64, bottom: f64, spacing: f64) -> LinedRows {
    let count = if spacing > 0.0 && bottom >= top {
        // float-to-int casts saturate, so a vanishing spacing caps at usize::MAX
        (((bottom - top) / spacing + ROW_EPSILON).floor() as usize).saturating_add(1)
    } else {
        0
    };
    LinedRows {
        top,
        spacing,
        next: 0,
        count,
    }
}

/// The six corners of a regular hexagon with circumradius `size`.
///
/// Corner `k` sits at angle `k * 60°` from the centre.
pub fn hexagon_vertices(center: Point, size: f64) -> [Point; 6] {
    let step = PI / 3.0;
    std::array::from_fn(|k| {
        let angle = k as f64 * step;
        Point::new(
            center.x + size * angle.cos(),
            center.y + size * angle.sin(),
        )
    })
}

/// Edges of the hexagon as `(from, to)` pairs, closing 5 → 0.
pub fn hexagon_edges(vertices: &[Point; 6]) -> impl Iterator<Item = (Point, Point)> + '_ {
    (0..6).map(move |i| (vertices[i], vertices[(i + 1) % 6]))
}

/// Lazy sequence of hexagon centres, see [`hex_tiling`]
#[derive(Debug, Clone)]
pub struct HexTiling {
    x_stride: f64,
    y_stride: f64,
    columns: usize,
    rows: usize,
    index: usize,
}

impl HexTiling {
    /// Number of columns iterated
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows iterated
    pub fn rows(&self) -> usize {
        self.rows
    }

    fn len_total(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }
}

impl Iterator for HexTiling {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.index >= self.len_total() {
            return None;
        }
        let row = self.index / self.columns;
        let column = self.index % self.columns;
        self.index += 1;

        let offset = if column % 2 == 1 {
            self.y_stride / 2.0
        } else {
            0.0
        };
        Some(Point::new(
            column as f64 * self.x_stride,
            row as f64 * self.y_stride + offset,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len_total() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HexTiling {}

/// Centres of a brick-offset hexagon grid covering a `page_width` by
/// `page_height` page.
///
/// Columns are `1.5 * size` apart, rows `sqrt(3) * size` apart and odd columns
/// drop by half a row. Both axes iterate `floor(dim / stride) + 2` times so the
/// grid overruns every page edge; anything less leaves gaps along the right and
/// bottom borders.
pub fn hex_tiling(page_width: f64, page_height: f64, size: f64) -> HexTiling {
    let x_stride = 1.5 * size;
    let y_stride = 3f64.sqrt() * size;
    let (columns, rows) = if size > 0.0 {
        (
            ((page_width / x_stride).floor() as usize).saturating_add(2),
            ((page_height / y_stride).floor() as usize).saturating_add(2),
        )
    } else {
        (0, 0)
    };
    HexTiling {
        x_stride,
        y_stride,
        columns,
        rows,
        index: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len2 = dx * dx + dy * dy;
        let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
        p.distance(Point::new(a.x + t * dx, a.y + t * dy))
    }

    #[test]
    fn test_lined_rows_default_page() {
        let rows: Vec<f64> = lined_rows(40.0, 290.0, 10.0).collect();
        assert_eq!(rows.len(), 26);
        assert_eq!(rows[0], 40.0);
        assert_eq!(*rows.last().unwrap(), 290.0);
    }

    #[test]
    fn test_lined_rows_count_formula() {
        for &(top, bottom, spacing) in &[
            (40.0, 290.0, 10.0),
            (1.0, 2.0, 0.3),
            (12.5, 200.0, 7.0),
            (5.0, 6.0, 10.0),
            (0.5, 100.0, 0.1),
        ] {
            let rows: Vec<f64> = lined_rows(top, bottom, spacing).collect();
            let expected = ((bottom - top) / spacing + ROW_EPSILON).floor() as usize + 1;
            assert_eq!(rows.len(), expected, "top={top} bottom={bottom} spacing={spacing}");
            assert_eq!(rows[0], top);
            assert!(rows.windows(2).all(|w| w[1] > w[0]));
            assert!(*rows.last().unwrap() <= bottom + EPS);
        }
    }

    #[test]
    fn test_lined_rows_is_exact_size() {
        let mut rows = lined_rows(40.0, 290.0, 10.0);
        assert_eq!(rows.len(), 26);
        rows.next();
        assert_eq!(rows.len(), 25);
    }

    #[test]
    fn test_lined_rows_degenerate() {
        assert_eq!(lined_rows(50.0, 40.0, 10.0).count(), 0);
        assert_eq!(lined_rows(40.0, 290.0, 0.0).count(), 0);
        assert_eq!(lined_rows(40.0, 290.0, -1.0).count(), 0);
        assert_eq!(lined_rows(40.0, 40.0, 10.0).collect::<Vec<_>>(), vec![40.0]);
    }

    #[test]
    fn test_lined_rows_vanishing_spacing_saturates() {
        let rows = lined_rows(40.0, 290.0, 1e-300);
        assert_eq!(rows.len(), usize::MAX);
    }

    #[test]
    fn test_hexagon_vertices() {
        let v = hexagon_vertices(Point::new(100.0, 50.0), 10.0);
        assert!((v[0].x - 110.0).abs() < EPS && (v[0].y - 50.0).abs() < EPS);
        assert!((v[3].x - 90.0).abs() < EPS && (v[3].y - 50.0).abs() < EPS);
        for p in v {
            assert!((p.distance(Point::new(100.0, 50.0)) - 10.0).abs() < EPS);
        }
    }

    #[test]
    fn test_hexagon_edges_wrap_around() {
        let v = hexagon_vertices(Point::default(), 5.0);
        let edges: Vec<_> = hexagon_edges(&v).collect();
        assert_eq!(edges.len(), 6);
        assert_eq!(edges[5], (v[5], v[0]));
        for (a, b) in edges {
            // A regular hexagon's side equals its circumradius
            assert!((a.distance(b) - 5.0).abs() < EPS);
        }
    }

    #[test]
    fn test_hex_tiling_iteration_counts() {
        let tiling = hex_tiling(210.0, 297.0, 15.0);
        assert_eq!(tiling.columns(), 11);
        assert_eq!(tiling.rows(), 13);
        assert_eq!(tiling.len(), 143);
    }

    #[test]
    fn test_hex_tiling_odd_columns_offset() {
        let centers: Vec<Point> = hex_tiling(210.0, 297.0, 15.0).take(2).collect();
        assert_eq!(centers[0], Point::new(0.0, 0.0));
        assert!((centers[1].x - 22.5).abs() < EPS);
        assert!((centers[1].y - 3f64.sqrt() * 15.0 / 2.0).abs() < EPS);
    }

    #[test]
    fn test_hex_tiling_zero_size_is_empty() {
        assert_eq!(hex_tiling(210.0, 297.0, 0.0).count(), 0);
    }

    #[test]
    fn test_hex_tiling_vanishing_size_saturates() {
        let tiling = hex_tiling(210.0, 297.0, 1e-300);
        assert_eq!(tiling.columns(), usize::MAX);
        assert_eq!(tiling.rows(), usize::MAX);
        assert_eq!(tiling.len(), usize::MAX);
    }

    #[test]
    fn test_hex_tiling_covers_page() {
        let (width, height) = (210.0, 297.0);
        for size in [8.0, 15.0, 40.0, 250.0] {
            let edges: Vec<(Point, Point)> = hex_tiling(width, height, size)
                .flat_map(|c| {
                    let v = hexagon_vertices(c, size);
                    hexagon_edges(&v).collect::<Vec<_>>()
                })
                .collect();

            let mut y = 0.0;
            while y <= height {
                let mut x = 0.0;
                while x <= width {
                    let p = Point::new(x, y);
                    let nearest = edges
                        .iter()
                        .map(|&(a, b)| distance_to_segment(p, a, b))
                        .fold(f64::INFINITY, f64::min);
                    assert!(
                        nearest <= size,
                        "gap at ({x}, {y}) for size {size}: nearest edge {nearest}"
                    );
                    x += 7.0;
                }
                y += 7.0;
            }
        }
    }
}
