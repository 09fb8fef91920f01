//! Control-point heights to wave geometry.
//!
//! N heights are spread evenly across the 0..100 viewport. Consecutive points are joined by a
//! cubic whose two handles share the segment's horizontal midpoint and copy the heights of the
//! left and right points, which gives flat tangents at every control point. The region between
//! the curve and the closing edge is the filled curtain.

use std::fmt::Write as _;

use kurbo::Shape as _;

use crate::foundation::core::{BezPath, Point, Polarity, VIEWBOX};

/// SVG path for a layer closed against the bottom edge: `M 0 y0 C … V 100 H 0`.
///
/// Requires at least two points.
pub fn sample_curve(points: &[f64]) -> String {
    sample_curve_to_edge(points, VIEWBOX)
}

/// Like [`sample_curve`], closing the fill against the horizontal line `y = edge`.
pub fn sample_curve_to_edge(points: &[f64], edge: f64) -> String {
    debug_assert!(points.len() >= 2, "a wave needs at least two control points");
    let mut d = String::with_capacity(24 + points.len() * 48);
    let _ = write!(d, "M 0 {} C", points[0]);
    for (x, cx, y0, y1) in segments(points) {
        let _ = write!(d, " {cx} {y0} {cx} {y1} {x} {y1}");
    }
    let _ = write!(d, " V {edge} H 0");
    d
}

/// The same geometry as [`sample_curve_to_edge`], as a closed kurbo path.
pub fn curve_shape(points: &[f64], edge: f64) -> BezPath {
    debug_assert!(points.len() >= 2, "a wave needs at least two control points");
    let mut path = BezPath::new();
    path.move_to(Point::new(0.0, points[0]));
    for (x, cx, y0, y1) in segments(points) {
        path.curve_to(
            Point::new(cx, y0),
            Point::new(cx, y1),
            Point::new(x, y1),
        );
    }
    path.line_to(Point::new(VIEWBOX, edge));
    path.line_to(Point::new(0.0, edge));
    path.close_path();
    path
}

/// Share of the viewport painted by one layer, in `[0, 1]`.
pub fn covered_fraction(points: &[f64], polarity: Polarity) -> f64 {
    let area = curve_shape(points, polarity.closing_edge()).area().abs();
    (area / (VIEWBOX * VIEWBOX)).clamp(0.0, 1.0)
}

/// `(x, handle_x, left_y, right_y)` for every segment.
fn segments(points: &[f64]) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
    let gaps = points.len().saturating_sub(1).max(1) as f64;
    let half_span = (1.0 / gaps * VIEWBOX) / 2.0;
    points.windows(2).enumerate().map(move |(j, w)| {
        let x = ((j + 1) as f64 / gaps) * VIEWBOX;
        (x, x - half_span, w[0], w[1])
    })
}

#[cfg(test)]
#[path = "../tests/unit/curve.rs"]
mod tests;
