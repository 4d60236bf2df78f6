//! Draw primitives.
//!
//! Layouts are handed to a renderer as a flat list of [`Shape`]s. Each shape
//! serializes as `{"name": "circle", "params": {"cx": .., "cy": .., "r": ..}}`
//! so a front end can dispatch on the name alone.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::algo::Embedding;

/// Radius of the dot drawn for every embedded point.
pub const POINT_RADIUS: f64 = 0.01;

/// A single draw primitive in layout coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "params", rename_all = "lowercase")]
pub enum Shape {
    /// Filled dot.
    Circle {
        /// Center x.
        cx: f64,
        /// Center y.
        cy: f64,
        /// Radius.
        r: f64,
    },
    /// Straight segment.
    Line {
        /// Start x.
        x1: f64,
        /// Start y.
        y1: f64,
        /// End x.
        x2: f64,
        /// End y.
        y2: f64,
    },
    /// Axis-aligned rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Bottom edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
    },
    /// Closed polygon outline.
    Polyline {
        /// Corner points in order.
        points: Vec<[f64; 2]>,
    },
    /// SVG path data.
    Path {
        /// Path commands.
        d: String,
    },
}

impl Shape {
    /// Dot at a point.
    pub fn dot(p: Point2<f64>) -> Self {
        Shape::Circle {
            cx: p.x,
            cy: p.y,
            r: POINT_RADIUS,
        }
    }

    /// Segment between two points.
    pub fn segment(a: Point2<f64>, b: Point2<f64>) -> Self {
        Shape::Line {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
        }
    }
}

/// One dot per point.
pub fn circles(points: &[Point2<f64>]) -> Vec<Shape> {
    points.iter().copied().map(Shape::dot).collect()
}

/// One segment per index pair. Pairs with an out-of-range end are skipped.
pub fn lines<I>(points: &[Point2<f64>], pairs: I) -> Vec<Shape>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    pairs
        .into_iter()
        .filter_map(|(a, b)| Some(Shape::segment(*points.get(a)?, *points.get(b)?)))
        .collect()
}

/// Closed outline through the given point indices.
pub fn polyline(points: &[Point2<f64>], loop_indices: &[usize]) -> Shape {
    Shape::Polyline {
        points: loop_indices
            .iter()
            .filter_map(|&i| points.get(i))
            .map(|p| [p.x, p.y])
            .collect(),
    }
}

/// Closed SVG path through the given points.
///
/// Returns an empty path for an empty point list.
pub fn path(points: &[Point2<f64>]) -> Shape {
    let d = points
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}{} {}", if i == 0 { 'M' } else { 'L' }, p.x, p.y))
        .chain((!points.is_empty()).then(|| "Z".to_string()))
        .collect::<Vec<_>>()
        .join(" ");
    Shape::Path { d }
}

/// Bounding rectangle of an embedding, `None` if empty.
pub fn bounds(embedding: &Embedding) -> Option<Shape> {
    let (min, max) = embedding.bounding_box()?;
    Some(Shape::Rect {
        x: min.x,
        y: min.y,
        width: max.x - min.x,
        height: max.y - min.y,
    })
}
