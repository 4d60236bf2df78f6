//! Layout result storage.
//!
//! This module provides the [`Embedding`] type: one 2D coordinate per vertex
//! or per face, depending on which layout produced it.

use nalgebra::Point2;

/// Which entities an embedding places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// One coordinate per vertex.
    Vertex,
    /// One coordinate per face.
    Face,
}

/// 2D coordinates for every entity of a graph.
///
/// Embeddings are produced whole by a layout pass and replaced whole by the
/// next one; they are never patched in place by the solvers.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    kind: EntityKind,
    coords: Vec<Point2<f64>>,
}

impl Embedding {
    /// Create an embedding from coordinates indexed by entity.
    pub fn new(kind: EntityKind, coords: Vec<Point2<f64>>) -> Self {
        Self { kind, coords }
    }

    /// The kind of entity placed.
    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Coordinates of one entity.
    #[inline]
    pub fn get(&self, index: usize) -> Point2<f64> {
        self.coords[index]
    }

    /// Number of coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterate over coordinates with their entity index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Point2<f64>)> + '_ {
        self.coords.iter().copied().enumerate()
    }

    /// Get the raw coordinates slice.
    pub fn as_slice(&self) -> &[Point2<f64>] {
        &self.coords
    }

    /// Take ownership of the coordinates.
    pub fn into_coords(self) -> Vec<Point2<f64>> {
        self.coords
    }

    /// Coordinates as plain `[x, y]` pairs, for serialization.
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.coords.iter().map(|p| [p.x, p.y]).collect()
    }

    /// Compute the bounding box of the coordinates.
    ///
    /// Returns `None` if the embedding is empty.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = *self.coords.first()?;
        let mut min = first;
        let mut max = first;

        for p in &self.coords {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        Some((min, max))
    }
}
