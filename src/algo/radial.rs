//! Radial layered layout of faces.
//!
//! Faces touching the boundary are spread evenly around the outer circle.
//! Each deeper breadth-first layer sits on a smaller concentric circle, and
//! every face in it takes the circular mean of the angles of its neighbors in
//! earlier layers. The result is a quick, solve-free picture of the dual
//! graph.

use std::f64::consts::TAU;

use nalgebra::Point2;

use crate::error::{EmbedError, Result};
use crate::graph::{bfs_layers, Graph, Layers};

use super::embedding::{EntityKind, Embedding};
use super::harmonic::{FaceTopology, Topology};

/// Options for the radial layout.
#[derive(Debug, Clone)]
pub struct RadialOptions {
    /// Radius of the outer (boundary) ring.
    pub radius: f64,
}

impl Default for RadialOptions {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

impl RadialOptions {
    /// Set the outer ring radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }
}

/// A radial face layout with the data needed to draw it.
#[derive(Debug, Clone)]
pub struct RadialLayout {
    /// One coordinate per face.
    pub embedding: Embedding,
    /// The concentric face layers, boundary faces first.
    pub layers: Layers,
    /// Adjacent face pairs, for drawing the dual edges.
    pub pairs: Vec<(usize, usize)>,
}

/// Angle of the sum of unit vectors at the given angles.
///
/// Returns 0 when the vectors cancel out or there are none.
pub fn circular_mean(angles: impl IntoIterator<Item = f64>) -> f64 {
    let (sin, cos) = angles
        .into_iter()
        .fold((0.0, 0.0), |(s, c), a| (s + a.sin(), c + a.cos()));
    sin.atan2(cos)
}

/// Lay out the faces of a graph on concentric rings.
///
/// Returns `Ok(None)` when the graph has no face data. Faces not reachable
/// from the boundary are placed at the origin.
///
/// # Errors
///
/// Propagates boundary detection errors and rejects a non-positive radius.
pub fn radial_faces(graph: &Graph, options: &RadialOptions) -> Result<Option<RadialLayout>> {
    if !(options.radius.is_finite() && options.radius > 0.0) {
        return Err(EmbedError::invalid_param(
            "radius",
            options.radius,
            "must be positive and finite",
        ));
    }

    let Some(topology) = FaceTopology::from_graph(graph)? else {
        return Ok(None);
    };

    let layers = bfs_layers(topology.adjacency(), topology.boundary());
    let num_layers = layers.len();

    let mut angles: Vec<Option<f64>> = vec![None; topology.len()];
    let mut coords = vec![Point2::origin(); topology.len()];

    for (depth, row) in layers.rows().iter().enumerate() {
        let radius = options.radius * (1.0 - depth as f64 / num_layers as f64);
        for (i, &face) in row.iter().enumerate() {
            let angle = if depth == 0 {
                TAU * i as f64 / row.len() as f64
            } else {
                circular_mean(
                    topology
                        .neighbors(face)
                        .iter()
                        .filter(|&&g| layers.depth(g).is_some_and(|d| d < depth))
                        .filter_map(|&g| angles[g]),
                )
            };
            angles[face] = Some(angle);
            coords[face] = Point2::new(radius * angle.cos(), radius * angle.sin());
        }
    }

    let unreached = angles.iter().filter(|a| a.is_none()).count();
    if unreached > 0 {
        log::warn!("{unreached} face(s) unreachable from the boundary placed at the origin");
    }
    log::debug!("radial layout: {} faces in {num_layers} layer(s)", topology.len());

    Ok(Some(RadialLayout {
        embedding: Embedding::new(EntityKind::Face, coords),
        layers,
        pairs: topology.face_pairs().to_vec(),
    }))
}
