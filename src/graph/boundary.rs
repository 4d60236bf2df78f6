//! Boundary loop detection.
//!
//! A boundary edge is an edge with exactly one incident face. Boundary edges
//! are chained into closed loops, each walked in the direction its owning
//! face traverses it, so a consistently counter-clockwise mesh produces
//! counter-clockwise loops.

use std::collections::HashMap;

use crate::error::{EmbedError, Result};

use super::builder::FaceAdjacency;
use super::Graph;

/// One connected boundary component.
///
/// `edges[k]` joins `vertices[k]` to `vertices[(k + 1) % len]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryLoop {
    /// Boundary vertices in walk order.
    pub vertices: Vec<usize>,
    /// Boundary edges in walk order.
    pub edges: Vec<usize>,
}

impl BoundaryLoop {
    /// Number of edges (and vertices) in the loop.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the loop is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Find every boundary loop of a graph.
///
/// Returns an empty list for closed meshes and for graphs without faces.
pub fn boundaries(graph: &Graph) -> Vec<BoundaryLoop> {
    boundaries_with(graph, &FaceAdjacency::build(graph))
}

/// Find every boundary loop using precomputed edge/face tables.
pub fn boundaries_with(graph: &Graph, adjacency: &FaceAdjacency) -> Vec<BoundaryLoop> {
    let num_edges = adjacency.edges_vertices.len();

    // Directed boundary edges and their outgoing lists
    let mut directed: Vec<Option<(usize, usize)>> = vec![None; num_edges];
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut boundary_edges = Vec::new();

    for (e, faces) in adjacency.edges_faces.iter().enumerate() {
        if faces.len() != 1 {
            continue;
        }
        let [a, b] = adjacency.edges_vertices[e];
        let (from, to) = match graph.faces_vertices.get(faces[0]) {
            Some(face) if traverses(face, b, a) => (b, a),
            _ => (a, b),
        };
        directed[e] = Some((from, to));
        outgoing.entry(from).or_default().push(e);
        boundary_edges.push(e);
    }

    let mut visited = vec![false; num_edges];
    let mut loops = Vec::new();

    for &start in &boundary_edges {
        if visited[start] {
            continue;
        }

        let mut vertices = Vec::new();
        let mut edges = Vec::new();
        let origin = directed[start].map_or(0, |(from, _)| from);
        let mut e = start;

        while let Some((from, to)) = directed[e] {
            visited[e] = true;
            vertices.push(from);
            edges.push(e);

            if to == origin {
                break;
            }
            let next = outgoing
                .get(&to)
                .and_then(|candidates| candidates.iter().copied().find(|&c| !visited[c]));
            match next {
                Some(next) => e = next,
                None => {
                    log::warn!("boundary walk starting at edge {start} did not close at vertex {to}");
                    break;
                }
            }
        }

        loops.push(BoundaryLoop { vertices, edges });
    }

    log::debug!(
        "found {} boundary loop(s) over {} boundary edge(s)",
        loops.len(),
        boundary_edges.len()
    );

    loops
}

/// Find the single boundary loop of a disk-topology mesh.
///
/// # Errors
///
/// - [`EmbedError::NoBoundary`] for closed meshes (or graphs without faces)
/// - [`EmbedError::MultipleBoundaries`] when the mesh has holes
pub fn single_boundary(graph: &Graph) -> Result<BoundaryLoop> {
    single_boundary_with(graph, &FaceAdjacency::build(graph))
}

/// [`single_boundary`] using precomputed edge/face tables.
pub fn single_boundary_with(graph: &Graph, adjacency: &FaceAdjacency) -> Result<BoundaryLoop> {
    let mut loops = boundaries_with(graph, adjacency);
    match loops.len() {
        0 => Err(EmbedError::NoBoundary),
        1 => Ok(loops.remove(0)),
        count => Err(EmbedError::MultipleBoundaries { count }),
    }
}

/// Whether the face winding walks from `a` directly to `b`.
fn traverses(face: &[usize], a: usize, b: usize) -> bool {
    let n = face.len();
    (0..n).any(|k| face[k] == a && face[(k + 1) % n] == b)
}
