//! Graph connectivity.
//!
//! This module provides the [`Graph`] type, a plain connectivity document
//! following the FOLD field naming convention, together with the tables
//! derived from it.
//!
//! # Overview
//!
//! A graph is described by dense integer indices:
//! - `vertices_vertices[v]` lists the vertices adjacent to `v`
//! - `edges_vertices[e]` holds the two endpoints of edge `e`
//! - `faces_vertices[f]` lists the vertices of face `f` in winding order
//!
//! Only some tables need to be present. [`Graph::populate`] derives the
//! missing ones (see [`builder`]), and [`boundary`] and [`layers`] provide
//! the traversals the layout algorithms need.
//!
//! # Construction
//!
//! ```
//! use flatland::graph::Graph;
//!
//! // A single quad
//! let mut graph = Graph::from_faces(4, vec![vec![0, 1, 2, 3]]);
//! graph.populate();
//!
//! assert_eq!(graph.num_edges(), 4);
//! assert_eq!(graph.vertices_vertices[0], vec![1, 3]);
//! ```

pub mod boundary;
pub mod builder;
pub mod layers;

#[cfg(test)]
pub(crate) mod fixtures;

use nalgebra::Point2;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EmbedError, Result};

pub use boundary::{boundaries, single_boundary, BoundaryLoop};
pub use builder::{AdjacencyLookup, FaceAdjacency};
pub use layers::{bfs_layers, Layers};

/// Mesh connectivity with optional vertex coordinates.
///
/// Empty tables are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Vertex positions. Only the first two components are used for layout.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices_coords: Vec<Vec<f64>>,

    /// Adjacent vertices of every vertex. Must be symmetric.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vertices_vertices: Vec<Vec<usize>>,

    /// Endpoints of every edge.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edges_vertices: Vec<[usize; 2]>,

    /// Faces incident to every edge.
    ///
    /// Documents may pad boundary edges with `null`; those entries are dropped.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "drop_nulls"
    )]
    pub edges_faces: Vec<Vec<usize>>,

    /// Vertices of every face in winding order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faces_vertices: Vec<Vec<usize>>,

    /// Face across each side of every face, `None` on the boundary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub faces_faces: Vec<Vec<Option<usize>>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph from face windings only.
    ///
    /// `num_vertices` fixes the vertex count even when some vertices are not
    /// referenced by any face.
    pub fn from_faces(num_vertices: usize, faces_vertices: Vec<Vec<usize>>) -> Self {
        Self {
            vertices_vertices: vec![Vec::new(); num_vertices],
            faces_vertices,
            ..Default::default()
        }
    }

    /// Create a graph from an edge list only.
    pub fn from_edges(num_vertices: usize, edges_vertices: Vec<[usize; 2]>) -> Self {
        Self {
            vertices_vertices: builder::make_vertices_vertices(num_vertices, &edges_vertices),
            edges_vertices,
            ..Default::default()
        }
    }

    /// Attach vertex coordinates.
    pub fn with_coords(mut self, coords: Vec<Vec<f64>>) -> Self {
        self.vertices_coords = coords;
        self
    }

    /// Number of vertices.
    ///
    /// Taken from the coordinates or the vertex adjacency when present,
    /// otherwise from the largest index referenced by edges or faces.
    pub fn num_vertices(&self) -> usize {
        let referenced = self
            .edges_vertices
            .iter()
            .flat_map(|e| e.iter())
            .chain(self.faces_vertices.iter().flatten())
            .map(|&v| v + 1)
            .max()
            .unwrap_or(0);
        self.vertices_coords
            .len()
            .max(self.vertices_vertices.len())
            .max(referenced)
    }

    /// Number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges_vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces_vertices.len()
    }

    /// Whether the graph carries face data.
    #[inline]
    pub fn has_faces(&self) -> bool {
        !self.faces_vertices.is_empty()
    }

    /// 2D vertex positions, dropping any third component.
    ///
    /// Missing components are read as zero.
    pub fn coords_2d(&self) -> Vec<Point2<f64>> {
        self.vertices_coords
            .iter()
            .map(|c| {
                Point2::new(
                    c.first().copied().unwrap_or(0.0),
                    c.get(1).copied().unwrap_or(0.0),
                )
            })
            .collect()
    }

    /// Fill every missing derived table.
    ///
    /// Edges are derived from faces, vertex adjacency from edges, and the
    /// edge-face and face-face tables from both. Tables that are already
    /// present are left untouched, except that `vertices_vertices` is padded
    /// to the full vertex count.
    pub fn populate(&mut self) {
        let n = self.num_vertices();

        if self.edges_vertices.is_empty() && self.has_faces() {
            self.edges_vertices = builder::make_edges_vertices(&self.faces_vertices);
        }

        let adjacency_missing = self.vertices_vertices.iter().all(|vv| vv.is_empty());
        if adjacency_missing && !self.edges_vertices.is_empty() {
            self.vertices_vertices = builder::make_vertices_vertices(n, &self.edges_vertices);
        } else if self.vertices_vertices.len() < n {
            self.vertices_vertices.resize(n, Vec::new());
        }

        if self.has_faces() {
            if self.edges_faces.is_empty() {
                self.edges_faces =
                    builder::make_edges_faces(&self.edges_vertices, &self.faces_vertices);
            }
            if self.faces_faces.is_empty() {
                self.faces_faces = builder::make_faces_faces(
                    &self.edges_vertices,
                    &self.faces_vertices,
                    &self.edges_faces,
                );
            }
        }
    }

    /// Check index bounds, self-loops and adjacency symmetry.
    ///
    /// An asymmetric `vertices_vertices` (j listed for i but not i for j) is
    /// rejected rather than interpreted as a directed edge.
    pub fn validate(&self) -> Result<()> {
        let n = self.num_vertices();

        for (v, neighbors) in self.vertices_vertices.iter().enumerate() {
            for &u in neighbors {
                if u >= n {
                    return Err(EmbedError::InvalidGraph(format!(
                        "vertex {v} references out-of-range vertex {u}"
                    )));
                }
                if u == v {
                    return Err(EmbedError::InvalidGraph(format!("vertex {v} has a self-loop")));
                }
                let symmetric = self
                    .vertices_vertices
                    .get(u)
                    .is_some_and(|back| back.contains(&v));
                if !symmetric {
                    return Err(EmbedError::InvalidGraph(format!(
                        "vertex {v} lists {u} as a neighbor but {u} does not list {v}"
                    )));
                }
            }
        }

        for (e, &[a, b]) in self.edges_vertices.iter().enumerate() {
            if a == b {
                return Err(EmbedError::InvalidGraph(format!("edge {e} is a self-loop")));
            }
            if a >= n || b >= n {
                return Err(EmbedError::InvalidGraph(format!(
                    "edge {e} references out-of-range vertex"
                )));
            }
        }

        for (f, face) in self.faces_vertices.iter().enumerate() {
            if face.len() < 3 {
                return Err(EmbedError::InvalidGraph(format!(
                    "face {f} has fewer than three vertices"
                )));
            }
            if let Some(&v) = face.iter().find(|&&v| v >= n) {
                return Err(EmbedError::InvalidGraph(format!(
                    "face {f} references out-of-range vertex {v}"
                )));
            }
        }

        Ok(())
    }
}

fn drop_nulls<'de, D>(deserializer: D) -> std::result::Result<Vec<Vec<usize>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rows: Vec<Vec<Option<usize>>> = Deserialize::deserialize(deserializer)?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().flatten().collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::fixtures;
    use super::*;

    #[test]
    fn test_num_vertices_from_faces() {
        let graph = Graph {
            faces_vertices: vec![vec![0, 1, 2], vec![0, 2, 5]],
            ..Default::default()
        };
        assert_eq!(graph.num_vertices(), 6);
        assert_eq!(Graph::from_faces(8, vec![vec![0, 1, 2]]).num_vertices(), 8);
    }

    #[test]
    fn test_populate_quad() {
        let graph = fixtures::quad();
        assert_eq!(graph.edges_vertices, vec![[0, 1], [1, 2], [2, 3], [3, 0]]);
        assert_eq!(graph.vertices_vertices[0], vec![1, 3]);
        assert_eq!(graph.vertices_vertices[2], vec![1, 3]);
        assert_eq!(graph.edges_faces, vec![vec![0]; 4]);
        assert_eq!(graph.faces_faces, vec![vec![None; 4]]);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_populate_keeps_existing_tables() {
        let mut graph = Graph::from_edges(3, vec![[0, 1], [1, 2]]);
        graph.populate();
        assert_eq!(graph.vertices_vertices, vec![vec![1], vec![0, 2], vec![1]]);
        assert!(graph.edges_faces.is_empty());
        assert!(graph.faces_faces.is_empty());
    }

    #[test]
    fn test_populated_adjacency_is_symmetric() {
        let graph = fixtures::grid(4);
        for (i, neighbors) in graph.vertices_vertices.iter().enumerate() {
            for &j in neighbors {
                assert!(graph.vertices_vertices[j].contains(&i), "{j} missing {i}");
            }
        }
    }

    #[test]
    fn test_validate_rejects_asymmetric() {
        let graph = Graph {
            vertices_vertices: vec![vec![1], vec![]],
            ..Default::default()
        };
        assert!(matches!(graph.validate(), Err(EmbedError::InvalidGraph(_))));
    }

    #[test]
    fn test_validate_rejects_self_loop() {
        let graph = Graph {
            vertices_vertices: vec![vec![0]],
            ..Default::default()
        };
        assert!(matches!(graph.validate(), Err(EmbedError::InvalidGraph(_))));

        let graph = Graph {
            edges_vertices: vec![[2, 2]],
            ..Default::default()
        };
        assert!(graph.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let graph = Graph {
            vertices_coords: vec![vec![0.0, 0.0]; 2],
            vertices_vertices: vec![vec![5], vec![]],
            ..Default::default()
        };
        assert!(graph.validate().is_err());
    }

    #[test]
    fn test_coords_2d_drops_z() {
        let graph = Graph::new().with_coords(vec![vec![1.0, 2.0, 3.0], vec![4.0]]);
        let coords = graph.coords_2d();
        assert_eq!(coords[0], Point2::new(1.0, 2.0));
        assert_eq!(coords[1], Point2::new(4.0, 0.0));
    }

    #[test]
    fn test_serde_fold_names() {
        let json = r#"{
            "vertices_coords": [[0,0],[1,0],[1,1]],
            "faces_vertices": [[0,1,2]]
        }"#;
        let mut graph: Graph = serde_json::from_str(json).unwrap();
        graph.populate();
        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_edges(), 3);

        let out = serde_json::to_string(&graph).unwrap();
        assert!(out.contains("\"edges_vertices\""));
        assert!(out.contains("\"faces_faces\":[[null,null,null]]"));
    }

    #[test]
    fn test_serde_edges_faces_nulls() {
        let json = r#"{ "edges_vertices": [[0,1]], "edges_faces": [[0, null]] }"#;
        let graph: Graph = serde_json::from_str(json).unwrap();
        assert_eq!(graph.edges_faces, vec![vec![0]]);
    }
}
