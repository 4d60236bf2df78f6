//! # Flatland
//!
//! Planar layout of mesh connectivity.
//!
//! Flatland takes the combinatorial structure of a mesh (vertices, edges and
//! faces, with or without coordinates) and computes 2D positions suitable for
//! drawing it.
//!
//! ## Features
//!
//! - **Tutte embedding**: pins the single boundary loop to the unit circle and
//!   solves a sparse linear system so every interior vertex (or face) sits at
//!   the average of its neighbors
//! - **Radial layout**: places faces on concentric rings by distance from the
//!   boundary
//! - **Spring embedder**: Eades force-directed relaxation, either in batches or
//!   on a real-time background ticker
//! - **File formats**: FOLD documents and Wavefront OBJ
//!
//! ## Quick Start
//!
//! ```no_run
//! use flatland::prelude::*;
//!
//! let mut store = EmbeddingStore::new();
//! store.set_graph(flatland::io::load("disk.obj").unwrap()).unwrap();
//!
//! store.compute_tutte(TutteVariant::Vertices, &HarmonicOptions::default()).unwrap();
//! let json = serde_json::to_string(&store.shapes()).unwrap();
//! println!("{json}");
//! ```
//!
//! ## Building Graphs Programmatically
//!
//! ```
//! use flatland::prelude::*;
//!
//! // Two triangles sharing an edge
//! let mut graph = Graph::from_faces(4, vec![vec![0, 1, 2], vec![0, 2, 3]]);
//! graph.populate();
//!
//! assert_eq!(graph.num_edges(), 5);
//!
//! // Every vertex is on the boundary, so the embedding is a square on the circle
//! let embedding = tutte_vertices(&graph, &HarmonicOptions::default())
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(embedding.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod graph;
pub mod io;
pub mod shapes;
pub mod simulation;
pub mod store;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use flatland::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::harmonic::{tutte, tutte_faces, tutte_vertices, HarmonicOptions, TutteVariant};
    pub use crate::algo::radial::{radial_faces, RadialOptions};
    pub use crate::algo::spring::SpringOptions;
    pub use crate::algo::{Embedding, EntityKind, Progress};
    pub use crate::error::{EmbedError, Result};
    pub use crate::graph::{AdjacencyLookup, BoundaryLoop, Graph};
    pub use crate::shapes::Shape;
    pub use crate::simulation::ForceSettings;
    pub use crate::store::EmbeddingStore;
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_disk_pipeline() {
        // A hexagon fan: one interior vertex, six on the boundary
        let faces = (1..=6).map(|i| vec![0, i, i % 6 + 1]).collect();
        let mut store = EmbeddingStore::new();
        store.set_graph(Graph::from_faces(7, faces)).unwrap();

        assert!(store
            .compute_tutte(TutteVariant::Vertices, &HarmonicOptions::default())
            .unwrap());
        assert!(store.coords()[0].coords.norm() < 1e-12);

        // Relaxing afterwards keeps the graph finite
        store
            .relax(20, &SpringOptions::default(), &Progress::none())
            .unwrap();
        assert!(store.coords().iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert_eq!(store.shapes().len(), 7 + 12);
    }

    #[test]
    fn test_closed_mesh_is_rejected() {
        let faces = vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]];
        let mut graph = Graph::from_faces(4, faces);
        graph.populate();

        let err = tutte_vertices(&graph, &HarmonicOptions::default()).unwrap_err();
        assert!(err.is_topology());
        assert_eq!(err.to_string(), "no boundaries found");
    }
}
