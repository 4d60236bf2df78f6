//! The current graph and its layout.
//!
//! [`EmbeddingStore`] owns one graph together with everything derived from
//! it: the symmetric adjacency lookup, the current vertex coordinates and the
//! latest face layout. Derived state is rebuilt eagerly whenever the graph is
//! replaced. Layout passes compute a fresh result from a snapshot and swap it
//! in only when they succeed.

use std::sync::Arc;

use nalgebra::Point2;

use crate::algo::harmonic::{circle_positions, tutte, HarmonicOptions, TutteVariant};
use crate::algo::radial::{radial_faces, RadialOptions};
use crate::algo::spring::{self, SpringOptions, SpringState};
use crate::algo::{Embedding, EntityKind, Progress};
use crate::error::{EmbedError, Result};
use crate::graph::{AdjacencyLookup, FaceAdjacency, Graph};
use crate::shapes::{self, Shape};
use crate::simulation::ForceSettings;

/// Face coordinates with the adjacent pairs used to draw them.
#[derive(Debug, Clone)]
pub struct FaceLayout {
    /// One coordinate per face.
    pub embedding: Embedding,
    /// Adjacent face pairs.
    pub pairs: Vec<(usize, usize)>,
}

/// Owner of the current graph, coordinates and force settings.
#[derive(Debug, Default)]
pub struct EmbeddingStore {
    graph: Graph,
    lookup: AdjacencyLookup,
    coords: Vec<Point2<f64>>,
    faces: Option<FaceLayout>,
    settings: Arc<ForceSettings>,
}

impl EmbeddingStore {
    /// Create an empty store with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store sharing existing settings.
    pub fn with_settings(settings: Arc<ForceSettings>) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Replace the graph.
    ///
    /// Missing derived tables are filled in, the adjacency lookup is rebuilt
    /// and the coordinates are reset from `vertices_coords` (empty if the
    /// graph has none). An invalid graph leaves the store untouched.
    pub fn set_graph(&mut self, mut graph: Graph) -> Result<()> {
        graph.populate();
        graph.validate()?;

        self.lookup = AdjacencyLookup::from_vertices_vertices(&graph.vertices_vertices);
        self.coords = graph.coords_2d();
        self.faces = None;
        self.graph = graph;

        log::info!(
            "graph loaded: {} vertices, {} edges, {} faces",
            self.graph.num_vertices(),
            self.graph.num_edges(),
            self.graph.num_faces()
        );
        Ok(())
    }

    /// The current graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The symmetric vertex adjacency lookup.
    pub fn lookup(&self) -> &AdjacencyLookup {
        &self.lookup
    }

    /// Current vertex coordinates.
    pub fn coords(&self) -> &[Point2<f64>] {
        &self.coords
    }

    /// Current vertex coordinates as an embedding.
    pub fn embedding(&self) -> Embedding {
        Embedding::new(EntityKind::Vertex, self.coords.clone())
    }

    /// The latest face layout, if one was computed for this graph.
    pub fn face_layout(&self) -> Option<&FaceLayout> {
        self.faces.as_ref()
    }

    /// The settings shared with a spring runner.
    pub fn settings(&self) -> &Arc<ForceSettings> {
        &self.settings
    }

    /// Replace the vertex coordinates.
    ///
    /// # Errors
    ///
    /// Fails if there is not exactly one coordinate per vertex.
    pub fn set_coords(&mut self, coords: Vec<Point2<f64>>) -> Result<()> {
        let n = self.graph.num_vertices();
        if coords.len() != n {
            return Err(EmbedError::invalid_param(
                "coords",
                coords.len(),
                "must hold one coordinate per vertex",
            ));
        }
        self.coords = coords;
        Ok(())
    }

    /// Place every vertex evenly on the unit circle.
    ///
    /// Gives the spring embedder a starting point for graphs without
    /// coordinates.
    pub fn seed_on_circle(&mut self) {
        self.coords = circle_positions(self.graph.num_vertices());
    }

    /// One dot per vertex and one segment per edge.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut out = shapes::circles(&self.coords);
        out.extend(shapes::lines(
            &self.coords,
            self.graph.edges_vertices.iter().map(|&[a, b]| (a, b)),
        ));
        out
    }

    /// One dot per face and one segment per adjacent face pair.
    ///
    /// Empty until a face layout has been computed.
    pub fn face_shapes(&self) -> Vec<Shape> {
        let Some(layout) = &self.faces else {
            return Vec::new();
        };
        let points = layout.embedding.as_slice();
        let mut out = shapes::circles(points);
        out.extend(shapes::lines(points, layout.pairs.iter().copied()));
        out
    }

    /// Run a Tutte embedding and store the result.
    ///
    /// Returns `Ok(false)` when the graph has no faces. On error the previous
    /// coordinates are kept.
    pub fn compute_tutte(&mut self, variant: TutteVariant, options: &HarmonicOptions) -> Result<bool> {
        let embedding = match tutte(&self.graph, variant, options) {
            Ok(Some(embedding)) => embedding,
            Ok(None) => return Ok(false),
            Err(e) => {
                log::error!("tutte embedding failed: {e}");
                return Err(e);
            }
        };

        match embedding.kind() {
            EntityKind::Vertex => self.coords = embedding.into_coords(),
            EntityKind::Face => {
                let pairs = FaceAdjacency::build(&self.graph).face_pairs();
                self.faces = Some(FaceLayout { embedding, pairs });
            }
        }
        Ok(true)
    }

    /// Run the radial face layout and store the result.
    ///
    /// Returns `Ok(false)` when the graph has no faces. On error the previous
    /// face layout is kept.
    pub fn compute_radial(&mut self, options: &RadialOptions) -> Result<bool> {
        match radial_faces(&self.graph, options) {
            Ok(Some(layout)) => {
                self.faces = Some(FaceLayout {
                    embedding: layout.embedding,
                    pairs: layout.pairs,
                });
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => {
                log::error!("radial layout failed: {e}");
                Err(e)
            }
        }
    }

    /// Apply one spring tick at the given damping.
    pub fn spring_tick(&mut self, options: &SpringOptions, damping: f64) {
        self.coords = spring::relax_step(
            &self.coords,
            &self.graph.vertices_vertices,
            &self.lookup,
            options,
            damping,
        );
    }

    /// Run a batch of spring ticks starting from full damping.
    pub fn relax(&mut self, ticks: usize, options: &SpringOptions, progress: &Progress) -> Result<()> {
        let mut state = SpringState::new(self.coords.clone());
        spring::relax(
            &mut state,
            &self.graph.vertices_vertices,
            &self.lookup,
            options,
            ticks,
            progress,
        )?;
        self.coords = state.into_coords();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    fn store_with(graph: Graph) -> EmbeddingStore {
        let mut store = EmbeddingStore::new();
        store.set_graph(graph).unwrap();
        store
    }

    #[test]
    fn test_set_graph_derives_state() {
        let store = store_with(Graph::from_faces(4, vec![vec![0, 1, 2, 3]]).with_coords(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
        ]));

        assert_eq!(store.coords().len(), 4);
        assert_eq!(store.lookup().len(), 4);
        assert!(store.lookup().contains(3, 0));
        assert!(!store.lookup().contains(0, 2));

        let shapes = store.shapes();
        let circles = shapes.iter().filter(|s| matches!(s, Shape::Circle { .. })).count();
        let lines = shapes.iter().filter(|s| matches!(s, Shape::Line { .. })).count();
        assert_eq!((circles, lines), (4, 4));
    }

    #[test]
    fn test_invalid_graph_keeps_previous() {
        let mut store = store_with(fixtures::quad());
        let bad = Graph {
            vertices_vertices: vec![vec![1], vec![]],
            ..Default::default()
        };
        assert!(store.set_graph(bad).is_err());
        assert_eq!(store.graph().num_faces(), 1);
        assert_eq!(store.coords().len(), 4);
    }

    #[test]
    fn test_graph_without_coords() {
        let mut store = store_with(Graph::from_edges(3, vec![[0, 1], [1, 2]]));
        assert!(store.coords().is_empty());

        store.seed_on_circle();
        assert_eq!(store.coords().len(), 3);
        assert!(store.set_coords(vec![Point2::origin()]).is_err());
    }

    #[test]
    fn test_tutte_replaces_coords() {
        let mut store = store_with(fixtures::quad());
        assert!(store.compute_tutte(TutteVariant::Vertices, &HarmonicOptions::default()).unwrap());
        assert_eq!(store.coords(), circle_positions(4).as_slice());
    }

    #[test]
    fn test_failed_tutte_keeps_coords() {
        let mut store = store_with(fixtures::tetrahedron());
        let before = store.coords().to_vec();

        let result = store.compute_tutte(TutteVariant::Vertices, &HarmonicOptions::default());
        assert!(matches!(result, Err(EmbedError::NoBoundary)));
        assert_eq!(store.coords(), before.as_slice());
    }

    #[test]
    fn test_tutte_without_faces_is_noop() {
        let mut store = store_with(fixtures::dumbbell([0.0, 0.0], [2.0, 0.0]));
        assert!(!store.compute_tutte(TutteVariant::Faces, &HarmonicOptions::default()).unwrap());
        assert!(!store.compute_radial(&RadialOptions::default()).unwrap());
        assert_eq!(store.coords()[1], Point2::new(2.0, 0.0));
        assert!(store.face_shapes().is_empty());
    }

    #[test]
    fn test_face_layouts() {
        let mut store = store_with(fixtures::grid(3));
        let vertices = store.coords().to_vec();

        assert!(store.compute_tutte(TutteVariant::Faces, &HarmonicOptions::default()).unwrap());
        assert_eq!(store.coords(), vertices.as_slice());
        assert_eq!(store.face_shapes().len(), 9 + 12);

        assert!(store.compute_radial(&RadialOptions::default()).unwrap());
        let layout = store.face_layout().unwrap();
        assert!((layout.embedding.get(4).coords.norm() - 0.5).abs() < 1e-12);

        // A new graph drops the stale face layout
        store.set_graph(fixtures::quad()).unwrap();
        assert!(store.face_layout().is_none());
    }

    #[test]
    fn test_spring_tick() {
        let mut store = store_with(fixtures::dumbbell([0.0, 0.0], [2.0, 0.0]));
        store.spring_tick(&SpringOptions::default(), 1.0);
        let step = std::f64::consts::LN_2 / 100.0;
        assert!((store.coords()[0].x - step).abs() < 1e-15);

        store.relax(50, &SpringOptions::default(), &Progress::none()).unwrap();
        let length = (store.coords()[1] - store.coords()[0]).norm();
        assert!(length < 2.0 - 2.0 * step);
    }
}
