//! Harmonic (Tutte) embedding.
//!
//! The boundary loop is pinned evenly around the unit circle and every
//! interior node is placed at the average of its neighbors. Writing that
//! condition for each interior node gives a sparse linear system with two
//! decoupled unknowns (x and y) per node, which is assembled from triplets
//! and solved in one shot.
//!
//! The solver is generic over a [`Topology`]: the same code embeds vertices
//! (vertex-vertex adjacency, boundary vertices pinned) or faces (face-face
//! adjacency, faces touching the boundary pinned).
//!
//! # Example
//!
//! ```
//! use flatland::algo::harmonic::{tutte_vertices, HarmonicOptions};
//! use flatland::graph::Graph;
//!
//! // A fan of four triangles around vertex 0
//! let mut graph = Graph::from_faces(
//!     5,
//!     vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 4], vec![0, 4, 1]],
//! );
//! graph.populate();
//!
//! let embedding = tutte_vertices(&graph, &HarmonicOptions::default())
//!     .unwrap()
//!     .expect("graph has faces");
//!
//! // The hub lands at the centroid of the pinned ring
//! let hub = embedding.get(0);
//! assert!(hub.x.abs() < 1e-12 && hub.y.abs() < 1e-12);
//! ```
//!
//! # References
//!
//! - Tutte, W. T. (1963). "How to draw a graph." Proceedings of the London
//!   Mathematical Society.

use std::f64::consts::TAU;

use nalgebra::{DVector, Point2};

use crate::error::{EmbedError, Result};
use crate::graph::boundary::single_boundary_with;
use crate::graph::builder::make_vertices_vertices;
use crate::graph::{bfs_layers, BoundaryLoop, FaceAdjacency, Graph};

use super::embedding::{EntityKind, Embedding};
use super::sparse::{conjugate_gradient, solve_qr, CsrMatrix};

/// A node set with adjacency and a pinned boundary.
pub trait Topology {
    /// The kind of entity the nodes stand for.
    fn kind(&self) -> EntityKind;

    /// Number of nodes.
    fn len(&self) -> usize;

    /// Neighbors of a node.
    fn neighbors(&self, node: usize) -> &[usize];

    /// Boundary nodes in loop order.
    fn boundary(&self) -> &[usize];

    /// Whether there are no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vertices of a single-boundary mesh.
#[derive(Debug, Clone)]
pub struct VertexTopology {
    neighbors: Vec<Vec<usize>>,
    boundary_loop: BoundaryLoop,
}

impl VertexTopology {
    /// Build the vertex topology of a graph.
    ///
    /// Returns `Ok(None)` when the graph has no face data, since no boundary
    /// can be defined without faces.
    ///
    /// # Errors
    ///
    /// Propagates [`EmbedError::NoBoundary`] and
    /// [`EmbedError::MultipleBoundaries`].
    pub fn from_graph(graph: &Graph) -> Result<Option<Self>> {
        if !graph.has_faces() {
            log::debug!("graph has no faces; skipping vertex topology");
            return Ok(None);
        }

        let adjacency = FaceAdjacency::build(graph);
        let boundary_loop = single_boundary_with(graph, &adjacency)?;

        let n = graph.num_vertices();
        let neighbors = if graph.vertices_vertices.iter().any(|vv| !vv.is_empty()) {
            let mut neighbors = graph.vertices_vertices.clone();
            neighbors.resize(n, Vec::new());
            neighbors
        } else {
            make_vertices_vertices(n, &adjacency.edges_vertices)
        };

        Ok(Some(Self {
            neighbors,
            boundary_loop,
        }))
    }

    /// The boundary loop the vertices were pinned along.
    pub fn boundary_loop(&self) -> &BoundaryLoop {
        &self.boundary_loop
    }
}

impl Topology for VertexTopology {
    fn kind(&self) -> EntityKind {
        EntityKind::Vertex
    }

    fn len(&self) -> usize {
        self.neighbors.len()
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    fn boundary(&self) -> &[usize] {
        &self.boundary_loop.vertices
    }
}

/// Faces of a single-boundary mesh, adjacent across shared edges.
#[derive(Debug, Clone)]
pub struct FaceTopology {
    neighbors: Vec<Vec<usize>>,
    boundary: Vec<usize>,
    pairs: Vec<(usize, usize)>,
}

impl FaceTopology {
    /// Build the face topology of a graph.
    ///
    /// Boundary faces are the faces owning each boundary edge, in loop order;
    /// a face touching several boundary edges keeps its first position.
    /// Returns `Ok(None)` when the graph has no face data.
    ///
    /// # Errors
    ///
    /// Propagates [`EmbedError::NoBoundary`] and
    /// [`EmbedError::MultipleBoundaries`].
    pub fn from_graph(graph: &Graph) -> Result<Option<Self>> {
        if !graph.has_faces() {
            log::debug!("graph has no faces; skipping face topology");
            return Ok(None);
        }

        let adjacency = FaceAdjacency::build(graph);
        let boundary_loop = single_boundary_with(graph, &adjacency)?;

        let mut seen = vec![false; graph.num_faces()];
        let boundary = boundary_loop
            .edges
            .iter()
            .filter_map(|&e| adjacency.edges_faces[e].first().copied())
            .filter(|&f| !std::mem::replace(&mut seen[f], true))
            .collect();

        Ok(Some(Self {
            neighbors: adjacency.face_neighbors(),
            boundary,
            pairs: adjacency.face_pairs(),
        }))
    }

    /// Every unordered pair of adjacent faces.
    pub fn face_pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Neighbor lists of every face.
    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.neighbors
    }
}

impl Topology for FaceTopology {
    fn kind(&self) -> EntityKind {
        EntityKind::Face
    }

    fn len(&self) -> usize {
        self.neighbors.len()
    }

    fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    fn boundary(&self) -> &[usize] {
        &self.boundary
    }
}

/// Translation between node indices and compact unknown blocks.
///
/// Interior node `node` owns unknowns `2k` (x) and `2k + 1` (y) where
/// `k = unknown(node)`. Boundary nodes have no unknowns.
#[derive(Debug, Clone)]
pub struct BackMap {
    unknown: Vec<Option<usize>>,
    interior: Vec<usize>,
}

impl BackMap {
    /// Number interior nodes in ascending order, skipping the boundary.
    pub fn new(num_nodes: usize, boundary: &[usize]) -> Self {
        let mut is_boundary = vec![false; num_nodes];
        for &node in boundary {
            if node < num_nodes {
                is_boundary[node] = true;
            }
        }

        let interior: Vec<usize> = (0..num_nodes).filter(|&i| !is_boundary[i]).collect();
        let mut unknown = vec![None; num_nodes];
        for (k, &node) in interior.iter().enumerate() {
            unknown[node] = Some(k);
        }

        Self { unknown, interior }
    }

    /// Unknown block of a node, `None` for boundary nodes.
    #[inline]
    pub fn unknown(&self, node: usize) -> Option<usize> {
        self.unknown.get(node).copied().flatten()
    }

    /// Node owning an unknown block.
    #[inline]
    pub fn node(&self, block: usize) -> usize {
        self.interior[block]
    }

    /// Interior nodes in block order.
    #[inline]
    pub fn interior(&self) -> &[usize] {
        &self.interior
    }

    /// Number of interior nodes.
    #[inline]
    pub fn interior_count(&self) -> usize {
        self.interior.len()
    }
}

/// Linear solver used for the harmonic system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LinearSolver {
    /// Dense QR least-squares solve of the averaging system as assembled.
    #[default]
    Qr,
    /// Conjugate gradient on the degree-scaled (symmetric Laplacian) system.
    ConjugateGradient {
        /// Maximum number of CG iterations.
        max_iterations: usize,
        /// Relative residual tolerance.
        tolerance: f64,
    },
}

/// Options for the harmonic embedding.
#[derive(Debug, Clone, Default)]
pub struct HarmonicOptions {
    /// How to solve the assembled system.
    pub solver: LinearSolver,
}

impl HarmonicOptions {
    /// Use the given solver.
    pub fn with_solver(mut self, solver: LinearSolver) -> Self {
        self.solver = solver;
        self
    }

    /// Use conjugate gradient with default iteration limits.
    pub fn with_conjugate_gradient(self) -> Self {
        self.with_solver(LinearSolver::ConjugateGradient {
            max_iterations: 10_000,
            tolerance: 1e-12,
        })
    }
}

/// The assembled harmonic system `A x = b`.
#[derive(Debug, Clone)]
pub struct HarmonicSystem {
    size: usize,
    triplets: Vec<(usize, usize, f64)>,
    rhs: DVector<f64>,
    degrees: Vec<f64>,
}

impl HarmonicSystem {
    /// Assemble the averaging equations for every interior node.
    ///
    /// `positions` must hold the pinned coordinates of every boundary node;
    /// entries for interior nodes are ignored. Triplets come out sorted by
    /// (row, column).
    ///
    /// # Errors
    ///
    /// - [`EmbedError::DegenerateGraph`] for an interior node with no neighbors
    /// - [`EmbedError::InvalidGraph`] for a neighbor index out of range
    pub fn assemble<T: Topology + ?Sized>(
        topology: &T,
        positions: &[Point2<f64>],
        back_map: &BackMap,
    ) -> Result<Self> {
        let size = 2 * back_map.interior_count();
        let mut triplets = Vec::new();
        let mut rhs = DVector::zeros(size);
        let mut degrees = vec![0.0; size];

        for (k, &node) in back_map.interior().iter().enumerate() {
            let neighbors = topology.neighbors(node);
            if neighbors.is_empty() {
                return Err(EmbedError::DegenerateGraph { node });
            }

            let (rx, ry) = (2 * k, 2 * k + 1);
            let degree = neighbors.len() as f64;
            let weight = 1.0 / degree;
            degrees[rx] = degree;
            degrees[ry] = degree;

            triplets.push((rx, rx, 1.0));
            triplets.push((ry, ry, 1.0));

            for &j in neighbors {
                if j >= positions.len() {
                    return Err(EmbedError::InvalidGraph(format!(
                        "node {node} references out-of-range neighbor {j}"
                    )));
                }
                match back_map.unknown(j) {
                    Some(m) => {
                        triplets.push((rx, 2 * m, -weight));
                        triplets.push((ry, 2 * m + 1, -weight));
                    }
                    None => {
                        rhs[rx] += weight * positions[j].x;
                        rhs[ry] += weight * positions[j].y;
                    }
                }
            }
        }

        triplets.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

        Ok(Self {
            size,
            triplets,
            rhs,
            degrees,
        })
    }

    /// Number of unknowns (twice the interior node count).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Coefficient triplets, sorted by (row, column).
    #[inline]
    pub fn triplets(&self) -> &[(usize, usize, f64)] {
        &self.triplets
    }

    /// Right-hand side.
    #[inline]
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// The system matrix.
    pub fn matrix(&self) -> CsrMatrix {
        CsrMatrix::from_triplets(self.size, self.size, self.triplets.clone())
    }

    /// The system with every row scaled by its node degree.
    ///
    /// Scaling turns the averaging operator into the graph Laplacian
    /// restricted to interior nodes, which is symmetric whenever the
    /// adjacency is, and positive definite when every component reaches the
    /// boundary.
    pub fn symmetrized(&self) -> (CsrMatrix, DVector<f64>) {
        let triplets = self
            .triplets
            .iter()
            .map(|&(r, c, v)| (r, c, v * self.degrees[r]))
            .collect();
        let rhs = DVector::from_iterator(
            self.size,
            self.rhs.iter().zip(&self.degrees).map(|(b, d)| b * d),
        );
        (CsrMatrix::from_triplets(self.size, self.size, triplets), rhs)
    }

    /// Solve the system.
    pub fn solve(&self, solver: &LinearSolver) -> Result<DVector<f64>> {
        match *solver {
            LinearSolver::Qr => solve_qr(&self.matrix(), &self.rhs),
            LinearSolver::ConjugateGradient {
                max_iterations,
                tolerance,
            } => {
                let (matrix, rhs) = self.symmetrized();
                conjugate_gradient(&matrix, &rhs, None, max_iterations, tolerance)
            }
        }
    }
}

/// `count` points evenly spaced on the unit circle, starting at angle 0.
pub fn circle_positions(count: usize) -> Vec<Point2<f64>> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            Point2::new(angle.cos(), angle.sin())
        })
        .collect()
}

/// Compute the harmonic embedding of a topology.
///
/// Boundary nodes land on the unit circle in loop order; interior nodes are
/// solved for. When every node is on the boundary the system is empty and
/// the circle positions are returned unchanged.
///
/// # Errors
///
/// Returns an error if the system is degenerate or cannot be solved. Nothing
/// is returned partially.
pub fn harmonic_embedding<T: Topology + ?Sized>(
    topology: &T,
    options: &HarmonicOptions,
) -> Result<Embedding> {
    let n = topology.len();
    let boundary = topology.boundary();

    let mut coords = vec![Point2::origin(); n];
    for (&node, p) in boundary.iter().zip(circle_positions(boundary.len())) {
        if node >= n {
            return Err(EmbedError::InvalidGraph(format!(
                "boundary node {node} is out of range"
            )));
        }
        coords[node] = p;
    }

    let back_map = BackMap::new(n, boundary);
    let system = HarmonicSystem::assemble(topology, &coords, &back_map)?;

    // A component with no path to the boundary leaves the system singular.
    let neighbors: Vec<Vec<usize>> = (0..n).map(|i| topology.neighbors(i).to_vec()).collect();
    let layers = bfs_layers(&neighbors, boundary);
    if let Some(&node) = back_map.interior().iter().find(|&&i| layers.depth(i).is_none()) {
        log::warn!("node {node} has no path to the boundary");
        return Err(EmbedError::SingularSystem);
    }

    log::debug!(
        "harmonic system: {} boundary, {} interior, {} unknowns, {} triplets",
        boundary.len(),
        back_map.interior_count(),
        system.size(),
        system.triplets().len()
    );

    let solution = system.solve(&options.solver)?;
    for (k, &node) in back_map.interior().iter().enumerate() {
        coords[node] = Point2::new(solution[2 * k], solution[2 * k + 1]);
    }

    Ok(Embedding::new(topology.kind(), coords))
}

/// Which entities a Tutte embedding places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TutteVariant {
    /// Embed vertices using vertex adjacency.
    #[default]
    Vertices,
    /// Embed faces using face adjacency.
    Faces,
}

/// Tutte embedding of the vertices of a graph.
///
/// Returns `Ok(None)` when the graph has no face data.
pub fn tutte_vertices(graph: &Graph, options: &HarmonicOptions) -> Result<Option<Embedding>> {
    VertexTopology::from_graph(graph)?
        .map(|topology| harmonic_embedding(&topology, options))
        .transpose()
}

/// Tutte embedding of the faces of a graph.
///
/// Returns `Ok(None)` when the graph has no face data.
pub fn tutte_faces(graph: &Graph, options: &HarmonicOptions) -> Result<Option<Embedding>> {
    FaceTopology::from_graph(graph)?
        .map(|topology| harmonic_embedding(&topology, options))
        .transpose()
}

/// Tutte embedding of the chosen entity kind.
pub fn tutte(graph: &Graph, variant: TutteVariant, options: &HarmonicOptions) -> Result<Option<Embedding>> {
    match variant {
        TutteVariant::Vertices => tutte_vertices(graph, options),
        TutteVariant::Faces => tutte_faces(graph, options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::fixtures;

    fn mean_of_neighbors<T: Topology>(topology: &T, embedding: &Embedding, node: usize) -> Point2<f64> {
        let neighbors = topology.neighbors(node);
        let sum = neighbors
            .iter()
            .fold(nalgebra::Vector2::zeros(), |acc, &j| acc + embedding.get(j).coords);
        Point2::from(sum / neighbors.len() as f64)
    }

    fn assert_harmonic<T: Topology>(topology: &T, embedding: &Embedding, tol: f64) {
        let back_map = BackMap::new(topology.len(), topology.boundary());
        for &node in back_map.interior() {
            let expected = mean_of_neighbors(topology, embedding, node);
            let actual = embedding.get(node);
            assert!(
                (expected - actual).norm() < tol,
                "node {node}: {actual:?} != mean {expected:?}"
            );
        }
    }

    /// A hand-made topology with an isolated interior node.
    struct Isolated;

    impl Topology for Isolated {
        fn kind(&self) -> EntityKind {
            EntityKind::Vertex
        }
        fn len(&self) -> usize {
            4
        }
        fn neighbors(&self, node: usize) -> &[usize] {
            const RING: [&[usize]; 4] = [&[1, 2], &[0, 2], &[0, 1], &[]];
            RING[node]
        }
        fn boundary(&self) -> &[usize] {
            &[0, 1, 2]
        }
    }

    #[test]
    fn test_circle_positions() {
        let points = circle_positions(4);
        assert_eq!(points[0], Point2::new(1.0, 0.0));
        assert!((points[1] - Point2::new(0.0, 1.0)).norm() < 1e-15);
        assert!((points[2] - Point2::new(-1.0, 0.0)).norm() < 1e-15);
        assert!(circle_positions(0).is_empty());
    }

    #[test]
    fn test_back_map() {
        let back_map = BackMap::new(5, &[4, 0, 2]);
        assert_eq!(back_map.interior(), &[1, 3]);
        assert_eq!(back_map.unknown(3), Some(1));
        assert_eq!(back_map.unknown(4), None);
        assert_eq!(back_map.node(0), 1);
        assert_eq!(back_map.interior_count(), 2);
    }

    #[test]
    fn test_all_boundary_gives_circle() {
        let graph = fixtures::quad();
        let topology = VertexTopology::from_graph(&graph).unwrap().unwrap();

        let back_map = BackMap::new(topology.len(), topology.boundary());
        let system = HarmonicSystem::assemble(&topology, &circle_positions(4), &back_map).unwrap();
        assert_eq!(system.size(), 0);

        let embedding = harmonic_embedding(&topology, &HarmonicOptions::default()).unwrap();
        assert_eq!(embedding.as_slice(), circle_positions(4).as_slice());
    }

    #[test]
    fn test_assembly_structure() {
        let graph = fixtures::grid(3);
        let topology = VertexTopology::from_graph(&graph).unwrap().unwrap();
        let back_map = BackMap::new(topology.len(), topology.boundary());
        assert_eq!(back_map.interior(), &[5, 6, 9, 10]);

        let mut positions = vec![Point2::origin(); topology.len()];
        for (&v, p) in topology.boundary().iter().zip(circle_positions(12)) {
            positions[v] = p;
        }
        let system = HarmonicSystem::assemble(&topology, &positions, &back_map).unwrap();
        assert_eq!(system.size(), 8);

        // 8 diagonal entries plus 2 interior neighbors per node per axis
        let triplets = system.triplets();
        assert_eq!(triplets.len(), 24);
        assert!(triplets.windows(2).all(|w| (w[0].0, w[0].1) <= (w[1].0, w[1].1)));
        for &(r, c, v) in triplets {
            assert!(r < 8 && c < 8);
            if r == c {
                assert_eq!(v, 1.0);
            } else {
                assert_eq!(v, -0.25);
                // x and y never couple
                assert_eq!(r % 2, c % 2);
            }
        }
        for row in 0..8 {
            assert!(triplets.iter().any(|&(r, c, _)| r == row && c == row));
        }
    }

    #[test]
    fn test_mean_value_with_fixed_neighbors() {
        // Center vertex of a 2x2 grid only touches boundary vertices
        let graph = fixtures::grid(2);
        let topology = VertexTopology::from_graph(&graph).unwrap().unwrap();
        let embedding = harmonic_embedding(&topology, &HarmonicOptions::default()).unwrap();

        let expected = mean_of_neighbors(&topology, &embedding, 4);
        assert!((embedding.get(4) - expected).norm() < 1e-9);
        assert!(embedding.get(4).coords.norm() < 1e-12);
    }

    #[test]
    fn test_grid_is_harmonic() {
        let graph = fixtures::grid(4);
        let topology = VertexTopology::from_graph(&graph).unwrap().unwrap();
        let embedding = harmonic_embedding(&topology, &HarmonicOptions::default()).unwrap();

        assert_eq!(embedding.kind(), EntityKind::Vertex);
        assert_eq!(embedding.len(), 25);
        assert_harmonic(&topology, &embedding, 1e-9);

        // Boundary stays on the unit circle
        for &v in topology.boundary() {
            assert!((embedding.get(v).coords.norm() - 1.0).abs() < 1e-12);
        }
        // Interior strictly inside
        for v in [6, 7, 8, 11, 12, 13, 16, 17, 18] {
            assert!(embedding.get(v).coords.norm() < 1.0);
        }
    }

    #[test]
    fn test_qr_and_cg_agree() {
        let graph = fixtures::grid(5);
        let qr = tutte_vertices(&graph, &HarmonicOptions::default()).unwrap().unwrap();
        let cg = tutte_vertices(&graph, &HarmonicOptions::default().with_conjugate_gradient())
            .unwrap()
            .unwrap();

        for ((_, a), (_, b)) in qr.iter().zip(cg.iter()) {
            assert!((a - b).norm() < 1e-8);
        }
    }

    #[test]
    fn test_face_variant() {
        let graph = fixtures::grid(3);
        let topology = FaceTopology::from_graph(&graph).unwrap().unwrap();
        assert_eq!(topology.boundary(), &[0, 1, 2, 5, 8, 7, 6, 3]);

        let embedding = tutte_faces(&graph, &HarmonicOptions::default()).unwrap().unwrap();
        assert_eq!(embedding.kind(), EntityKind::Face);
        assert_eq!(embedding.len(), 9);
        assert_harmonic(&topology, &embedding, 1e-9);
    }

    #[test]
    fn test_wheel_hub_at_center() {
        let graph = fixtures::wheel(7);
        let embedding = tutte(&graph, TutteVariant::Vertices, &HarmonicOptions::default())
            .unwrap()
            .unwrap();
        assert!(embedding.get(0).coords.norm() < 1e-12);
    }

    #[test]
    fn test_topology_errors_propagate() {
        let options = HarmonicOptions::default();
        assert!(matches!(
            tutte_vertices(&fixtures::tetrahedron(), &options),
            Err(EmbedError::NoBoundary)
        ));
        assert!(matches!(
            tutte_faces(&fixtures::annulus(), &options),
            Err(EmbedError::MultipleBoundaries { count: 2 })
        ));
    }

    #[test]
    fn test_missing_faces_is_noop() {
        let graph = fixtures::dumbbell([0.0, 0.0], [1.0, 0.0]);
        assert!(tutte_vertices(&graph, &HarmonicOptions::default()).unwrap().is_none());
        assert!(tutte_faces(&graph, &HarmonicOptions::default()).unwrap().is_none());
    }

    /// A four-triangle wheel plus a disjoint closed tetrahedron.
    fn wheel_with_floating_tetrahedron() -> Graph {
        let mut faces: Vec<Vec<usize>> = (1..=4).map(|i| vec![0, i, i % 4 + 1]).collect();
        faces.extend([vec![5, 7, 6], vec![5, 6, 8], vec![6, 7, 8], vec![7, 5, 8]]);
        let mut graph = Graph::from_faces(9, faces);
        graph.populate();
        graph
    }

    #[test]
    fn test_unreachable_component_is_singular() {
        let graph = wheel_with_floating_tetrahedron();
        for options in [
            HarmonicOptions::default(),
            HarmonicOptions::default().with_conjugate_gradient(),
        ] {
            assert!(matches!(
                tutte_vertices(&graph, &options),
                Err(EmbedError::SingularSystem)
            ));
            assert!(matches!(
                tutte_faces(&graph, &options),
                Err(EmbedError::SingularSystem)
            ));
        }
    }

    #[test]
    fn test_isolated_interior_node_is_degenerate() {
        assert!(matches!(
            harmonic_embedding(&Isolated, &HarmonicOptions::default()),
            Err(EmbedError::DegenerateGraph { node: 3 })
        ));
    }
}
