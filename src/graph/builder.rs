//! Derived adjacency tables.
//!
//! Every function here is pure and recomputes its table from scratch; there
//! is no incremental update. Edges are undirected and identified by their
//! unordered vertex pair.

use std::collections::{HashMap, HashSet};

use super::Graph;

/// Unordered vertex pair used as an edge key.
#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Map from unordered vertex pair to edge index.
fn edge_index_map(edges_vertices: &[[usize; 2]]) -> HashMap<(usize, usize), usize> {
    let mut map = HashMap::with_capacity(edges_vertices.len());
    for (e, &[a, b]) in edges_vertices.iter().enumerate() {
        map.entry(edge_key(a, b)).or_insert(e);
    }
    map
}

/// Derive the edge list from face windings.
///
/// Edges are numbered in order of first appearance while walking each face,
/// and keep the orientation of the face that first introduced them.
pub fn make_edges_vertices(faces_vertices: &[Vec<usize>]) -> Vec<[usize; 2]> {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut edges = Vec::new();

    for face in faces_vertices {
        let n = face.len();
        for k in 0..n {
            let a = face[k];
            let b = face[(k + 1) % n];
            if a != b && seen.insert(edge_key(a, b)) {
                edges.push([a, b]);
            }
        }
    }

    edges
}

/// Derive symmetric vertex adjacency from the edge list.
///
/// Duplicate edges contribute a single neighbor entry.
pub fn make_vertices_vertices(num_vertices: usize, edges_vertices: &[[usize; 2]]) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); num_vertices];

    for &[a, b] in edges_vertices {
        if a == b || a >= num_vertices || b >= num_vertices {
            continue;
        }
        if !adjacency[a].contains(&b) {
            adjacency[a].push(b);
        }
        if !adjacency[b].contains(&a) {
            adjacency[b].push(a);
        }
    }

    adjacency
}

/// Faces incident to each edge, in ascending face order.
pub fn make_edges_faces(edges_vertices: &[[usize; 2]], faces_vertices: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let lookup = edge_index_map(edges_vertices);
    let mut edges_faces = vec![Vec::new(); edges_vertices.len()];

    for (f, face) in faces_vertices.iter().enumerate() {
        let n = face.len();
        for k in 0..n {
            if let Some(&e) = lookup.get(&edge_key(face[k], face[(k + 1) % n])) {
                if !edges_faces[e].contains(&f) {
                    edges_faces[e].push(f);
                }
            }
        }
    }

    edges_faces
}

/// For each face, the face across each of its sides.
///
/// Side `k` of a face runs from vertex `k` to vertex `k + 1` of its winding.
/// Sides on the boundary (or missing from the edge list) map to `None`.
pub fn make_faces_faces(
    edges_vertices: &[[usize; 2]],
    faces_vertices: &[Vec<usize>],
    edges_faces: &[Vec<usize>],
) -> Vec<Vec<Option<usize>>> {
    let lookup = edge_index_map(edges_vertices);

    faces_vertices
        .iter()
        .enumerate()
        .map(|(f, face)| {
            let n = face.len();
            (0..n)
                .map(|k| {
                    lookup
                        .get(&edge_key(face[k], face[(k + 1) % n]))
                        .and_then(|&e| edges_faces.get(e))
                        .and_then(|faces| faces.iter().copied().find(|&g| g != f))
                })
                .collect()
        })
        .collect()
}

/// Edge and face adjacency derived from a graph snapshot.
///
/// Built fresh on every call; the graph's own derived tables are ignored so
/// that a stale document cannot disagree with its faces.
#[derive(Debug, Clone, Default)]
pub struct FaceAdjacency {
    /// Edge endpoints (taken from the graph, or derived from faces).
    pub edges_vertices: Vec<[usize; 2]>,
    /// Faces incident to every edge.
    pub edges_faces: Vec<Vec<usize>>,
    /// Face across each side of every face.
    pub faces_faces: Vec<Vec<Option<usize>>>,
}

impl FaceAdjacency {
    /// Build the edge/face tables for a graph.
    pub fn build(graph: &Graph) -> Self {
        let edges_vertices = if graph.edges_vertices.is_empty() {
            make_edges_vertices(&graph.faces_vertices)
        } else {
            graph.edges_vertices.clone()
        };
        let edges_faces = make_edges_faces(&edges_vertices, &graph.faces_vertices);
        let faces_faces = make_faces_faces(&edges_vertices, &graph.faces_vertices, &edges_faces);

        Self {
            edges_vertices,
            edges_faces,
            faces_faces,
        }
    }

    /// Face adjacency with boundary sides removed.
    pub fn face_neighbors(&self) -> Vec<Vec<usize>> {
        self.faces_faces
            .iter()
            .map(|sides| sides.iter().flatten().copied().collect())
            .collect()
    }

    /// Every unordered pair of adjacent faces, each reported once.
    pub fn face_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self
            .faces_faces
            .iter()
            .enumerate()
            .flat_map(|(f, sides)| sides.iter().flatten().filter(move |&&g| f < g).map(move |&g| (f, g)))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}

/// Symmetric vertex-pair lookup.
///
/// `contains(i, j) == contains(j, i)` for every pair, even when the source
/// adjacency listed the pair in one direction only.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyLookup {
    pairs: HashSet<(usize, usize)>,
}

impl AdjacencyLookup {
    /// Build from per-vertex neighbor lists.
    pub fn from_vertices_vertices(vertices_vertices: &[Vec<usize>]) -> Self {
        let pairs = vertices_vertices
            .iter()
            .enumerate()
            .flat_map(|(v, neighbors)| neighbors.iter().map(move |&u| edge_key(v, u)))
            .collect();
        Self { pairs }
    }

    /// Whether `i` and `j` are adjacent.
    #[inline]
    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.pairs.contains(&edge_key(i, j))
    }

    /// Number of adjacent pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no adjacent pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
