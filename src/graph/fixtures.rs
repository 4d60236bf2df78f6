//! Small graphs shared by the unit tests.

use super::Graph;

/// A single counter-clockwise unit square.
pub fn quad() -> Graph {
    let mut graph = Graph::from_faces(4, vec![vec![0, 1, 2, 3]]).with_coords(vec![
        vec![0.0, 0.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
    ]);
    graph.populate();
    graph
}

/// An `n` x `n` grid of counter-clockwise quads.
///
/// Vertex `j * (n + 1) + i` sits at `(i, j)`; face `j * n + i` is the quad
/// whose lower-left corner is vertex `(i, j)`.
pub fn grid(n: usize) -> Graph {
    let mut coords = Vec::with_capacity((n + 1) * (n + 1));
    for j in 0..=n {
        for i in 0..=n {
            coords.push(vec![i as f64, j as f64]);
        }
    }

    let mut faces = Vec::with_capacity(n * n);
    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;
            faces.push(vec![v00, v10, v11, v01]);
        }
    }

    let mut graph = Graph::from_faces(coords.len(), faces).with_coords(coords);
    graph.populate();
    graph
}

/// A triangle fan: hub vertex 0 surrounded by a ring of `k` vertices.
pub fn wheel(k: usize) -> Graph {
    let faces = (1..=k).map(|i| vec![0, i, i % k + 1]).collect();
    let mut graph = Graph::from_faces(k + 1, faces);
    graph.populate();
    graph
}

/// A closed tetrahedron (no boundary).
pub fn tetrahedron() -> Graph {
    let mut graph = Graph::from_faces(
        4,
        vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]],
    )
    .with_coords(vec![
        vec![0.0, 0.0, 0.0],
        vec![1.0, 0.0, 0.0],
        vec![0.5, 1.0, 0.0],
        vec![0.5, 0.5, 1.0],
    ]);
    graph.populate();
    graph
}

/// A square ring of four quads around a square hole (two boundaries).
pub fn annulus() -> Graph {
    let mut graph = Graph::from_faces(
        8,
        vec![
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
            vec![3, 0, 4, 7],
        ],
    )
    .with_coords(vec![
        vec![0.0, 0.0],
        vec![3.0, 0.0],
        vec![3.0, 3.0],
        vec![0.0, 3.0],
        vec![1.0, 1.0],
        vec![2.0, 1.0],
        vec![2.0, 2.0],
        vec![1.0, 2.0],
    ]);
    graph.populate();
    graph
}

/// Two vertices joined by one edge at the given positions.
pub fn dumbbell(a: [f64; 2], b: [f64; 2]) -> Graph {
    let mut graph = Graph::from_edges(2, vec![[0, 1]]).with_coords(vec![a.to_vec(), b.to_vec()]);
    graph.populate();
    graph
}
