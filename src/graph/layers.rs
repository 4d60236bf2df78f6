//! Breadth-first layering of an adjacency graph.
//!
//! Starting from a seed row (typically the faces touching the boundary),
//! each layer holds the not-yet-visited nodes adjacent to the previous layer.
//! Every reachable node lands in exactly one layer.

/// Concentric layers produced by [`bfs_layers`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layers {
    rows: Vec<Vec<usize>>,
    depth: Vec<Option<usize>>,
}

impl Layers {
    /// The layers, seed row first.
    #[inline]
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.rows
    }

    /// Layer index of a node, or `None` if it was never reached.
    #[inline]
    pub fn depth(&self, node: usize) -> Option<usize> {
        self.depth.get(node).copied().flatten()
    }

    /// Number of layers.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no layers (empty seed row).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Multi-source breadth-first layering.
///
/// `neighbors[i]` lists the nodes adjacent to node `i`. Nodes within a layer
/// keep their first-discovery order; duplicates in `first_row` are dropped.
///
/// # Example
///
/// ```
/// use flatland::graph::bfs_layers;
///
/// // A path 0 - 1 - 2 - 3 seeded from both ends
/// let neighbors = vec![vec![1], vec![0, 2], vec![1, 3], vec![2]];
/// let layers = bfs_layers(&neighbors, &[0, 3]);
///
/// assert_eq!(layers.rows(), &[vec![0, 3], vec![1, 2]]);
/// assert_eq!(layers.depth(2), Some(1));
/// ```
pub fn bfs_layers(neighbors: &[Vec<usize>], first_row: &[usize]) -> Layers {
    let n = neighbors.len();
    let mut depth: Vec<Option<usize>> = vec![None; n];
    let mut rows: Vec<Vec<usize>> = Vec::new();

    let mut row = Vec::with_capacity(first_row.len());
    for &node in first_row {
        if node < n && depth[node].is_none() {
            depth[node] = Some(0);
            row.push(node);
        }
    }

    while !row.is_empty() {
        let level = rows.len() + 1;
        let mut next = Vec::new();
        for &node in &row {
            for &adjacent in &neighbors[node] {
                if adjacent < n && depth[adjacent].is_none() {
                    depth[adjacent] = Some(level);
                    next.push(adjacent);
                }
            }
        }
        rows.push(row);
        row = next;
    }

    Layers { rows, depth }
}
