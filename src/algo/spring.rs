//! Eades spring embedder.
//!
//! Each tick moves every vertex by the sum of two forces:
//!
//! - **Repulsion** between every pair of non-adjacent vertices,
//!   `repulsion * d / |d|^2` with `d = p_i - p_j`.
//! - **Attraction** along every edge, `spring * ln(|d|) / goal` in the unit
//!   direction of the neighbor. Edges longer than one unit pull, shorter ones
//!   push, so the rest length is 1.
//!
//! Both forces are scaled by the current damping. A tick reads a snapshot of
//! the coordinates and returns a fresh array; nothing is updated in place, so
//! the result does not depend on vertex order.
//!
//! # Example
//!
//! ```
//! use flatland::algo::spring::{SpringOptions, SpringState};
//! use flatland::graph::AdjacencyLookup;
//! use nalgebra::Point2;
//!
//! let neighbors = vec![vec![1], vec![0]];
//! let lookup = AdjacencyLookup::from_vertices_vertices(&neighbors);
//! let mut state = SpringState::new(vec![Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)]);
//!
//! for _ in 0..100 {
//!     state.step(&neighbors, &lookup, &SpringOptions::default());
//! }
//!
//! // The edge has relaxed toward unit length
//! let length = (state.coords()[1] - state.coords()[0]).norm();
//! assert!(length < 1.5);
//! ```
//!
//! # References
//!
//! - Eades, P. (1984). "A heuristic for graph drawing." Congressus Numerantium.

use nalgebra::{Point2, Vector2};
use rayon::prelude::*;

use crate::error::{EmbedError, Result};
use crate::graph::AdjacencyLookup;

use super::Progress;

/// Options for the spring embedder.
#[derive(Debug, Clone)]
pub struct SpringOptions {
    /// Divisor of the attraction term. Larger values give smaller steps.
    pub goal: f64,

    /// Attraction strength along edges.
    pub spring: f64,

    /// Repulsion strength between non-adjacent vertices.
    pub repulsion: f64,

    /// Factor applied to the damping after every tick.
    /// 1.0 holds the damping constant.
    pub damping_decay: f64,

    /// Whether to compute repulsion in parallel (default: false).
    pub parallel: bool,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            goal: 100.0,
            spring: 1.0,
            repulsion: 2.0,
            damping_decay: 1.0,
            parallel: false,
        }
    }
}

impl SpringOptions {
    /// Set the attraction divisor.
    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal = goal;
        self
    }

    /// Set the attraction strength.
    pub fn with_spring(mut self, spring: f64) -> Self {
        self.spring = spring;
        self
    }

    /// Set the repulsion strength.
    pub fn with_repulsion(mut self, repulsion: f64) -> Self {
        self.repulsion = repulsion;
        self
    }

    /// Set the per-tick damping decay, clamped to `[0, 1]`.
    pub fn with_damping_decay(mut self, decay: f64) -> Self {
        self.damping_decay = decay.clamp(0.0, 1.0);
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.goal.is_finite() && self.goal > 0.0) {
            return Err(EmbedError::invalid_param("goal", self.goal, "must be positive and finite"));
        }
        if !(self.spring.is_finite() && self.spring >= 0.0) {
            return Err(EmbedError::invalid_param("spring", self.spring, "must be non-negative"));
        }
        if !(self.repulsion.is_finite() && self.repulsion >= 0.0) {
            return Err(EmbedError::invalid_param(
                "repulsion",
                self.repulsion,
                "must be non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.damping_decay) {
            return Err(EmbedError::invalid_param(
                "damping_decay",
                self.damping_decay,
                "must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Repulsive displacement of every vertex.
///
/// Adjacent pairs and coincident pairs contribute nothing.
pub fn repulsion_forces(
    coords: &[Point2<f64>],
    lookup: &AdjacencyLookup,
    options: &SpringOptions,
    damping: f64,
) -> Vec<Vector2<f64>> {
    let scale = options.repulsion * damping;
    let force_on = |i: usize| -> Vector2<f64> {
        let p = coords[i];
        let mut total = Vector2::zeros();
        for (j, q) in coords.iter().enumerate() {
            if i == j || lookup.contains(i, j) {
                continue;
            }
            let d = p - q;
            let dist_sq = d.norm_squared();
            if dist_sq > 0.0 {
                total += d * (scale / dist_sq);
            }
        }
        total
    };

    if options.parallel {
        (0..coords.len()).into_par_iter().map(force_on).collect()
    } else {
        (0..coords.len()).map(force_on).collect()
    }
}

/// Attractive displacement of every vertex along its edges.
///
/// Neighbor indices outside `coords` are skipped.
pub fn attraction_forces(
    coords: &[Point2<f64>],
    neighbors: &[Vec<usize>],
    options: &SpringOptions,
    damping: f64,
) -> Vec<Vector2<f64>> {
    let scale = options.spring * damping / options.goal;

    (0..coords.len())
        .map(|i| {
            let p = coords[i];
            let mut total = Vector2::zeros();
            for &j in neighbors.get(i).map(Vec::as_slice).unwrap_or_default() {
                let Some(q) = coords.get(j) else { continue };
                let d = q - p;
                let dist = d.norm();
                if dist > 0.0 {
                    total += d * (scale * dist.ln() / dist);
                }
            }
            total
        })
        .collect()
}

/// One relaxation tick: every vertex moves by its attraction plus repulsion.
pub fn relax_step(
    coords: &[Point2<f64>],
    neighbors: &[Vec<usize>],
    lookup: &AdjacencyLookup,
    options: &SpringOptions,
    damping: f64,
) -> Vec<Point2<f64>> {
    let repel = repulsion_forces(coords, lookup, options, damping);
    let attract = attraction_forces(coords, neighbors, options, damping);

    coords
        .iter()
        .zip(repel.iter().zip(&attract))
        .map(|(p, (r, a))| p + a + r)
        .collect()
}

/// Coordinates and damping carried from one tick to the next.
#[derive(Debug, Clone)]
pub struct SpringState {
    coords: Vec<Point2<f64>>,
    damping: f64,
    ticks: u64,
}

impl SpringState {
    /// Start from the given coordinates with damping 1.0.
    pub fn new(coords: Vec<Point2<f64>>) -> Self {
        Self {
            coords,
            damping: 1.0,
            ticks: 0,
        }
    }

    /// Current coordinates.
    #[inline]
    pub fn coords(&self) -> &[Point2<f64>] {
        &self.coords
    }

    /// Current damping.
    #[inline]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// Number of ticks taken.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Restore full damping, as when a simulation is restarted.
    pub fn reset_damping(&mut self) {
        self.damping = 1.0;
    }

    /// Advance by one tick.
    pub fn step(&mut self, neighbors: &[Vec<usize>], lookup: &AdjacencyLookup, options: &SpringOptions) {
        self.coords = relax_step(&self.coords, neighbors, lookup, options, self.damping);
        self.damping *= options.damping_decay;
        self.ticks += 1;
    }

    /// Take ownership of the coordinates.
    pub fn into_coords(self) -> Vec<Point2<f64>> {
        self.coords
    }
}

/// Run a fixed number of ticks back to back.
///
/// # Errors
///
/// Returns an error if the options are invalid; the state is untouched.
pub fn relax(
    state: &mut SpringState,
    neighbors: &[Vec<usize>],
    lookup: &AdjacencyLookup,
    options: &SpringOptions,
    ticks: usize,
    progress: &Progress,
) -> Result<()> {
    options.validate()?;

    log::debug!(
        "relaxing {} vertices for {ticks} ticks (parallel: {})",
        state.coords.len(),
        options.parallel
    );

    for tick in 0..ticks {
        progress.report(tick, ticks, "Relaxing springs");
        state.step(neighbors, lookup, options);
    }
    progress.report(ticks, ticks, "Relaxing springs");

    Ok(())
}
