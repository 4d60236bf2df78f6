//! Error types for flatland.
//!
//! Topology failures (missing or multiple boundary loops) and numerical
//! failures of the harmonic solve are reported here, alongside the usual
//! I/O and document errors of the loaders.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`EmbedError`].
pub type Result<T> = std::result::Result<T, EmbedError>;

/// Errors that can occur while building or embedding a graph.
#[derive(Error, Debug)]
pub enum EmbedError {
    /// The mesh has no open edges, so no boundary loop exists.
    #[error("no boundaries found")]
    NoBoundary,

    /// The mesh has more than one boundary loop (holes are unsupported).
    #[error("too many boundaries: found {count}, expected exactly one")]
    MultipleBoundaries {
        /// Number of boundary loops found.
        count: usize,
    },

    /// An interior node has no neighbors, so it has no harmonic average.
    #[error("degenerate graph: interior node {node} has no neighbors")]
    DegenerateGraph {
        /// The offending node index.
        node: usize,
    },

    /// The assembled linear system could not be solved.
    #[error("harmonic system is singular")]
    SingularSystem,

    /// Iterative solver failed to converge.
    #[error("solver failed to converge after {iterations} iterations")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: usize,
    },

    /// The graph violates a connectivity invariant.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error loading a graph from file.
    #[error("failed to load graph from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },
}

impl EmbedError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        EmbedError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Whether this error describes the mesh topology rather than the input
    /// data or the numerics.
    pub fn is_topology(&self) -> bool {
        matches!(
            self,
            EmbedError::NoBoundary | EmbedError::MultipleBoundaries { .. }
        )
    }
}
