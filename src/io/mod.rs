//! Graph file I/O.
//!
//! This module provides functions for loading and saving graphs.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | FOLD | `.fold`, `.json` | ✓ | ✓ | All connectivity tables |
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | Vertices and faces only |
//!
//! # Usage
//!
//! ```no_run
//! use flatland::io::{load, save};
//!
//! // Load with automatic format detection
//! let graph = load("model.obj").unwrap();
//!
//! // Save with automatic format detection
//! save(&graph, "model.fold").unwrap();
//! ```

pub mod fold;
pub mod obj;

use std::path::Path;

use crate::error::{EmbedError, Result};
use crate::graph::Graph;

/// Supported graph file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// FOLD JSON document.
    Fold,
    /// Wavefront OBJ.
    Obj,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "fold" | "json" => Some(Format::Fold),
            "obj" => Some(Format::Obj),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| EmbedError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a graph from a file with automatic format detection.
///
/// The format is determined by the file extension. Derived tables are not
/// filled in; see [`Graph::populate`].
pub fn load<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Fold => fold::load(path),
        Format::Obj => obj::load(path),
    }
}

/// Save a graph to a file with automatic format detection.
pub fn save<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Fold => fold::save(graph, path),
        Format::Obj => obj::save(graph, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path("a/b/crane.FOLD"), Some(Format::Fold));
        assert_eq!(Format::from_path("mesh.json"), Some(Format::Fold));
        assert_eq!(Format::from_path("mesh.obj"), Some(Format::Obj));
        assert_eq!(Format::from_path("mesh.stl"), None);
        assert_eq!(Format::from_path("mesh"), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load("model.stl").unwrap_err();
        assert!(matches!(err, EmbedError::UnsupportedFormat { ref extension } if extension == "stl"));

        let err = save(&Graph::new(), "noext").unwrap_err();
        assert!(matches!(err, EmbedError::UnsupportedFormat { ref extension } if extension == "(none)"));
    }
}
