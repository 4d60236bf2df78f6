//! FOLD document support.
//!
//! A FOLD file is a JSON object whose keys name connectivity tables
//! (`vertices_coords`, `faces_vertices`, ...). Keys this crate does not use,
//! such as `file_spec` or `edges_assignment`, are ignored on load and not
//! written back.

use std::fs;
use std::path::Path;

use crate::error::{EmbedError, Result};
use crate::graph::Graph;

/// Parse a FOLD document.
pub fn from_str(text: &str) -> Result<Graph> {
    Ok(serde_json::from_str(text)?)
}

/// Serialize a graph as a pretty-printed FOLD document.
pub fn to_string(graph: &Graph) -> Result<String> {
    Ok(serde_json::to_string_pretty(graph)?)
}

/// Load a graph from a FOLD file.
///
/// # Example
///
/// ```no_run
/// use flatland::io::fold;
///
/// let graph = fold::load("crane.fold").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    from_str(&text).map_err(|e| EmbedError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Save a graph to a FOLD file.
pub fn save<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    fs::write(path, to_string(graph)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignores_unknown_keys() {
        let text = r#"{
            "file_spec": 1.1,
            "file_creator": "hand",
            "vertices_coords": [[0,0],[1,0],[0,1]],
            "edges_assignment": ["B","B","B"],
            "faces_vertices": [[0,1,2]]
        }"#;
        let graph = from_str(text).unwrap();
        assert_eq!(graph.num_vertices(), 3);
        assert_eq!(graph.num_faces(), 1);
        assert!(graph.edges_vertices.is_empty());
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(from_str("{ not json"), Err(EmbedError::Json(_))));
        assert!(matches!(
            from_str(r#"{"faces_vertices": [[0, -1, 2]]}"#),
            Err(EmbedError::Json(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("flatland-fold-{}.fold", std::process::id()));
        let mut graph = Graph::from_faces(3, vec![vec![0, 1, 2]]).with_coords(vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
        ]);
        graph.populate();

        save(&graph, &path).unwrap();
        let loaded = load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, graph);
    }

    #[test]
    fn test_load_reports_path() {
        let path = std::env::temp_dir().join(format!("flatland-bad-{}.fold", std::process::id()));
        std::fs::write(&path, "[1, 2]").unwrap();
        let err = load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, EmbedError::LoadError { .. }));
        assert!(err.to_string().contains("flatland-bad-"));
    }
}
