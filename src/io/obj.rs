//! Wavefront OBJ support.
//!
//! Only `v` and `f` statements are read; texture coordinates, normals,
//! groups and materials are skipped. Face indices may be written as `v`,
//! `v/vt`, `v//vn` or `v/vt/vn`, and negative indices count back from the
//! most recent vertex.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::error::{EmbedError, Result};
use crate::graph::Graph;

/// Parse OBJ text into a graph with coordinates and faces.
pub fn from_str(text: &str) -> Result<Graph> {
    let mut coords: Vec<Vec<f64>> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        let mut tokens = line.split_whitespace();
        let fail = |message: String| EmbedError::InvalidGraph(format!("line {}: {message}", number + 1));

        match tokens.next() {
            Some("v") => {
                let position = tokens
                    .take(3)
                    .map(|t| t.parse::<f64>().map_err(|_| fail(format!("bad coordinate {t:?}"))))
                    .collect::<Result<Vec<f64>>>()?;
                if position.len() < 2 {
                    return Err(fail("vertex needs at least two coordinates".into()));
                }
                coords.push(position);
            }
            Some("f") => {
                let face = tokens
                    .map(|t| resolve_index(t, coords.len()).ok_or_else(|| fail(format!("bad face index {t:?}"))))
                    .collect::<Result<Vec<usize>>>()?;
                if face.len() < 3 {
                    return Err(fail("face needs at least three vertices".into()));
                }
                faces.push(face);
            }
            _ => {}
        }
    }

    log::debug!("parsed OBJ: {} vertices, {} faces", coords.len(), faces.len());
    Ok(Graph::from_faces(coords.len(), faces).with_coords(coords))
}

/// Turn a face token into a zero-based vertex index.
fn resolve_index(token: &str, num_vertices: usize) -> Option<usize> {
    let index: i64 = token.split('/').next()?.parse().ok()?;
    let resolved = match index {
        i if i > 0 => usize::try_from(i - 1).ok()?,
        i if i < 0 => num_vertices.checked_sub(usize::try_from(i.unsigned_abs()).ok()?)?,
        _ => return None,
    };
    (resolved < num_vertices).then_some(resolved)
}

/// Write a graph's coordinates and faces as OBJ text.
///
/// Two-dimensional coordinates are written with `z = 0`.
pub fn to_string(graph: &Graph) -> String {
    let mut out = String::new();
    for c in &graph.vertices_coords {
        let x = c.first().copied().unwrap_or(0.0);
        let y = c.get(1).copied().unwrap_or(0.0);
        let z = c.get(2).copied().unwrap_or(0.0);
        let _ = writeln!(out, "v {x} {y} {z}");
    }
    for face in &graph.faces_vertices {
        let indices: Vec<String> = face.iter().map(|v| (v + 1).to_string()).collect();
        let _ = writeln!(out, "f {}", indices.join(" "));
    }
    out
}

/// Load a graph from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use flatland::io::obj;
///
/// let graph = obj::load("disk.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    from_str(&text).map_err(|e| EmbedError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Save a graph to an OBJ file.
pub fn save<P: AsRef<Path>>(graph: &Graph, path: P) -> Result<()> {
    fs::write(path, to_string(graph))?;
    Ok(())
}
