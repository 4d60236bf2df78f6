//! Layout algorithms.
//!
//! This module contains the algorithms that turn connectivity into 2D
//! coordinates:
//!
//! - **Harmonic**: Tutte embedding of vertices or faces with the boundary
//!   pinned to the unit circle
//! - **Radial**: concentric breadth-first layout of faces
//! - **Spring**: Eades force-directed relaxation of vertices
//!
//! The harmonic solve is built on the small sparse toolkit in [`sparse`].

pub mod embedding;
pub mod harmonic;
pub mod progress;
pub mod radial;
pub mod sparse;
pub mod spring;

pub use embedding::{Embedding, EntityKind};
pub use progress::Progress;
