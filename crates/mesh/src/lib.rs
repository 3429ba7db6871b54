//! Procedural grid mesh: a jittered X/Z lattice triangulated into CCW triangles.
//!
//! # Invariants
//! - Vertices are stored row-major (z outer, x inner); index computation depends on it.
//! - `indices.len() == 6 * segments_x * segments_z` and every index is in range.
//! - Triangles wind CCW from +Y whenever the jitter scale is at most
//!   [`FOLD_FREE_JITTER`]; larger jitter may fold a few over.
//! - Y is never jittered. The mesh is never mutated after `build()`.

mod grid;
mod mesh;

pub use grid::{DEFAULT_JITTER_SCALE, FOLD_FREE_JITTER, GridMeshBuilder, MeshError};
pub use mesh::{Mesh, MeshStats, Vertex};

pub fn crate_info() -> &'static str {
    "gridwave-mesh v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("mesh"));
    }
}
