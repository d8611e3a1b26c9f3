//! Terrain meshing: a square height grid into positions, colors and triangles.
//!
//! ```text
//! i = row * w + col
//!
//!   i ---------- i+1
//!   |          / |
//!   |       /    |
//!   |    /       |
//!   i+w ------- i+w+1
//! ```
//!
//! Each cell emits `[i, i+w+1, i+w]` and `[i, i+1, i+w+1]`.
//!
//! # Invariants
//! - `vertex_count == width * width`.
//! - `index_count == 6 * (width - 1)^2` and every index is `< width * width`.

mod grid;
mod terrain;

pub use grid::{GridLayout, MeshError, generate_indices, generate_vertices};
pub use terrain::{Aabb, TerrainMesh};

pub fn crate_info() -> &'static str {
    "terrainview-mesh v0.1.0"
}
