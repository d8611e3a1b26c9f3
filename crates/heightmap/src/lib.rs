//! Heightmap loading: raw 8-bit grids into scaled heights and vertex colors.
//!
//! A heightmap file is `width * width` unsigned bytes in row-major order with
//! no header. Each byte `b` becomes a height of `b / 256 * height_scale` and a
//! color of `(0, b / 256, 0)`.
//!
//! # Invariants
//! - `heights().len() == colors().len() == width * width`.
//! - Heights lie in `[0, height_scale)`, green channel in `[0, 1)`.

mod raw;
mod synth;

pub use raw::{DEFAULT_HEIGHT_SCALE, Heightmap, HeightmapError, write_raw};
pub use synth::{Pattern, synthesize};

pub fn crate_info() -> &'static str {
    "terrainview-heightmap v0.1.0"
}
