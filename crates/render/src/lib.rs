//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the mesh and a view; they never mutate scene state.
//! - Everything a frame needs from the scene is captured in a `RenderView`.
//!
//! The GPU backend lives in `terrainview-render-wgpu`. `DebugTextRenderer`
//! serves the CLI and tests.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "terrainview-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
