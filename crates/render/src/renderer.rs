use glam::{Mat4, Vec3};
use std::fmt::Write as _;
use terrainview_mesh::TerrainMesh;
use terrainview_scene::Scene;

/// Camera and model state captured for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Projection * view.
    pub camera: Mat4,
    /// Model transform of the terrain.
    pub model: Mat4,
    /// Camera position in world space.
    pub eye: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            camera: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
            eye: Vec3::ZERO,
            fov_degrees: 50.0,
        }
    }
}

impl RenderView {
    pub fn from_scene(scene: &Scene) -> Self {
        Self {
            camera: scene.camera.matrix(),
            model: scene.model_matrix(),
            eye: scene.camera.position(),
            fov_degrees: scene.camera.field_of_view(),
        }
    }
}

/// Renderer-agnostic interface.
///
/// A renderer reads the terrain mesh and a view and produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the mesh under the given view.
    fn render(&self, mesh: &TerrainMesh, view: &RenderView) -> Self::Output;
}

/// Human-readable description of a frame: mesh statistics, bounds, camera.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Number of leading vertices to list after the summary.
    pub sample_vertices: usize,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples(sample_vertices: usize) -> Self {
        Self { sample_vertices }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, mesh: &TerrainMesh, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Terrain (vertices={}, indices={}, triangles={}) ===",
            mesh.vertex_count(),
            mesh.index_count(),
            mesh.triangle_count()
        );
        match mesh.bounds() {
            Some(b) => {
                let c = b.center();
                let _ = write!(
                    out,
                    "Bounds: min=({:.2}, {:.2}, {:.2}) max=({:.2}, {:.2}, {:.2})",
                    b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
                );
                let _ = writeln!(out, " center=({:.2}, {:.2}, {:.2})", c.x, c.y, c.z);
            }
            None => out.push_str("Bounds: empty\n"),
        }
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x, view.eye.y, view.eye.z, view.fov_degrees
        );

        // Where the first vertex lands in clip space, as a sanity check on the
        // matrices without a GPU.
        if let Some(p) = mesh.positions.first() {
            let clip = view.camera * view.model * Vec3::from_array(*p).extend(1.0);
            let _ = writeln!(
                out,
                "First vertex clip: ({:.3}, {:.3}, {:.3}, {:.3})",
                clip.x, clip.y, clip.z, clip.w
            );
        }

        for (i, (p, c)) in mesh
            .positions
            .iter()
            .zip(&mesh.colors)
            .take(self.sample_vertices)
            .enumerate()
        {
            let _ = writeln!(
                out,
                "  [{i}] pos=({:.2}, {:.2}, {:.2}) color=({:.3}, {:.3}, {:.3})",
                p[0], p[1], p[2], c[0], c[1], c[2]
            );
        }

        tracing::trace!("debug render produced {} bytes", out.len());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrainview_common::AppConfig;
    use terrainview_heightmap::Heightmap;
    use terrainview_input::InputSnapshot;
    use terrainview_mesh::GridLayout;

    fn small_mesh() -> TerrainMesh {
        let map = Heightmap::from_bytes(&[0, 128, 255, 64], 2, 10.0).unwrap();
        TerrainMesh::build(&map, &GridLayout::new(2)).unwrap()
    }

    #[test]
    fn debug_renderer_empty_mesh() {
        let output =
            DebugTextRenderer::new().render(&TerrainMesh::default(), &RenderView::default());
        assert!(output.contains("vertices=0"));
        assert!(output.contains("Bounds: empty"));
        assert!(!output.contains("clip"));
    }

    #[test]
    fn debug_renderer_with_mesh() {
        let renderer = DebugTextRenderer::with_samples(2);
        let output = renderer.render(&small_mesh(), &RenderView::default());

        assert!(output.contains("vertices=4"));
        assert!(output.contains("indices=6"));
        assert!(output.contains("triangles=2"));
        assert!(output.contains("center=(0.05, 4.98, -98.95)"));
        assert!(output.contains("[1] pos=(0.10, 5.00, -99.00)"));
        assert!(!output.contains("[2]"));
    }

    #[test]
    fn view_from_scene() {
        let mut scene = Scene::new(&AppConfig::default());
        scene.update(0.1, &InputSnapshot::new());
        let view = RenderView::from_scene(&scene);

        assert_eq!(view.eye, Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(view.fov_degrees, 50.0);
        assert_eq!(view.model, scene.model_matrix());
        assert_eq!(view.camera, scene.camera.matrix());
    }

    #[test]
    fn render_view_default() {
        let view = RenderView::default();
        assert_eq!(view.fov_degrees, 50.0);
        assert_eq!(view.camera, Mat4::IDENTITY);
    }
}
