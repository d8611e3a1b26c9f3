use egui::Context as EguiContext;
use terrainview_scene::Scene;

/// Numbers shown in the overlay that the scene does not own.
pub struct HudStats<'a> {
    pub adapter: &'a str,
    pub frame_time: f32,
    pub fps: f32,
    pub vertices: u32,
    pub indices: u32,
}

/// Exponential moving average of frame time, in seconds.
#[derive(Debug, Default)]
pub struct FrameTimer {
    average: f32,
}

impl FrameTimer {
    const SMOOTHING: f32 = 0.1;

    pub fn record(&mut self, dt: f32) {
        if self.average == 0.0 {
            self.average = dt;
        } else {
            self.average += (dt - self.average) * Self::SMOOTHING;
        }
    }

    pub fn average(&self) -> f32 {
        self.average
    }

    pub fn fps(&self) -> f32 {
        if self.average > 0.0 {
            1.0 / self.average
        } else {
            0.0
        }
    }
}

/// Run one egui frame. The overlay is only drawn when `visible`, but the
/// frame always runs so queued window input is drained.
pub fn run_hud(
    ctx: &EguiContext,
    raw_input: egui::RawInput,
    scene: &Scene,
    stats: &HudStats<'_>,
    visible: bool,
) -> egui::FullOutput {
    ctx.run(raw_input, |ctx| {
        if visible {
            draw_hud(ctx, scene, stats);
        }
    })
}

pub fn draw_hud(ctx: &EguiContext, scene: &Scene, stats: &HudStats<'_>) {
    let cam = &scene.camera;
    let pos = cam.position();

    egui::Window::new("Terrain Viewer")
        .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.label(format!("Adapter: {}", stats.adapter));
            ui.label(format!(
                "Frame: {:.2} ms ({:.0} fps)",
                stats.frame_time * 1000.0,
                stats.fps
            ));
            ui.separator();
            ui.label(format!(
                "Terrain: {} vertices, {} triangles",
                stats.vertices,
                stats.indices / 3
            ));
            ui.label(format!("Camera: ({:.2}, {:.2}, {:.2})", pos.x, pos.y, pos.z));
            ui.label(format!("Yaw {:.1}  Pitch {:.1}", cam.yaw(), cam.pitch()));
            ui.label(format!("FOV: {:.1}", cam.field_of_view()));
            ui.label(format!("Rotation: {:.1}", scene.degrees_rotated()));
            let controls = scene.controls();
            ui.label(format!(
                "Spin: {}  Scroll zoom: {}",
                on_off(controls.spin),
                on_off(controls.scroll_zoom)
            ));
            ui.separator();
            ui.small("WASD: Move | Z/X: Down/Up | Mouse: Look | F1: HUD | Esc: Quit");
        });
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrainview_common::AppConfig;

    #[test]
    fn frame_timer_smooths() {
        let mut t = FrameTimer::default();
        assert_eq!(t.fps(), 0.0);
        t.record(0.02);
        assert!((t.fps() - 50.0).abs() < 1e-3);
        t.record(0.01);
        assert!((t.average() - 0.019).abs() < 1e-6);
    }

    fn stats() -> HudStats<'static> {
        HudStats {
            adapter: "test",
            frame_time: 0.016,
            fps: 60.0,
            vertices: 4,
            indices: 6,
        }
    }

    fn frame_with_event(ctx: &EguiContext, visible: bool) -> egui::FullOutput {
        let scene = Scene::new(&AppConfig::default());
        let raw_input = egui::RawInput {
            events: vec![egui::Event::PointerMoved(egui::pos2(10.0, 10.0))],
            ..Default::default()
        };
        run_hud(ctx, raw_input, &scene, &stats(), visible)
    }

    #[test]
    fn hidden_hud_still_runs_a_frame() {
        let ctx = EguiContext::default();
        for _ in 0..3 {
            let output = frame_with_event(&ctx, false);
            assert!(output.shapes.is_empty());
        }
        // Input fed while hidden reached egui.
        assert_eq!(
            ctx.input(|i| i.pointer.latest_pos()),
            Some(egui::pos2(10.0, 10.0))
        );
    }

    #[test]
    fn visible_hud_draws_shapes() {
        let ctx = EguiContext::default();
        let mut output = frame_with_event(&ctx, true);
        for _ in 0..2 {
            output = frame_with_event(&ctx, true);
        }
        assert!(!output.shapes.is_empty());
    }

    #[test]
    fn on_off_labels() {
        assert_eq!(on_off(true), "on");
        assert_eq!(on_off(false), "off");
    }
}
