use crate::camera::Camera;
use crate::wrap_degrees;
use glam::{Mat4, Vec3};
use terrainview_common::{AppConfig, ControlConfig};
use terrainview_input::{Action, InputSnapshot};

/// Fixed translation applied to the terrain model.
pub const MODEL_OFFSET: Vec3 = Vec3::new(0.0, -1.0, 12.0);
/// Fixed yaw of the terrain model when spinning is disabled.
pub const MODEL_TILT_DEGREES: f32 = 0.75;

/// Per-frame viewer state.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    degrees_rotated: f32,
    controls: ControlConfig,
    frame: u64,
}

impl Scene {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            camera: Camera::from_config(&config.camera, config.window.aspect_ratio()),
            degrees_rotated: 0.0,
            controls: config.controls.clone(),
            frame: 0,
        }
    }

    pub fn controls(&self) -> &ControlConfig {
        &self.controls
    }

    /// Accumulated model rotation in `[0, 360)`.
    pub fn degrees_rotated(&self) -> f32 {
        self.degrees_rotated
    }

    /// Number of completed updates.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame by `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &InputSnapshot) {
        let dt = dt.max(0.0);
        self.frame += 1;

        self.degrees_rotated =
            wrap_degrees(self.degrees_rotated + dt * self.controls.degrees_per_second);

        let step = dt * self.controls.move_speed;
        let forward = input.axis(Action::MoveBackward, Action::MoveForward);
        let strafe = input.axis(Action::StrafeLeft, Action::StrafeRight);
        let lift = input.axis(Action::Descend, Action::Ascend);
        if forward != 0.0 {
            let dir = self.camera.forward();
            self.camera.offset_position(dir * forward * step);
        }
        if strafe != 0.0 {
            let dir = self.camera.right();
            self.camera.offset_position(dir * strafe * step);
        }
        if lift != 0.0 {
            self.camera.offset_position(Vec3::Y * lift * step);
        }

        let look = input.mouse_delta * self.controls.mouse_sensitivity;
        if look != glam::Vec2::ZERO {
            self.camera.offset_orientation(look.y, look.x);
        }

        if self.controls.scroll_zoom && input.scroll_delta != 0.0 {
            let fov =
                self.camera.field_of_view() + self.controls.zoom_sensitivity * input.scroll_delta;
            self.camera.set_field_of_view(fov);
            tracing::debug!("field of view {:.1}", self.camera.field_of_view());
        }
    }

    /// Model yaw in degrees: the accumulated angle when spinning, else fixed.
    pub fn model_yaw(&self) -> f32 {
        if self.controls.spin {
            self.degrees_rotated
        } else {
            MODEL_TILT_DEGREES
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(MODEL_OFFSET) * Mat4::from_rotation_y(self.model_yaw().to_radians())
    }
}
