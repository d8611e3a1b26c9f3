use crate::wrap_degrees;
use glam::{Mat4, Vec3};
use terrainview_common::CameraConfig;

/// Narrowest field of view, in degrees.
pub const MIN_FOV: f32 = 5.0;
/// Widest field of view, in degrees.
pub const MAX_FOV: f32 = 130.0;
/// Pitch limit, in degrees. Stops the view from flipping over the poles.
pub const MAX_PITCH: f32 = 85.0;

/// First-person camera described by position, yaw and pitch.
///
/// Angles are in degrees. Positive yaw turns right, positive pitch looks down.
/// Camera motion lives in the scene, not in the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            fov: 50.0,
            near: 0.01,
            far: 100.0,
            aspect: 4.0 / 3.0,
        }
    }
}

impl Camera {
    pub fn from_config(cfg: &CameraConfig, aspect: f32) -> Self {
        let mut cam = Self {
            position: cfg.position,
            near: cfg.near,
            far: cfg.far,
            aspect,
            ..Self::default()
        };
        cam.set_field_of_view(cfg.fov_degrees);
        cam
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn offset_position(&mut self, offset: Vec3) {
        self.position += offset;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn field_of_view(&self) -> f32 {
        self.fov
    }

    /// Set the vertical field of view in degrees, clamped to `[MIN_FOV, MAX_FOV]`.
    pub fn set_field_of_view(&mut self, degrees: f32) {
        self.fov = degrees.clamp(MIN_FOV, MAX_FOV);
    }

    pub fn near_plane(&self) -> f32 {
        self.near
    }

    pub fn far_plane(&self) -> f32 {
        self.far
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Tilt by `up` degrees and turn by `right` degrees.
    pub fn offset_orientation(&mut self, up: f32, right: f32) {
        self.yaw = wrap_degrees(self.yaw + right);
        self.pitch = (self.pitch + up).clamp(-MAX_PITCH, MAX_PITCH);
    }

    /// Rotation taking world directions into camera space.
    pub fn orientation(&self) -> Mat4 {
        Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_y(self.yaw.to_radians())
    }

    pub fn forward(&self) -> Vec3 {
        self.to_world(Vec3::NEG_Z)
    }

    pub fn right(&self) -> Vec3 {
        self.to_world(Vec3::X)
    }

    pub fn up(&self) -> Vec3 {
        self.to_world(Vec3::Y)
    }

    pub fn view(&self) -> Mat4 {
        self.orientation() * Mat4::from_translation(-self.position)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    /// Combined projection * view.
    pub fn matrix(&self) -> Mat4 {
        self.projection() * self.view()
    }

    fn to_world(&self, camera_dir: Vec3) -> Vec3 {
        // Orientation is a pure rotation, so its inverse is its transpose.
        self.orientation().transpose().transform_vector3(camera_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(a.abs_diff_eq(b, 1e-5), "{a:?} != {b:?}");
    }

    #[test]
    fn default_looks_down_negative_z() {
        let cam = Camera::default();
        assert_vec_eq(cam.forward(), Vec3::NEG_Z);
        assert_vec_eq(cam.right(), Vec3::X);
        assert_vec_eq(cam.up(), Vec3::Y);
        assert!(!cam.matrix().is_nan());
    }

    #[test]
    fn positive_yaw_turns_right() {
        let mut cam = Camera::default();
        cam.offset_orientation(0.0, 90.0);
        assert_vec_eq(cam.forward(), Vec3::X);
        assert_vec_eq(cam.right(), Vec3::Z);
    }

    #[test]
    fn positive_pitch_looks_down() {
        let mut cam = Camera::default();
        cam.offset_orientation(30.0, 0.0);
        assert!(cam.forward().y < 0.0);
    }

    #[test]
    fn fov_is_clamped() {
        let mut cam = Camera::default();
        cam.set_field_of_view(3.0);
        assert_eq!(cam.field_of_view(), 5.0);
        cam.set_field_of_view(140.0);
        assert_eq!(cam.field_of_view(), 130.0);
        cam.set_field_of_view(70.0);
        assert_eq!(cam.field_of_view(), 70.0);
    }

    #[test]
    fn yaw_wraps_and_pitch_clamps() {
        let mut cam = Camera::default();
        cam.offset_orientation(200.0, 350.0);
        cam.offset_orientation(0.0, 20.0);
        assert!((cam.yaw() - 10.0).abs() < 1e-4);
        assert_eq!(cam.pitch(), MAX_PITCH);

        cam.offset_orientation(-400.0, -30.0);
        assert!((cam.yaw() - 340.0).abs() < 1e-4);
        assert_eq!(cam.pitch(), -MAX_PITCH);
    }

    #[test]
    fn view_moves_world_opposite_to_camera() {
        let mut cam = Camera::default();
        cam.set_position(Vec3::new(0.0, 0.0, 4.0));
        let p = cam.view().transform_point3(Vec3::ZERO);
        assert_vec_eq(p, Vec3::new(0.0, 0.0, -4.0));
    }

    #[test]
    fn from_config_applies_fields() {
        let cfg = CameraConfig {
            fov_degrees: 500.0,
            ..CameraConfig::default()
        };
        let cam = Camera::from_config(&cfg, 2.0);
        assert_eq!(cam.position(), Vec3::new(0.0, 0.0, 4.0));
        assert_eq!(cam.field_of_view(), MAX_FOV);
        assert_eq!(cam.aspect_ratio(), 2.0);
        assert_eq!(cam.near_plane(), 0.01);
    }

    #[test]
    fn bad_aspect_is_ignored() {
        let mut cam = Camera::default();
        cam.set_aspect_ratio(0.0);
        cam.set_aspect_ratio(f32::NAN);
        assert!((cam.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
    }
}
