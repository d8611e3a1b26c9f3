//! Scene: everything that changes between frames.
//!
//! The viewer keeps no globals. A `Scene` owns the camera and the model
//! rotation angle and is advanced once per frame from an `InputSnapshot`.
//!
//! # Invariants
//! - Field of view stays within `[MIN_FOV, MAX_FOV]`.
//! - Camera yaw and the model rotation angle stay within `[0, 360)`.
//! - Camera pitch stays within `[-MAX_PITCH, MAX_PITCH]`.

pub mod camera;
pub mod scene;

pub use camera::{Camera, MAX_FOV, MAX_PITCH, MIN_FOV};
pub use scene::{MODEL_OFFSET, MODEL_TILT_DEGREES, Scene};

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
