//! Fly camera orientation model.
//!
//! [`Camera`] keeps a right-handed orthonormal basis (`right`, `up`, `lookat`)
//! derived from yaw and pitch angles in degrees. The basis is never edited
//! directly: every orientation change goes through one clamped update that
//! recomputes `lookat` from the angles and re-derives `right` and `up`
//! against the fixed [`WORLD_UP`] axis, so repeated updates cannot
//! accumulate roll.
//!
//! # Example
//!
//! ```
//! use fractal_generator::{Camera, Direction};
//!
//! let mut camera = Camera::new();
//! camera.apply_look_delta(0.0, 10.0, 0.1);
//! camera.apply_translation(Direction::Forward, 0.5);
//!
//! assert!((camera.pitch() - 1.0).abs() < 1e-5);
//! ```

use glam::Vec3;

/// Fixed anchor used to re-derive `right` and `up` on every update.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]` degrees.
pub const PITCH_LIMIT: f32 = 89.0;

/// Step size in degrees used by [`Camera::apply_discrete_look`].
pub const LOOK_STEP_DEGREES: f32 = 1.0;

/// Bounds for the unitless field-of-view scale factor.
pub const MIN_FOV: f32 = 0.1;
pub const MAX_FOV: f32 = 4.0;

/// Translation directions relative to the current view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
}

/// Camera position and orientation pushed to the fractal shader each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space camera position.
    pub origin: Vec3,
    lookat: Vec3,
    up: Vec3,
    right: Vec3,
    yaw: f32,
    pitch: f32,
    fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            origin: Vec3::ZERO,
            lookat: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            yaw: -90.0,
            pitch: 0.0,
            fov: 1.0,
        };
        camera.update_basis();
        camera
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting position.
    pub fn at(mut self, origin: impl Into<Vec3>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Set the starting orientation in degrees.
    pub fn facing(mut self, yaw: f32, pitch: f32) -> Self {
        self.set_orientation(yaw, pitch);
        self
    }

    /// Set the starting field-of-view factor.
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.set_fov(fov);
        self
    }

    /// Unit view direction.
    pub fn lookat(&self) -> Vec3 {
        self.lookat
    }

    /// Unit up vector, orthogonal to `lookat` and `right`.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit right vector, `normalize(cross(lookat, WORLD_UP))`.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Horizontal look angle in degrees, wrapped to `[-180, 180)`.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Vertical look angle in degrees, within `[-89, 89]`.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Projection scale factor.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// The `(right, up, lookat)` basis.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.right, self.up, self.lookat)
    }

    /// Pointer look. `dy` is positive for screen-up movement, so callers
    /// feeding window coordinates must negate the raw y delta.
    ///
    /// Non-finite deltas and non-positive sensitivities leave the camera
    /// untouched.
    pub fn apply_look_delta(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        if !(sensitivity.is_finite() && sensitivity > 0.0) {
            return;
        }
        self.rotate(dx * sensitivity, dy * sensitivity);
    }

    /// Key look by whole steps of [`LOOK_STEP_DEGREES`].
    pub fn apply_discrete_look(&mut self, yaw_steps: i32, pitch_steps: i32) {
        self.apply_discrete_look_with_step(yaw_steps, pitch_steps, LOOK_STEP_DEGREES);
    }

    /// Key look by whole steps of `step` degrees.
    pub fn apply_discrete_look_with_step(&mut self, yaw_steps: i32, pitch_steps: i32, step: f32) {
        self.rotate(yaw_steps as f32 * step, pitch_steps as f32 * step);
    }

    /// Move `origin` along the view (`Forward`/`Backward`) or along
    /// `normalize(cross(lookat, up))` (strafe). Orientation is unchanged.
    pub fn apply_translation(&mut self, direction: Direction, speed: f32) {
        if !speed.is_finite() {
            return;
        }

        let strafe = self.lookat.cross(self.up).normalize();
        let offset = match direction {
            Direction::Forward => self.lookat,
            Direction::Backward => -self.lookat,
            Direction::StrafeLeft => -strafe,
            Direction::StrafeRight => strafe,
        };
        self.origin += offset * speed;
    }

    /// Replace the orientation. Pitch is clamped like any other update.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        if !(yaw.is_finite() && pitch.is_finite()) {
            return;
        }
        self.yaw = wrap_degrees(yaw);
        self.pitch = clamp_pitch(pitch);
        self.update_basis();
    }

    /// Set the field-of-view factor, clamped to `[MIN_FOV, MAX_FOV]`.
    pub fn set_fov(&mut self, fov: f32) {
        if fov.is_finite() {
            self.fov = fov.clamp(MIN_FOV, MAX_FOV);
        }
    }

    /// Multiply the field-of-view factor, keeping it in range.
    pub fn scale_fov(&mut self, factor: f32) {
        self.set_fov(self.fov * factor);
    }

    fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        let yaw = self.yaw + delta_yaw;
        let pitch = self.pitch + delta_pitch;
        self.set_orientation(yaw, pitch);
    }

    fn update_basis(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();

        self.lookat = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.lookat.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.lookat).normalize();
    }
}

fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = (angle + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360.
    if wrapped >= 180.0 { -180.0 } else { wrapped }
}
