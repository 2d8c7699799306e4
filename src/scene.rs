//! Scene parameters shared with the fractal shader.
//!
//! [`SceneParams`] holds everything besides the camera that the shader reads
//! each frame: which fractal to draw, the animation clock, the repeat toggle,
//! the main color with its hue shift and the point light. Switching fractals goes through
//! [`SceneParams::select_mode`], which also reframes the camera from the
//! mode's [`ModePreset`].

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;

/// Upper bound for [`SceneParams::light_intensity`].
pub const MAX_LIGHT_INTENSITY: f32 = 10.0;

/// Fractal variants understood by the bundled shader.
///
/// The discriminant is the `mode` integer uploaded to the GPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalMode {
    #[default]
    Mandelbulb = 0,
    Mandelbox = 1,
    MengerSponge = 2,
    Sierpinski = 3,
}

/// Fixed framing applied when a mode is selected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModePreset {
    pub origin: Vec3,
    pub light_position: Vec3,
}

const PRESETS: [ModePreset; 4] = [
    ModePreset {
        origin: Vec3::new(0.0, 0.0, 3.0),
        light_position: Vec3::new(2.0, 3.0, 4.0),
    },
    ModePreset {
        origin: Vec3::new(0.0, 0.0, 7.0),
        light_position: Vec3::new(4.0, 6.0, 8.0),
    },
    ModePreset {
        origin: Vec3::new(0.0, 0.0, 3.5),
        light_position: Vec3::new(-2.0, 3.0, 4.0),
    },
    ModePreset {
        origin: Vec3::new(0.0, 0.25, 3.0),
        light_position: Vec3::new(2.0, 4.0, 3.0),
    },
];

impl FractalMode {
    pub const ALL: [FractalMode; 4] = [
        FractalMode::Mandelbulb,
        FractalMode::Mandelbox,
        FractalMode::MengerSponge,
        FractalMode::Sierpinski,
    ];

    /// Look up a mode by its shader id.
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|index| Self::ALL.get(index))
            .copied()
    }

    /// Shader id for this mode.
    pub fn id(self) -> i32 {
        self as i32
    }

    /// Human-readable name, used in the window title.
    pub fn label(self) -> &'static str {
        match self {
            FractalMode::Mandelbulb => "Mandelbulb",
            FractalMode::Mandelbox => "Mandelbox",
            FractalMode::MengerSponge => "Menger Sponge",
            FractalMode::Sierpinski => "Sierpinski Tetrahedron",
        }
    }

    pub fn preset(self) -> ModePreset {
        PRESETS[self as usize]
    }
}

/// Per-frame scene state read by the uniform upload.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    /// Animation clock in seconds.
    pub animate: f32,
    /// Freezes [`animate`](Self::animate) while set.
    pub paused: bool,
    /// Asks the shader for the tiled variant of the fractal.
    pub repeat: bool,
    pub light_position: Vec3,
    pub light_intensity: f32,
    mode: FractalMode,
    base_color: Vec3,
    /// Hue rotation applied to `base_color`, in degrees within `[0, 360)`.
    hue_offset: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        let mode = FractalMode::default();
        Self {
            animate: 0.0,
            paused: false,
            repeat: false,
            light_position: mode.preset().light_position,
            light_intensity: 1.0,
            mode,
            base_color: Vec3::new(1.0, 0.6, 0.3),
            hue_offset: 0.0,
        }
    }
}

impl SceneParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FractalMode {
        self.mode
    }

    /// Switch fractals. The camera origin and light position are overwritten
    /// with the mode's preset; orientation is kept.
    pub fn select_mode(&mut self, mode: FractalMode, camera: &mut Camera) {
        let preset = mode.preset();
        self.mode = mode;
        self.light_position = preset.light_position;
        camera.origin = preset.origin;
    }

    /// Advance the animation clock unless paused.
    pub fn advance(&mut self, dt: f32) {
        if self.paused || !dt.is_finite() || dt < 0.0 {
            return;
        }
        self.animate += dt;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn toggle_repeat(&mut self) {
        self.repeat = !self.repeat;
    }

    /// Base color tint with the current hue shift applied, each channel in
    /// `[0, 1]`.
    pub fn main_color(&self) -> Vec3 {
        if self.hue_offset == 0.0 {
            return self.base_color;
        }
        let rotation = Quat::from_axis_angle(Vec3::ONE.normalize(), self.hue_offset.to_radians());
        (rotation * self.base_color).clamp(Vec3::ZERO, Vec3::ONE)
    }

    /// Replace the base color and drop any hue shift. Channels are clamped
    /// to `[0, 1]`; non-finite colors are ignored.
    pub fn set_main_color(&mut self, color: Vec3) {
        if color.is_finite() {
            self.base_color = color.clamp(Vec3::ZERO, Vec3::ONE);
            self.hue_offset = 0.0;
        }
    }

    pub fn hue_offset(&self) -> f32 {
        self.hue_offset
    }

    /// Rotate the hue by `steps * step_degrees` around the grey axis.
    ///
    /// Only the offset accumulates; the base color is never rewritten, so
    /// shifting back by the same amount restores it exactly.
    pub fn shift_hue(&mut self, steps: f32, step_degrees: f32) {
        let delta = steps * step_degrees;
        if !delta.is_finite() {
            return;
        }
        let offset = (self.hue_offset + delta).rem_euclid(360.0);
        self.hue_offset = if offset >= 360.0 { 0.0 } else { offset };
    }

    /// Set the light intensity, clamped to `[0, MAX_LIGHT_INTENSITY]`.
    pub fn set_light_intensity(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.light_intensity = intensity.clamp(0.0, MAX_LIGHT_INTENSITY);
        }
    }

    pub fn adjust_light_intensity(&mut self, delta: f32) {
        self.set_light_intensity(self.light_intensity + delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_ids_round_trip() {
        for mode in FractalMode::ALL {
            assert_eq!(FractalMode::from_id(mode.id()), Some(mode));
        }
        assert_eq!(FractalMode::from_id(-1), None);
        assert_eq!(FractalMode::from_id(4), None);
    }

    #[test]
    fn select_mode_overwrites_origin_and_light() {
        let mut camera = Camera::new().at([9.0, -4.0, 2.0]).facing(10.0, 20.0);
        let mut scene = SceneParams::new();
        scene.light_position = Vec3::splat(42.0);

        for mode in FractalMode::ALL {
            camera.apply_translation(crate::camera::Direction::Forward, 5.0);
            scene.select_mode(mode, &mut camera);

            let preset = mode.preset();
            assert_eq!(scene.mode(), mode);
            assert_eq!(camera.origin, preset.origin);
            assert_eq!(scene.light_position, preset.light_position);
        }
        assert_eq!(camera.yaw(), 10.0);
        assert_eq!(camera.pitch(), 20.0);
    }

    #[test]
    fn paused_clock_does_not_advance() {
        let mut scene = SceneParams::new();
        scene.advance(0.5);
        scene.toggle_pause();
        scene.advance(10.0);
        assert_eq!(scene.animate, 0.5);

        scene.toggle_pause();
        scene.advance(0.25);
        scene.advance(f32::NAN);
        scene.advance(-1.0);
        assert_eq!(scene.animate, 0.75);
    }

    #[test]
    fn hue_shift_cycles_primaries() {
        let mut scene = SceneParams::new();
        scene.set_main_color(Vec3::X);

        scene.shift_hue(1.0, 120.0);
        assert!(scene.main_color().abs_diff_eq(Vec3::Y, 1e-5));

        scene.shift_hue(2.0, 120.0);
        assert!(scene.main_color().abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn hue_shift_there_and_back_restores_saturated_color() {
        let mut scene = SceneParams::new();
        let start = scene.main_color();

        for _ in 0..18 {
            scene.shift_hue(1.0, 10.0);
        }
        assert!(!scene.main_color().abs_diff_eq(start, 1e-3));
        for _ in 0..18 {
            scene.shift_hue(-1.0, 10.0);
        }

        assert_eq!(scene.hue_offset(), 0.0);
        assert!(scene.main_color().abs_diff_eq(start, 1e-6));
    }

    #[test]
    fn hue_offset_wraps_and_ignores_non_finite_steps() {
        let mut scene = SceneParams::new();
        scene.shift_hue(-1.0, 30.0);
        assert_eq!(scene.hue_offset(), 330.0);
        scene.shift_hue(4.0, 90.0);
        assert_eq!(scene.hue_offset(), 330.0);
        scene.shift_hue(f32::NAN, 10.0);
        assert_eq!(scene.hue_offset(), 330.0);

        scene.set_main_color(Vec3::new(2.0, 0.5, -1.0));
        assert_eq!(scene.hue_offset(), 0.0);
        assert_eq!(scene.main_color(), Vec3::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn light_intensity_stays_in_range() {
        let mut scene = SceneParams::new();
        scene.adjust_light_intensity(-5.0);
        assert_eq!(scene.light_intensity, 0.0);
        scene.adjust_light_intensity(100.0);
        assert_eq!(scene.light_intensity, MAX_LIGHT_INTENSITY);
    }
}
