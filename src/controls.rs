//! Keyboard, pointer and scroll bindings.
//!
//! [`Controls::apply`] runs once per frame, after the window events for the
//! frame have been folded into [`Input`], and before the uniform upload.
//!
//! | Input | Effect |
//! |---|---|
//! | W / S | move forward / backward |
//! | A / D | strafe left / right |
//! | Arrow keys | look in fixed steps |
//! | Left mouse drag | look |
//! | Scroll | shift the main color's hue |
//! | 1 to 4 | select a fractal |
//! | R | toggle the repeating variant |
//! | P | pause the animation clock |
//! | = / - | zoom in / out (fov) |
//! | ] / [ | brighter / dimmer light |
//! | Escape | quit |

use glam::Vec2;
use winit::keyboard::KeyCode;

use crate::camera::{Camera, Direction};
use crate::config::ControlsConfig;
use crate::input::Input;
use crate::scene::{FractalMode, SceneParams};

const MODE_KEYS: [(KeyCode, FractalMode); 4] = [
    (KeyCode::Digit1, FractalMode::Mandelbulb),
    (KeyCode::Digit2, FractalMode::Mandelbox),
    (KeyCode::Digit3, FractalMode::MengerSponge),
    (KeyCode::Digit4, FractalMode::Sierpinski),
];

const MOVE_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::KeyW, Direction::Forward),
    (KeyCode::KeyS, Direction::Backward),
    (KeyCode::KeyA, Direction::StrafeLeft),
    (KeyCode::KeyD, Direction::StrafeRight),
];

/// What the frame loop has to do after the state update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlEffects {
    pub exit_requested: bool,
    /// Set when a mode key selected a fractal this frame.
    pub mode_changed: Option<FractalMode>,
}

/// Maps input to camera and scene changes.
#[derive(Clone, Debug, Default)]
pub struct Controls {
    pub config: ControlsConfig,
}

impl Controls {
    pub fn new(config: ControlsConfig) -> Self {
        Self { config }
    }

    pub fn apply(
        &self,
        input: &Input,
        dt: f32,
        camera: &mut Camera,
        scene: &mut SceneParams,
    ) -> ControlEffects {
        let mut effects = ControlEffects {
            exit_requested: input.key_pressed(KeyCode::Escape),
            mode_changed: None,
        };

        // Mode selection first so movement this frame starts from the preset.
        for (key, mode) in MODE_KEYS {
            if input.key_pressed(key) {
                scene.select_mode(mode, camera);
                effects.mode_changed = Some(mode);
                log::info!("Selected {}", mode.label());
            }
        }

        if input.key_pressed(KeyCode::KeyR) {
            scene.toggle_repeat();
            log::debug!("repeat = {}", scene.repeat);
        }
        if input.key_pressed(KeyCode::KeyP) {
            scene.toggle_pause();
            log::debug!("paused = {}", scene.paused);
        }

        self.apply_look(input, dt, camera);

        let distance = self.config.move_speed * dt;
        for (key, direction) in MOVE_KEYS {
            if input.key_down(key) {
                camera.apply_translation(direction, distance);
            }
        }

        let zoom = axis(input, KeyCode::Minus, KeyCode::Equal);
        if zoom != 0 {
            // Smaller fov factor zooms in.
            camera.scale_fov((-(zoom as f32) * self.config.fov_rate * dt).exp());
        }

        let light = axis(input, KeyCode::BracketLeft, KeyCode::BracketRight);
        if light != 0 {
            scene.adjust_light_intensity(light as f32 * self.config.light_rate * dt);
        }

        let scroll = input.scroll_delta().y;
        if scroll != 0.0 {
            scene.shift_hue(scroll, self.config.color_step);
        }

        effects
    }

    fn apply_look(&self, input: &Input, dt: f32, camera: &mut Camera) {
        let yaw_steps = axis(input, KeyCode::ArrowLeft, KeyCode::ArrowRight);
        let pitch_steps = axis(input, KeyCode::ArrowDown, KeyCode::ArrowUp);
        if yaw_steps != 0 || pitch_steps != 0 {
            let step = self.config.look_speed * dt;
            camera.apply_discrete_look_with_step(yaw_steps, pitch_steps, step);
        }

        let drag = input.drag_delta();
        if drag != Vec2::ZERO {
            // Window y grows downward; screen-up must raise pitch.
            camera.apply_look_delta(drag.x, -drag.y, self.config.mouse_sensitivity);
        }
    }
}

/// -1, 0 or 1 depending on which of two opposing keys are held.
fn axis(input: &Input, negative: KeyCode, positive: KeyCode) -> i32 {
    i32::from(input.key_down(positive)) - i32::from(input.key_down(negative))
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use winit::event::MouseButton;

    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn setup() -> (Controls, Input, Camera, SceneParams) {
        (
            Controls::default(),
            Input::new(),
            Camera::new(),
            SceneParams::new(),
        )
    }

    #[test]
    fn idle_frame_leaves_state_untouched() {
        let (controls, input, mut camera, mut scene) = setup();
        let (camera_before, scene_before) = (camera, scene.clone());

        let effects = controls.apply(&input, DT, &mut camera, &mut scene);

        assert_eq!(effects, ControlEffects::default());
        assert_eq!(camera, camera_before);
        assert_eq!(scene, scene_before);
    }

    #[test]
    fn wasd_moves_by_speed_times_dt() {
        let (controls, mut input, mut camera, mut scene) = setup();
        input.press_key(KeyCode::KeyW);

        controls.apply(&input, 0.5, &mut camera, &mut scene);

        let expected = Vec3::NEG_Z * controls.config.move_speed * 0.5;
        assert!(camera.origin.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn opposing_keys_cancel() {
        let (controls, mut input, mut camera, mut scene) = setup();
        input.press_key(KeyCode::KeyA);
        input.press_key(KeyCode::KeyD);
        input.press_key(KeyCode::ArrowLeft);
        input.press_key(KeyCode::ArrowRight);

        controls.apply(&input, DT, &mut camera, &mut scene);

        assert!(camera.origin.abs_diff_eq(Vec3::ZERO, 1e-6));
        assert_eq!(camera.yaw(), -90.0);
    }

    #[test]
    fn arrow_up_raises_pitch_by_look_speed_times_dt() {
        let (controls, mut input, mut camera, mut scene) = setup();
        input.press_key(KeyCode::ArrowUp);

        controls.apply(&input, DT, &mut camera, &mut scene);
        assert!((camera.pitch() - controls.config.look_speed * DT).abs() < 1e-5);

        // Same wall-clock time at a lower frame rate turns just as far.
        let mut slow = Camera::new();
        controls.apply(&input, 4.0 * DT, &mut slow, &mut scene);
        for _ in 0..3 {
            controls.apply(&input, DT, &mut camera, &mut scene);
        }
        assert!((camera.pitch() - slow.pitch()).abs() < 1e-4);
    }

    #[test]
    fn drag_up_raises_pitch() {
        let (controls, mut input, mut camera, mut scene) = setup();
        input.cursor_moved(Vec2::new(100.0, 100.0));
        input.press_button(MouseButton::Left);
        input.cursor_moved(Vec2::new(100.0, 90.0));

        controls.apply(&input, DT, &mut camera, &mut scene);

        assert!((camera.pitch() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn drag_ignores_motion_before_press_and_keeps_motion_before_release() {
        let (controls, mut input, mut camera, mut scene) = setup();
        input.cursor_moved(Vec2::new(100.0, 100.0));
        input.cursor_moved(Vec2::new(100.0, 300.0));
        input.press_button(MouseButton::Left);
        input.cursor_moved(Vec2::new(100.0, 290.0));
        input.release_button(MouseButton::Left);

        controls.apply(&input, DT, &mut camera, &mut scene);

        assert!((camera.pitch() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn pointer_motion_without_drag_is_ignored() {
        let (controls, mut input, mut camera, mut scene) = setup();
        input.cursor_moved(Vec2::new(0.0, 0.0));
        input.cursor_moved(Vec2::new(300.0, 200.0));

        controls.apply(&input, DT, &mut camera, &mut scene);

        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.pitch(), 0.0);
    }

    #[test]
    fn first_sample_after_reacquire_does_not_turn() {
        let (controls, mut input, mut camera, mut scene) = setup();
        input.press_button(MouseButton::Left);
        input.cursor_moved(Vec2::new(640.0, 10.0));

        controls.apply(&input, DT, &mut camera, &mut scene);

        assert_eq!(camera, Camera::new());
    }

    #[test]
    fn digit_key_selects_mode_and_reports_it() {
        let (controls, mut input, mut camera, mut scene) = setup();
        camera.origin = Vec3::splat(50.0);
        input.press_key(KeyCode::Digit2);

        let effects = controls.apply(&input, DT, &mut camera, &mut scene);

        assert_eq!(effects.mode_changed, Some(FractalMode::Mandelbox));
        assert_eq!(scene.mode(), FractalMode::Mandelbox);
        assert_eq!(camera.origin, FractalMode::Mandelbox.preset().origin);
    }

    #[test]
    fn toggles_fire_once_per_press() {
        let (controls, mut input, mut camera, mut scene) = setup();
        input.press_key(KeyCode::KeyR);
        input.press_key(KeyCode::KeyP);

        controls.apply(&input, DT, &mut camera, &mut scene);
        input.begin_frame();
        controls.apply(&input, DT, &mut camera, &mut scene);

        assert!(scene.repeat);
        assert!(scene.paused);
    }

    #[test]
    fn escape_requests_exit() {
        let (controls, mut input, mut camera, mut scene) = setup();
        input.press_key(KeyCode::Escape);

        let effects = controls.apply(&input, DT, &mut camera, &mut scene);

        assert!(effects.exit_requested);
    }

    #[test]
    fn scroll_recolors_and_zoom_keys_scale_fov() {
        let (controls, mut input, mut camera, mut scene) = setup();
        let color = scene.main_color();
        input.scroll(Vec2::new(0.0, 3.0));
        input.press_key(KeyCode::Equal);

        controls.apply(&input, DT, &mut camera, &mut scene);

        assert_ne!(scene.main_color(), color);
        assert!(camera.fov() < 1.0);
    }
}
