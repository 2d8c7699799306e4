use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Pixels per scroll "line" for touchpads reporting pixel deltas.
const PIXELS_PER_LINE: f32 = 120.0;

/// Button whose held motion is reported by [`Input::drag_delta`].
pub const DRAG_BUTTON: MouseButton = MouseButton::Left;

/// Tracks input state for keyboard and mouse.
///
/// The pointer has no baseline until the first `CursorMoved` arrives, and
/// loses it whenever the cursor leaves the window or focus is lost. The
/// sample that re-establishes the baseline contributes no delta, so
/// re-entering the window never produces a look jump.
///
/// Motion is also accumulated separately while [`DRAG_BUTTON`] is held at
/// the time of each sample, so a press or release in the middle of a frame
/// splits that frame's motion correctly.
pub struct Input {
    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    mouse_buttons_down: HashSet<MouseButton>,
    mouse_position: Option<Vec2>,
    mouse_delta: Vec2,
    drag_delta: Vec2,
    scroll_delta: Vec2,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            keys_down: HashSet::new(),
            keys_pressed: HashSet::new(),
            mouse_buttons_down: HashSet::new(),
            mouse_position: None,
            mouse_delta: Vec2::ZERO,
            drag_delta: Vec2::ZERO,
            scroll_delta: Vec2::ZERO,
        }
    }
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the end of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = Vec2::ZERO;
        self.drag_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    /// Process a window event and update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
            }
            WindowEvent::MouseInput { state, button, .. } => match state {
                ElementState::Pressed => self.press_button(*button),
                ElementState::Released => self.release_button(*button),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => self.reset_pointer(),
            WindowEvent::Focused(false) => {
                // Keys released while unfocused never reach us.
                self.keys_down.clear();
                self.mouse_buttons_down.clear();
                self.reset_pointer();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let d = match delta {
                    MouseScrollDelta::LineDelta(x, y) => Vec2::new(*x, *y),
                    MouseScrollDelta::PixelDelta(pos) => {
                        Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_LINE
                    }
                };
                self.scroll(d);
            }
            _ => {}
        }
    }

    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_down.remove(&key);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        self.mouse_buttons_down.insert(button);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        self.mouse_buttons_down.remove(&button);
    }

    /// Record a pointer sample in window coordinates.
    pub fn cursor_moved(&mut self, position: Vec2) {
        if !position.is_finite() {
            return;
        }
        if let Some(previous) = self.mouse_position {
            let delta = position - previous;
            self.mouse_delta += delta;
            if self.mouse_down(DRAG_BUTTON) {
                self.drag_delta += delta;
            }
        }
        self.mouse_position = Some(position);
    }

    /// Forget the pointer baseline; the next sample only re-anchors it.
    pub fn reset_pointer(&mut self) {
        self.mouse_position = None;
    }

    /// Accumulate scroll in lines.
    pub fn scroll(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.scroll_delta += delta;
        }
    }

    /// Returns true if the key is currently held down.
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns true if the key was pressed this frame.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Returns true if the mouse button is currently held down.
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons_down.contains(&button)
    }

    /// Last known pointer position, if the pointer is anchored.
    pub fn mouse_position(&self) -> Option<Vec2> {
        self.mouse_position
    }

    /// Mouse movement delta this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Pointer movement this frame made while [`DRAG_BUTTON`] was held.
    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    /// Scroll wheel delta this frame (in "lines").
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }
}
