//! # Fractal Generator
//!
//! **A real-time raymarched fractal viewer.**
//!
//! Four distance-estimated fractals (Mandelbulb, Mandelbox, Menger sponge and
//! Sierpinski tetrahedron) are drawn by a single fullscreen WGSL shader. The
//! host side keeps a fly camera and a handful of scene parameters, feeds them
//! to the shader as one uniform block each frame, and maps keyboard and mouse
//! input onto them.
//!
//! ## Quick Start
//!
//! ```no_run
//! use fractal_generator::{AppConfig, FractalMode, run};
//!
//! fn main() -> Result<(), fractal_generator::ViewerError> {
//!     let mut config = AppConfig::new().title("Fractals").size(1024, 768);
//!     config.scene.mode = FractalMode::Mandelbox;
//!     run(config)
//! }
//! ```
//!
//! ## Controls
//!
//! | Input | Action |
//! |-------|--------|
//! | `1`-`4` | Select fractal |
//! | `W` `A` `S` `D` | Move |
//! | Arrow keys / left drag | Look around |
//! | `=` / `-` | Zoom in / out |
//! | `]` / `[` | Brighter / dimmer light |
//! | Scroll | Shift hue |
//! | `R` | Toggle repetition |
//! | `P` | Pause animation |
//! | `Esc` | Quit |
//!
//! Point `shader.path` in `fractal.toml` at a WGSL file to edit the shader
//! live; broken edits are logged and the previous pipeline stays active.

mod app;
pub mod camera;
pub mod config;
pub mod controls;
mod error;
mod fractal_pass;
mod gpu;
mod input;
pub mod scene;
pub mod shader;
mod uniforms;

pub use app::run;
pub use camera::{Camera, Direction, LOOK_STEP_DEGREES, PITCH_LIMIT, WORLD_UP};
pub use config::{AppConfig, ControlsConfig, SceneConfig, ShaderConfig, WindowConfig};
pub use controls::{ControlEffects, Controls};
pub use error::ViewerError;
pub use fractal_pass::FractalPass;
pub use gpu::GpuContext;
pub use input::Input;
pub use scene::{FractalMode, ModePreset, SceneParams};
pub use shader::{DEFAULT_SHADER, ShaderSource};
pub use uniforms::FractalUniforms;

// Re-export commonly used types
pub use glam::{Vec2, Vec3};
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
