//! Host-to-shader uniform block.
//!
//! [`FractalUniforms`] is uploaded once per frame, after input handling, and
//! bound at `@group(0) @binding(0)`. The layout matches WGSL uniform address
//! space rules: each `vec3f` starts on a 16-byte boundary and the scalar that
//! follows it fills the fourth lane.
//!
//! # WGSL Declaration
//!
//! ```wgsl
//! struct Uniforms {
//!     resolution: vec2i,
//!     aspect_ratio: f32,
//!     fov: f32,
//!     camera_origin: vec3f,
//!     light_intensity: f32,
//!     camera_lookat: vec3f,
//!     animate: f32,
//!     camera_up: vec3f,
//!     mode: i32,
//!     camera_right: vec3f,
//!     repeat_enabled: i32,
//!     light_position: vec3f,
//!     main_color: vec3f,
//! }
//! @group(0) @binding(0) var<uniform> u: Uniforms;
//! ```
//!
//! # Ray Construction
//!
//! ```wgsl
//! let uv = (pos.xy / vec2f(u.resolution)) * 2.0 - 1.0;
//! let ray_dir = normalize(
//!     u.camera_lookat +
//!     u.fov * (uv.x * u.aspect_ratio * u.camera_right - uv.y * u.camera_up)
//! );
//! ```

use crate::camera::Camera;
use crate::scene::SceneParams;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FractalUniforms {
    /// Framebuffer size in pixels `[width, height]`.
    pub resolution: [i32; 2],
    /// Width over height.
    pub aspect_ratio: f32,
    /// Half-height of the image plane at unit distance; larger is wider.
    pub fov: f32,
    pub camera_origin: [f32; 3],
    pub light_intensity: f32,
    pub camera_lookat: [f32; 3],
    /// Animation clock in seconds.
    pub animate: f32,
    pub camera_up: [f32; 3],
    /// Fractal variant id, see [`FractalMode`](crate::FractalMode).
    pub mode: i32,
    pub camera_right: [f32; 3],
    /// 1 for the tiled variant, 0 otherwise (`repeat_enabled` in WGSL).
    pub repeat: i32,
    pub light_position: [f32; 3],
    /// Padding for 16-byte alignment.
    pub _pad0: f32,
    pub main_color: [f32; 3],
    /// Padding for 16-byte alignment.
    pub _pad1: f32,
}

impl FractalUniforms {
    /// Snapshot camera and scene state for a `width` x `height` target.
    pub fn new(camera: &Camera, scene: &SceneParams, width: u32, height: u32) -> Self {
        let (right, up, lookat) = camera.basis();
        let aspect_ratio = width as f32 / height.max(1) as f32;

        Self {
            resolution: [clamp_dimension(width), clamp_dimension(height)],
            aspect_ratio,
            fov: camera.fov(),
            camera_origin: camera.origin.to_array(),
            light_intensity: scene.light_intensity,
            camera_lookat: lookat.to_array(),
            animate: scene.animate,
            camera_up: up.to_array(),
            mode: scene.mode().id(),
            camera_right: right.to_array(),
            repeat: i32::from(scene.repeat),
            light_position: scene.light_position.to_array(),
            _pad0: 0.0,
            main_color: scene.main_color().to_array(),
            _pad1: 0.0,
        }
    }
}

fn clamp_dimension(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
