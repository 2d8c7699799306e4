//! Crate-level error type.

use std::path::PathBuf;

/// Errors produced while starting or running the viewer.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Reading a config or shader file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The TOML config could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
    /// WGSL parsing or validation failed. Carries the rendered diagnostic.
    #[error("shader '{name}' failed to compile:\n{message}")]
    Shader { name: String, message: String },
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface ran out of memory")]
    OutOfMemory,
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
