//! Viewer configuration loaded from TOML.
//!
//! Every section uses `#[serde(default)]`, so a file only needs the keys it
//! overrides:
//!
//! ```toml
//! [window]
//! title = "Fractals"
//!
//! [scene]
//! mode = "mandelbox"
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ViewerError;
use crate::scene::FractalMode;

/// File picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "fractal.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub controls: ControlsConfig,
    pub shader: ShaderConfig,
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "FractalGenerator".to_string(),
            width: 800,
            height: 800,
        }
    }
}

/// Step sizes for the input mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Degrees of look per pixel of pointer drag.
    pub mouse_sensitivity: f32,
    /// Degrees of look per second while an arrow key is held.
    pub look_speed: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Hue rotation in degrees per scroll line.
    pub color_step: f32,
    /// Exponential fov change per second while `=`/`-` is held.
    pub fov_rate: f32,
    /// Light intensity change per second while `]`/`[` is held.
    pub light_rate: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.1,
            look_speed: 60.0,
            move_speed: 1.5,
            color_step: 10.0,
            fov_rate: 1.0,
            light_rate: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// WGSL file to load instead of the bundled shader.
    pub path: Option<PathBuf>,
    /// Watch `path` and rebuild the pipeline when it changes.
    pub hot_reload: bool,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            path: None,
            hot_reload: true,
        }
    }
}

/// Initial scene state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub mode: FractalMode,
    pub main_color: Vec3,
    pub light_intensity: f32,
    pub fov: f32,
    pub repeat: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            mode: FractalMode::Mandelbulb,
            main_color: Vec3::new(1.0, 0.6, 0.3),
            light_intensity: 1.0,
            fov: 1.0,
            repeat: false,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn shader_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.shader.path = Some(path.into());
        self
    }

    /// Parse a config from TOML text. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ViewerError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config from a TOML file.
    ///
    /// A relative `shader.path` is resolved against the config file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(|source| ViewerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;

        if let (Some(shader), Some(dir)) = (&config.shader.path, path.parent()) {
            if shader.is_relative() {
                config.shader.path = Some(dir.join(shader));
            }
        }
        Ok(config)
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ViewerError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            log::info!("Using config {}", fallback.display());
            Self::load(fallback)
        } else {
            log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }
}
