use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::ViewerError;

/// The fractal shader compiled into the binary.
pub const DEFAULT_SHADER: &str = include_str!("shaders/fractal.wgsl");

enum Origin {
    Embedded,
    File {
        path: PathBuf,
        last_modified: SystemTime,
    },
}

/// WGSL source for the fractal pass, either bundled or read from disk.
///
/// File-backed sources can be polled with [`check_reload`](Self::check_reload)
/// to pick up edits while the viewer runs.
pub struct ShaderSource {
    origin: Origin,
    source: String,
}

impl ShaderSource {
    /// The bundled shader.
    pub fn embedded() -> Self {
        Self {
            origin: Origin::Embedded,
            source: DEFAULT_SHADER.to_string(),
        }
    }

    /// Load a shader from the given file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ViewerError> {
        let path = path.as_ref().to_path_buf();
        let io_error = |source| ViewerError::Io {
            path: path.clone(),
            source,
        };
        let source = fs::read_to_string(&path).map_err(io_error)?;
        let last_modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(io_error)?;

        Ok(Self {
            origin: Origin::File {
                path,
                last_modified,
            },
            source,
        })
    }

    /// Check if the shader file has been modified and reload if so.
    /// Returns `true` if the source changed. Always `false` for the bundled
    /// shader.
    pub fn check_reload(&mut self) -> bool {
        let Origin::File {
            path,
            last_modified,
        } = &mut self.origin
        else {
            return false;
        };

        let Ok(modified) = fs::metadata(&*path).and_then(|m| m.modified()) else {
            return false;
        };

        if modified > *last_modified {
            match fs::read_to_string(&*path) {
                Ok(source) => {
                    self.source = source;
                    *last_modified = modified;
                    return true;
                }
                // Editors sometimes truncate before writing; retry next poll.
                Err(e) => log::debug!("Could not re-read {}: {e}", path.display()),
            }
        }

        false
    }

    /// Get the current shader source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get the shader file path, if file-backed.
    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            Origin::Embedded => None,
            Origin::File { path, .. } => Some(path),
        }
    }

    /// Display name for logs and errors.
    pub fn name(&self) -> String {
        match self.path() {
            Some(path) => path.display().to_string(),
            None => "<bundled fractal.wgsl>".to_string(),
        }
    }

    /// Parse and validate the current source.
    pub fn validate(&self) -> Result<(), ViewerError> {
        validate(&self.name(), &self.source)
    }
}

/// Parse and validate WGSL with naga, returning the rendered diagnostic on
/// failure.
pub fn validate(name: &str, source: &str) -> Result<(), ViewerError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ViewerError::Shader {
        name: name.to_string(),
        message: e.emit_to_string(source),
    })?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    )
    .validate(&module)
    .map_err(|e| ViewerError::Shader {
        name: name.to_string(),
        message: e.emit_to_string(source),
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn bundled_shader_validates() {
        ShaderSource::embedded().validate().unwrap();
    }

    #[test]
    fn bundled_shader_exposes_entry_points_and_uniforms() {
        let module = naga::front::wgsl::parse_str(DEFAULT_SHADER).unwrap();
        let entry_points: Vec<_> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(entry_points.contains(&"vs"));
        assert!(entry_points.contains(&"fs"));

        let uniforms = module
            .global_variables
            .iter()
            .find(|(_, var)| var.name.as_deref() == Some("u"))
            .map(|(_, var)| var)
            .unwrap();
        let binding = uniforms.binding.as_ref().unwrap();
        assert_eq!((binding.group, binding.binding), (0, 0));
        assert_eq!(uniforms.space, naga::AddressSpace::Uniform);
    }

    #[test]
    fn invalid_shader_reports_diagnostic() {
        let err = validate("broken.wgsl", "fn fs( -> f32 {}").unwrap_err();
        match err {
            ViewerError::Shader { name, message } => {
                assert_eq!(name, "broken.wgsl");
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn type_errors_are_caught_by_validation() {
        let source = "fn f() -> f32 { return 1u; }";
        assert!(matches!(
            validate("typed.wgsl", source),
            Err(ViewerError::Shader { .. })
        ));
    }

    #[test]
    fn embedded_source_never_reloads() {
        let mut shader = ShaderSource::embedded();
        assert!(!shader.check_reload());
        assert!(shader.path().is_none());
    }

    #[test]
    fn file_source_reloads_after_modification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fractal.wgsl");
        fs::write(&path, DEFAULT_SHADER).unwrap();

        let mut shader = ShaderSource::from_file(&path).unwrap();
        assert_eq!(shader.source(), DEFAULT_SHADER);
        assert!(!shader.check_reload());

        fs::write(&path, "// edited\n").unwrap();
        let file = fs::File::options().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(10))
            .unwrap();

        assert!(shader.check_reload());
        assert_eq!(shader.source(), "// edited\n");
        assert!(!shader.check_reload());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ShaderSource::from_file("no/such/shader.wgsl").err().unwrap();
        assert!(matches!(err, ViewerError::Io { .. }));
    }
}
