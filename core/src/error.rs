//! Errors

use crate::pbrt::Float;
use thiserror::Error;

/// Errors reported while validating renderer configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown lights sampling strategy '{0}'")]
    UnknownStrategy(String),

    #[error("Media step size must be positive, got {0}")]
    InvalidStepSize(Float),

    #[error("Number of {0} samples must be positive")]
    ZeroSamples(&'static str),

    #[error("Volume grid {nx}x{ny}x{nz} needs {expected} densities, got {actual}")]
    GridSize {
        nx: usize,
        ny: usize,
        nz: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors reported while rendering a batch of rays.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("A render worker panicked")]
    WorkerPanicked,

    #[error("Expected {expected} radiance values, got {actual}")]
    MissingResults { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_errors_format() {
        let err = RenderError::MissingResults { expected: 4, actual: 3 };
        assert_eq!(err.to_string(), "Expected 4 radiance values, got 3");
        assert_eq!(RenderError::WorkerPanicked.to_string(), "A render worker panicked");

        let err: RenderError = ConfigError::InvalidStepSize(0.0).into();
        assert_eq!(err.to_string(), "Media step size must be positive, got 0");
        assert!(matches!(err, RenderError::Config(ConfigError::InvalidStepSize(_))));
    }
}
