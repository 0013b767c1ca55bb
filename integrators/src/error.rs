//! Errors

pub use core::error::{ConfigError, ConfigResult, RenderError};
