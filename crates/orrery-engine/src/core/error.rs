//! Error types for engine setup.
//!
//! Per-frame paths are infallible; everything here happens before the first tick.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while bringing the engine up.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid viewport {width}x{height}: render surface needs a positive, finite size")]
    InvalidViewport { width: f32, height: f32 },

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    /// Check that a viewport size can back a render surface.
    pub fn check_viewport(width: f32, height: f32) -> EngineResult<()> {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Ok(())
        } else {
            Err(EngineError::InvalidViewport { width, height })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_check() {
        assert!(EngineError::check_viewport(800.0, 600.0).is_ok());
        assert!(EngineError::check_viewport(0.0, 600.0).is_err());
        assert!(EngineError::check_viewport(800.0, -1.0).is_err());
        assert!(EngineError::check_viewport(f32::NAN, 600.0).is_err());
    }

    #[test]
    fn config_error_from_serde() {
        let err: EngineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("config parse error"));
    }

    #[test]
    fn viewport_error_message_names_size() {
        let err = EngineError::check_viewport(0.0, 0.0).unwrap_err();
        assert!(err.to_string().contains("0x0"));
    }
}
