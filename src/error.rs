//! Error types for tetra-orbit.
//!
//! The animation core itself has no failure surface: contract violations such
//! as re-triggering a running transition are no-ops. Errors only come from
//! loading configuration and from bringing up the demo window.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid JSON for the expected layout.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// A value parsed but is outside what the animation can work with.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when running the demo driver.
#[derive(Debug, Error)]
pub enum DemoError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display() {
        let err = ConfigError::invalid("transition.duration_ms", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid config value `transition.duration_ms`: must be greater than zero"
        );
    }

    #[test]
    fn test_config_error_converts_into_demo_error() {
        let err: DemoError = ConfigError::invalid("objects", "empty").into();
        assert!(matches!(err, DemoError::Config(ConfigError::Invalid { .. })));
        assert_eq!(err.to_string(), "invalid config value `objects`: empty");
    }
}
