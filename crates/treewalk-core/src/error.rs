//! Error types for traversal operations.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by user-supplied hooks and visitors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during a traversal.
#[derive(Debug, Error)]
pub enum TraverseError {
    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Path exists but is not a directory.
    #[error("The provided path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Invalid option combination.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A regex or glob pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A hook or visitor returned an error.
    #[error("Callback failed at {path}: {source}")]
    Callback {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TraverseError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Wrap a callback failure with the path being processed.
    pub fn callback(path: impl Into<PathBuf>, source: BoxError) -> Self {
        Self::Callback {
            path: path.into(),
            source,
        }
    }

    /// Whether this error was raised before the walk began because of bad options.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. } | Self::InvalidPattern { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traverse_error_io() {
        let err = TraverseError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, TraverseError::NotFound { .. }));

        let err = TraverseError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, TraverseError::Io { .. }));
    }

    #[test]
    fn test_callback_error_keeps_source() {
        let source: BoxError = "boom".into();
        let err = TraverseError::callback("/a/b", source);
        assert!(err.to_string().contains("/a/b"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_config());
    }

    #[test]
    fn test_config_error() {
        let err = TraverseError::config("Can't set both 'filter' and 'nameFilter'");
        assert!(err.is_config());
        assert!(err.to_string().contains("nameFilter"));
    }
}
