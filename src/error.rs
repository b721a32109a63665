//! Error types for the pathform library.
//!
//! This module provides the error hierarchy for all operations in the
//! pathform library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a pathform error.
///
/// # Examples
///
/// ```
/// use pathform::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("archive.tar.gz".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathform library.
///
/// This enum encompasses all possible error conditions that can occur
/// while constructing, transforming, or operating on path values.
#[derive(Debug, Error)]
pub enum Error {
    /// An input string could not be interpreted as a path.
    #[error("invalid input {input:?}: {reason}")]
    InvalidInput {
        /// The offending input.
        input: String,
        /// The reason the input is invalid.
        reason: String,
    },

    /// A rename destination already exists on the filesystem.
    #[error("destination already exists: {}", path.display())]
    AlreadyExists {
        /// The colliding destination path.
        path: PathBuf,
    },

    /// The value's extension maps to no registered format codec.
    #[error("unsupported format for extension {ext:?}")]
    UnsupportedFormat {
        /// The extension that failed format dispatch (empty when absent).
        ext: String,
    },

    /// A recursive operation was invoked on a non-directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The non-directory path.
        path: PathBuf,
    },

    /// A remote read was attempted on a scheme with no registered reader.
    #[error("no reader registered for scheme {scheme:?}")]
    UnsupportedScheme {
        /// The unhandled URL scheme.
        scheme: String,
    },

    /// An explicitly unimplemented capability was invoked.
    #[error("operation not implemented: {operation}")]
    Stubbed {
        /// The name of the stubbed operation.
        operation: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON codec error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML codec error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern failed to parse.
    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A URL failed to parse.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Check if error indicates a rename destination collision.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::AlreadyExists { path: PathBuf::from("/taken") };
    /// assert!(err.is_already_exists());
    /// ```
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Check if error is a format-dispatch fallthrough.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathform::Error;
    ///
    /// let err = Error::UnsupportedFormat { ext: "ini".to_string() };
    /// assert!(err.is_unsupported_format());
    /// ```
    #[must_use]
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }

    /// Check if error reports unparseable construction input.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_error() {
        let err = Error::InvalidInput {
            input: String::new(),
            reason: "empty path string".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid input"));
        assert!(display.contains("empty path string"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_already_exists_error() {
        let err = Error::AlreadyExists {
            path: PathBuf::from("/tmp/taken.txt"),
        };
        let display = format!("{err}");
        assert!(display.contains("already exists"));
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("/tmp/taken.txt"));
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_unsupported_format_error() {
        let err = Error::UnsupportedFormat {
            ext: "ini".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("unsupported format"));
        assert!(display.contains("ini"));
        assert!(err.is_unsupported_format());
    }

    #[test]
    fn test_not_a_directory_error() {
        let err = Error::NotADirectory {
            path: PathBuf::from("/etc/hostname"),
        };
        let display = format!("{err}");
        assert!(display.contains("not a directory"));
    }

    #[test]
    fn test_unsupported_scheme_error() {
        let err = Error::UnsupportedScheme {
            scheme: "gopher".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("no reader registered"));
        assert!(display.contains("gopher"));
    }

    #[test]
    fn test_stubbed_error() {
        let err = Error::Stubbed {
            operation: "owner name lookup".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("not implemented"));
        assert!(display.contains("owner name lookup"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Err(Error::InvalidInput {
                input: "..".to_string(),
                reason: "test".to_string(),
            })
        }

        assert!(returns_result().is_err());
    }
}
