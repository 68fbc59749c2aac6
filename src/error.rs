//! Error types and result utilities for figure rendering.

use thiserror::Error;

/// Convenience type alias for results that may contain a [`FigureError`].
pub type FigureResult<T> = Result<T, FigureError>;

/// Error types that can occur while building, rendering or delivering a figure.
#[derive(Error, Debug)]
pub enum FigureError {
    /// Writing the script to its sink failed.
    ///
    /// Output already written before the failure is not rolled back.
    #[error("I/O error while writing plot script: {0}")]
    Io(#[from] std::io::Error),

    /// The plotting backend process could not be started.
    #[error("Could not spawn plotting backend '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The plotting backend reported a failure when its session was closed.
    #[error("Plotting backend '{program}' exited with {}", exit_description(.code))]
    BackendExit { program: String, code: Option<i32> },

    /// Tic labels and tic values were supplied with different lengths.
    #[error("Tic length mismatch: {labels} labels but {values} values")]
    TicsLengthMismatch { labels: usize, values: usize },

    /// The x and y columns of a series have different lengths.
    #[error("Series data length mismatch: {x} x values but {y} y values")]
    DataLengthMismatch { x: usize, y: usize },

    /// A data value could not be represented as a plot coordinate.
    #[error("Invalid data at index {index}: {reason}")]
    InvalidData { index: usize, reason: String },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status code {code}"),
        None => "no status code (terminated by signal)".to_string(),
    }
}

impl FigureError {
    /// Create a spawn error for the given program
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a backend exit error
    pub fn backend_exit(program: impl Into<String>, code: Option<i32>) -> Self {
        Self::BackendExit {
            program: program.into(),
            code,
        }
    }

    /// Create an invalid data error
    pub fn invalid_data(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            index,
            reason: reason.into(),
        }
    }

    /// Check if this error was raised by the backend process lifecycle
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::BackendExit { .. })
    }

    /// Check if this error stems from malformed figure or series configuration
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::TicsLengthMismatch { .. } | Self::DataLengthMismatch { .. } | Self::InvalidData { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_backend_exit_message() {
        let err = FigureError::backend_exit("gnuplot", Some(1));
        assert!(err.is_backend_error());
        assert!(!err.is_configuration_error());
        assert_eq!(
            err.to_string(),
            "Plotting backend 'gnuplot' exited with status code 1"
        );

        let signalled = FigureError::backend_exit("gnuplot", None);
        assert!(signalled.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_spawn_error_keeps_source() {
        let err = FigureError::spawn("gnuplot", IoError::new(ErrorKind::NotFound, "missing"));
        assert!(err.is_backend_error());
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("gnuplot"));
    }

    #[test]
    fn test_from_io_error() {
        let err: FigureError = IoError::new(ErrorKind::BrokenPipe, "closed").into();
        match err {
            FigureError::Io(_) => {} // Expected
            _ => panic!("Should convert to Io variant"),
        }
    }

    #[test]
    fn test_configuration_errors() {
        let err = FigureError::TicsLengthMismatch {
            labels: 3,
            values: 2,
        };
        assert!(err.is_configuration_error());
        assert!(err.to_string().contains("3 labels but 2 values"));
    }
}
