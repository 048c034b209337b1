//! Error types for the bracewise transpiler

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for bracewise
#[derive(Debug, Error)]
pub enum TranspileError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", .path.display())]
    Decode { path: PathBuf },

    #[error("Source directory not found: {}", .0.display())]
    SourceRootMissing(PathBuf),

    #[error("Cannot write report {}: {message}", .path.display())]
    Report { path: PathBuf, message: String },
}

impl TranspileError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TranspileError::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the error is about
    pub fn path(&self) -> &std::path::Path {
        match self {
            TranspileError::Io { path, .. }
            | TranspileError::Decode { path }
            | TranspileError::SourceRootMissing(path)
            | TranspileError::Report { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, TranspileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_display() {
        let err = TranspileError::Decode {
            path: PathBuf::from("pkg/main.go"),
        };
        assert_eq!(format!("{err}"), "pkg/main.go is not valid UTF-8");
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = TranspileError::io(
            "out/Main.java",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(format!("{err}"), "IO error on out/Main.java: denied");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.path(), std::path::Path::new("out/Main.java"));
    }

    #[test]
    fn test_missing_root_display() {
        let err = TranspileError::SourceRootMissing(PathBuf::from("./nowhere"));
        assert_eq!(format!("{err}"), "Source directory not found: ./nowhere");
    }
}
