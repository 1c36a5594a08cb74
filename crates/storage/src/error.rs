//! Storage errors

use std::path::PathBuf;

use thiserror::Error;

/// Errors from the upload/download file store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to create a managed directory
    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to persist staged or produced bytes
    #[error("Failed to write {path}: {source}")]
    Write {
        /// File that could not be written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a managed file
    #[error("Failed to read {path}: {source}")]
    Read {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_names_path() {
        let err = StorageError::Write {
            path: PathBuf::from("/tmp/x.wav"),
            source: std::io::Error::other("disk full"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/x.wav"));
        assert!(msg.contains("disk full"));
    }
}
