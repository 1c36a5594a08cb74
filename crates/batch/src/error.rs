//! Batch processing errors
//!
//! These are the job-level failures only. Per-item failures never surface
//! here; they are captured as failed report entries and the batch keeps
//! going.

use thiserror::Error;

/// Job-level batch errors
#[derive(Debug, Error)]
pub enum BatchError {
    /// Malformed job description; zero items were dispatched
    #[error("Invalid job description: {0}")]
    Parse(String),

    /// Request rejected before the job started
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Staging or serving storage failed at the job level
    #[error(transparent)]
    Storage(#[from] storage::StorageError),

    /// Could not create the result archive
    #[error("Archive creation failed: {0}")]
    Archive(String),
}
