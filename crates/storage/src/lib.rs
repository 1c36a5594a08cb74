//! Storage - upload staging and download storage for Orato
//!
//! Staged uploads live under the upload directory with collision-free
//! names; produced artifacts and batch archives live under the download
//! directory and are served from there.

pub mod error;
pub mod store;

pub use error::StorageError;
pub use store::{ALLOWED_AUDIO_EXTENSIONS, FileStore};
