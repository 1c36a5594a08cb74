//! Upload staging and download storage
//!
//! Staged inputs get a random UUID-hex suffix so concurrent uploads never
//! collide. Cleanup is best-effort: a missing file is a no-op and I/O
//! errors are logged, never propagated.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::fs;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::error::StorageError;

/// Audio extensions accepted for STT uploads and bundle entries
pub const ALLOWED_AUDIO_EXTENSIONS: [&str; 4] = ["wav", "mp3", "m4a", "flac"];

/// Manages the upload (staging) and download (serving) directories
#[derive(Debug, Clone)]
pub struct FileStore {
    upload_dir: PathBuf,
    download_dir: PathBuf,
}

impl FileStore {
    /// Create a store over the given directories
    #[must_use]
    pub fn new(upload_dir: impl Into<PathBuf>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            download_dir: download_dir.into(),
        }
    }

    /// Create both managed directories if they do not exist
    pub async fn create_directories(&self) -> Result<(), StorageError> {
        for dir in [&self.upload_dir, &self.download_dir] {
            fs::create_dir_all(dir)
                .await
                .map_err(|source| StorageError::CreateDirectory {
                    path: dir.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Download directory path
    #[must_use]
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Persist uploaded bytes under a uniquely named staged file
    ///
    /// The name keeps a sanitized version of the original filename so a
    /// human can still tell staged files apart.
    #[instrument(skip(self, bytes), fields(size = bytes.len(), original = %original_name))]
    pub async fn stage(
        &self,
        bytes: &[u8],
        prefix: &str,
        original_name: &str,
    ) -> Result<PathBuf, StorageError> {
        let unique = format!(
            "{prefix}_{}_{}",
            Uuid::new_v4().simple(),
            sanitize_filename(original_name)
        );
        let path = self.upload_dir.join(unique);

        fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(path = %path.display(), "Staged upload");
        Ok(path)
    }

    /// Read a staged file back into memory
    pub async fn read(&self, path: &Path) -> Result<Vec<u8>, StorageError> {
        fs::read(path).await.map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a produced artifact into the download area under `filename`
    pub async fn put_download(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<PathBuf, StorageError> {
        let path = self.download_dir.join(sanitize_filename(filename));
        fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }

    /// Resolve a download filename to a path, if a matching file exists
    ///
    /// Names containing path separators or parent components never resolve,
    /// so a request cannot escape the download root.
    pub async fn download_path(&self, filename: &str) -> Option<PathBuf> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return None;
        }

        let path = self.download_dir.join(filename);
        fs::metadata(&path)
            .await
            .ok()
            .filter(std::fs::Metadata::is_file)
            .map(|_| path)
    }

    /// Best-effort delete of a staged or produced file
    ///
    /// A missing file is a no-op; other failures are logged and swallowed.
    #[instrument(skip(self))]
    pub async fn cleanup(&self, path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => debug!(path = %path.display(), "Removed file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove file"),
        }
    }

    /// Whether the filename carries an accepted audio extension
    #[must_use]
    pub fn is_allowed_audio(filename: &str) -> bool {
        filename
            .rsplit_once('.')
            .is_some_and(|(stem, ext)| {
                !stem.is_empty()
                    && ALLOWED_AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
            })
    }

    /// Remove managed files older than `max_age`
    ///
    /// Used by a periodic sweep so archives and artifacts do not pile up.
    #[instrument(skip(self))]
    pub async fn cleanup_old_files(&self, max_age: Duration) {
        let cutoff = SystemTime::now().checked_sub(max_age);
        let Some(cutoff) = cutoff else { return };

        for dir in [&self.upload_dir, &self.download_dir] {
            let Ok(mut entries) = fs::read_dir(dir).await else {
                continue;
            };
            while let Ok(Some(entry)) = entries.next_entry().await {
                let Ok(metadata) = entry.metadata().await else {
                    continue;
                };
                if !metadata.is_file() {
                    continue;
                }
                let stale = metadata.modified().is_ok_and(|modified| modified < cutoff);
                if stale {
                    self.cleanup(&entry.path()).await;
                }
            }
        }
    }
}

/// Strip path components and shell-unfriendly characters from a filename
fn sanitize_filename(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "file".to_string()
    } else {
        cleaned
    }
}
