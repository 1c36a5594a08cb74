//! Result archive packaging
//!
//! Every batch run produces exactly one ZIP in the download area holding
//! `results.json` plus the artifacts of successful TTS items under their
//! requested names. The archive is never touched again after creation.

use std::io::{Cursor, Write};

use storage::FileStore;
use tokio::fs;
use tracing::{debug, instrument, warn};
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::BatchError;
use crate::report::BatchOutcome;

/// Name of the report entry inside every batch archive
pub const REPORT_NAME: &str = "results.json";

/// Packages a finished batch outcome into a downloadable ZIP
#[derive(Debug, Clone)]
pub struct ArchivePackager {
    store: FileStore,
}

impl ArchivePackager {
    /// Create a packager writing into the store's download area
    #[must_use]
    pub const fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Write the archive and return its filename in the download area
    ///
    /// Artifacts that no longer exist on disk are skipped; when two items
    /// requested the same output name, the later one wins. Only archive
    /// I/O failures are job-level errors.
    #[instrument(skip(self, outcome), fields(entries = outcome.len(), artifacts = outcome.artifacts().len()))]
    pub async fn pack(&self, outcome: &BatchOutcome) -> Result<String, BatchError> {
        let report = serde_json::to_vec_pretty(outcome.entries())
            .map_err(|e| BatchError::Archive(format!("Failed to serialize report: {e}")))?;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        writer
            .start_file(REPORT_NAME, options)
            .and_then(|()| writer.write_all(&report).map_err(Into::into))
            .map_err(|e| BatchError::Archive(format!("Failed to write {REPORT_NAME}: {e}")))?;

        for (name, path) in deduplicate_last_wins(outcome.artifacts()) {
            let bytes = match fs::read(path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    // Already cleaned up or unreadable: skip, never fail the pack
                    warn!(artifact = %name, error = %e, "Skipping missing artifact");
                    continue;
                },
            };

            writer
                .start_file(name, options)
                .and_then(|()| writer.write_all(&bytes).map_err(Into::into))
                .map_err(|e| BatchError::Archive(format!("Failed to write {name}: {e}")))?;
        }

        let cursor = writer
            .finish()
            .map_err(|e| BatchError::Archive(format!("Failed to finalize archive: {e}")))?;

        let filename = format!("batch_{}.zip", Uuid::new_v4().simple());
        self.store
            .put_download(&filename, &cursor.into_inner())
            .await?;

        debug!(archive = %filename, "Batch archive written");
        Ok(filename)
    }
}

/// Keep the last artifact registered under each name, preserving the order
/// of last occurrence
fn deduplicate_last_wins(
    artifacts: &[(String, std::path::PathBuf)],
) -> Vec<(&str, &std::path::Path)> {
    let mut result: Vec<(&str, &std::path::Path)> = Vec::with_capacity(artifacts.len());
    for (name, path) in artifacts {
        if let Some(existing) = result.iter_mut().find(|(n, _)| n == name) {
            existing.1 = path.as_path();
        } else {
            result.push((name.as_str(), path.as_path()));
        }
    }
    result
}
