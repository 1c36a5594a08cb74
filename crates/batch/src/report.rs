//! Per-item outcomes and the aggregate batch result
//!
//! The accumulator is owned by the orchestrator for the duration of a run;
//! entries are appended in work-item input order and counts are derived
//! once all items have been processed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome status of one work item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Provider call succeeded
    Success,
    /// Provider call or local handling failed
    Failed,
}

/// One entry of `results.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Work-item key (output filename for TTS, bundle entry name for STT)
    pub original_file: String,
    /// Generated artifact filename in the download area (TTS success only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_file: Option<String>,
    /// Input text (TTS) or recognized text (STT success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Outcome status
    pub status: EntryStatus,
    /// Failure cause, present on failed entries only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReportEntry {
    /// Successful TTS item
    #[must_use]
    pub fn tts_success(
        original_file: impl Into<String>,
        generated_file: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            original_file: original_file.into(),
            generated_file: Some(generated_file.into()),
            text: Some(text.into()),
            status: EntryStatus::Success,
            error: None,
        }
    }

    /// Failed TTS item; the input text is still echoed into the report
    #[must_use]
    pub fn tts_failure(
        original_file: impl Into<String>,
        text: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            original_file: original_file.into(),
            generated_file: None,
            text: Some(text.into()),
            status: EntryStatus::Failed,
            error: Some(error.into()),
        }
    }

    /// Successful STT item
    #[must_use]
    pub fn stt_success(original_file: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            original_file: original_file.into(),
            generated_file: None,
            text: Some(text.into()),
            status: EntryStatus::Success,
            error: None,
        }
    }

    /// Failed STT item
    #[must_use]
    pub fn stt_failure(original_file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            original_file: original_file.into(),
            generated_file: None,
            text: None,
            status: EntryStatus::Failed,
            error: Some(error.into()),
        }
    }

    /// Whether this entry succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == EntryStatus::Success
    }
}

/// Aggregate result of one batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    entries: Vec<ReportEntry>,
    /// Artifacts to package: archive entry name → produced file on disk
    artifacts: Vec<(String, PathBuf)>,
}

impl BatchOutcome {
    /// Create an empty accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a per-item outcome, preserving input order
    pub fn push_entry(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    /// Register a produced artifact for packaging
    pub fn push_artifact(&mut self, archive_name: impl Into<String>, path: PathBuf) {
        self.artifacts.push((archive_name.into(), path));
    }

    /// Report entries in input order
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Registered artifacts in production order
    #[must_use]
    pub fn artifacts(&self) -> &[(String, PathBuf)] {
        &self.artifacts
    }

    /// Number of work items processed
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the batch had no work items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of successful items
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_success()).count()
    }

    /// Count of failed items
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.len() - self.success_count()
    }
}
