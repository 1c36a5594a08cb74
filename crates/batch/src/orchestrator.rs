//! Batch run orchestration
//!
//! A run parses its input up front, dispatches items to the provider one at
//! a time in input order, collects one report entry per item, and packages
//! everything into a single downloadable archive. A failing item never
//! aborts the run; only parse, storage, and archive failures do.

use std::sync::Arc;

use serde::Serialize;
use speech::{AudioConverter, AudioData, AudioFormat, Provider, SpeechRequest};
use storage::FileStore;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::archive::ArchivePackager;
use crate::broker::SpeechBroker;
use crate::error::BatchError;
use crate::job::{self, BatchKind, SttEntry, TtsItem};
use crate::report::{BatchOutcome, ReportEntry};

/// What a finished batch run reports back to the caller
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Total number of items in the job, including failures
    pub processed_count: usize,
    /// Items that produced a successful report entry
    pub success_count: usize,
    /// Items that produced a failed report entry
    pub failure_count: usize,
    /// Archive filename in the download area
    pub archive: String,
}

/// Runs batch jobs end to end: parse, dispatch, report, archive
pub struct BatchProcessor {
    broker: Arc<dyn SpeechBroker>,
    store: FileStore,
    packager: ArchivePackager,
    converter: AudioConverter,
}

impl BatchProcessor {
    /// Create a processor over the given broker and store
    pub fn new(broker: Arc<dyn SpeechBroker>, store: FileStore, converter: AudioConverter) -> Self {
        let packager = ArchivePackager::new(store.clone());
        Self {
            broker,
            store,
            packager,
            converter,
        }
    }

    /// Run a batch job of the given kind over the uploaded file bytes
    ///
    /// Parse failures reject the whole job before any provider dispatch.
    #[instrument(skip(self, bytes, request), fields(kind = ?kind, provider = %provider, size = bytes.len()))]
    pub async fn run(
        &self,
        kind: BatchKind,
        bytes: &[u8],
        provider: Provider,
        request: &SpeechRequest,
    ) -> Result<BatchSummary, BatchError> {
        let outcome = match kind {
            BatchKind::Tts => {
                let items = job::parse_tts_job(bytes)?;
                self.run_tts(&items, provider, request).await?
            },
            BatchKind::Stt => {
                let entries = job::parse_stt_bundle(bytes)?;
                self.run_stt(entries, provider, request).await
            },
        };

        let archive = self.packager.pack(&outcome).await?;
        let summary = BatchSummary {
            processed_count: outcome.len(),
            success_count: outcome.success_count(),
            failure_count: outcome.failure_count(),
            archive,
        };
        info!(
            processed = summary.processed_count,
            failed = summary.failure_count,
            archive = %summary.archive,
            "Batch run finished"
        );
        Ok(summary)
    }

    /// Synthesize every job item in order, one attempt each
    async fn run_tts(
        &self,
        items: &[TtsItem],
        provider: Provider,
        request: &SpeechRequest,
    ) -> Result<BatchOutcome, BatchError> {
        let mut outcome = BatchOutcome::new();

        for item in items {
            match self.broker.synthesize(provider, &item.text, request).await {
                Ok(audio) => {
                    let generated = generated_filename(provider, audio.format());
                    let path = self.store.put_download(&generated, audio.data()).await?;
                    outcome.push_artifact(&item.output_name, path);
                    outcome.push_entry(ReportEntry::tts_success(
                        &item.output_name,
                        &generated,
                        &item.text,
                    ));
                },
                Err(e) => {
                    warn!(item = %item.output_name, error = %e, "Synthesis failed");
                    outcome.push_entry(ReportEntry::tts_failure(
                        &item.output_name,
                        &item.text,
                        e.to_string(),
                    ));
                },
            }
        }

        Ok(outcome)
    }

    /// Transcribe every bundle entry in order, one attempt each
    ///
    /// Each entry is staged to the upload area, read back from its staged
    /// path for dispatch, and removed again whether it succeeds or fails.
    async fn run_stt(
        &self,
        entries: Vec<SttEntry>,
        provider: Provider,
        request: &SpeechRequest,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::new();

        for entry in entries {
            let staged = match self.store.stage(&entry.data, "stt", &entry.name).await {
                Ok(path) => path,
                Err(e) => {
                    warn!(entry = %entry.name, error = %e, "Staging failed");
                    outcome.push_entry(ReportEntry::stt_failure(&entry.name, e.to_string()));
                    continue;
                },
            };

            let audio = match self.store.read(&staged).await {
                Ok(bytes) => {
                    let format =
                        AudioFormat::from_filename(&entry.name).unwrap_or(AudioFormat::Wav);
                    self.prepare_audio(AudioData::new(bytes, format)).await
                },
                Err(e) => {
                    warn!(entry = %entry.name, error = %e, "Reading staged entry failed");
                    outcome.push_entry(ReportEntry::stt_failure(&entry.name, e.to_string()));
                    self.store.cleanup(&staged).await;
                    continue;
                },
            };

            match self.broker.transcribe(provider, audio, request).await {
                Ok(transcription) => {
                    outcome.push_entry(ReportEntry::stt_success(&entry.name, transcription.text));
                },
                Err(e) => {
                    warn!(entry = %entry.name, error = %e, "Recognition failed");
                    outcome.push_entry(ReportEntry::stt_failure(&entry.name, e.to_string()));
                },
            }

            self.store.cleanup(&staged).await;
        }

        outcome
    }

    /// Convert audio for recognition, falling back to the original bytes
    /// when conversion is unavailable or fails
    async fn prepare_audio(&self, audio: AudioData) -> AudioData {
        if audio.format().is_recognition_ready() {
            return audio;
        }
        match self.converter.convert_for_recognition(&audio).await {
            Ok(converted) => converted,
            Err(e) => {
                debug!(error = %e, "Conversion failed, sending original audio");
                audio
            },
        }
    }
}

/// Download-area filename for a synthesis artifact
#[must_use]
pub fn generated_filename(provider: Provider, format: AudioFormat) -> String {
    format!(
        "{provider}_tts_{}.{}",
        Uuid::new_v4().simple(),
        format.extension()
    )
}
