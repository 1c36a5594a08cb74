//! Batch - bulk TTS/STT orchestration for Orato
//!
//! Takes an uploaded job file (a JSON array of single-key objects for TTS,
//! a ZIP bundle of audio files for STT), dispatches each item to a cloud
//! provider one at a time, and packages the per-item report plus any
//! synthesized audio into a single downloadable ZIP archive.
//!
//! Item failures are recorded in the report and never abort the run; only
//! parse, storage, and archive failures reject the job as a whole.

pub mod archive;
pub mod broker;
pub mod error;
pub mod job;
pub mod orchestrator;
pub mod report;

pub use archive::{ArchivePackager, REPORT_NAME};
pub use broker::SpeechBroker;
pub use error::BatchError;
pub use job::{BatchKind, SttEntry, TtsItem, parse_stt_bundle, parse_tts_job};
pub use orchestrator::{BatchProcessor, BatchSummary, generated_filename};
pub use report::{BatchOutcome, EntryStatus, ReportEntry};
