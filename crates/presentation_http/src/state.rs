//! Application state shared across handlers

use std::sync::Arc;

use batch::BatchProcessor;
use speech::{AudioConverter, SpeechRouter};
use storage::FileStore;

use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Batch orchestration for `/api/batch`
    pub processor: Arc<BatchProcessor>,
    /// Provider dispatch for the single-call endpoints
    pub router: Arc<SpeechRouter>,
    /// Upload staging and download storage
    pub store: FileStore,
    /// FFmpeg conversion for uploaded audio
    pub converter: Arc<AudioConverter>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire up the full state from configuration
    pub fn from_config(config: AppConfig) -> Result<Self, speech::SpeechError> {
        let store = FileStore::new(&config.storage.upload_dir, &config.storage.download_dir);
        let router = Arc::new(SpeechRouter::new(&config.speech)?);
        let converter = Arc::new(match &config.speech.ffmpeg_path {
            Some(path) => AudioConverter::with_ffmpeg_path(path),
            None => AudioConverter::new(),
        });
        let processor = Arc::new(BatchProcessor::new(
            router.clone(),
            store.clone(),
            converter.as_ref().clone(),
        ));

        Ok(Self {
            processor,
            router,
            store,
            converter,
            config: Arc::new(config),
        })
    }
}
