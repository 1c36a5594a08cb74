//! Provider dispatch seam for batch processing
//!
//! The orchestrator talks to providers through [`SpeechBroker`] so tests can
//! substitute counting fakes and assert exactly how many dispatches a run
//! performed.

use async_trait::async_trait;
use speech::{AudioData, Provider, SpeechError, SpeechRequest, SpeechRouter, Transcription};

/// Routes synthesis and transcription calls to a named provider
#[async_trait]
pub trait SpeechBroker: Send + Sync {
    /// Synthesize `text` with the given provider, one attempt only
    async fn synthesize(
        &self,
        provider: Provider,
        text: &str,
        request: &SpeechRequest,
    ) -> Result<AudioData, SpeechError>;

    /// Transcribe `audio` with the given provider, one attempt only
    async fn transcribe(
        &self,
        provider: Provider,
        audio: AudioData,
        request: &SpeechRequest,
    ) -> Result<Transcription, SpeechError>;
}

#[async_trait]
impl SpeechBroker for SpeechRouter {
    async fn synthesize(
        &self,
        provider: Provider,
        text: &str,
        request: &SpeechRequest,
    ) -> Result<AudioData, SpeechError> {
        Self::synthesize(self, provider, text, request).await
    }

    async fn transcribe(
        &self,
        provider: Provider,
        audio: AudioData,
        request: &SpeechRequest,
    ) -> Result<Transcription, SpeechError> {
        Self::transcribe(self, provider, audio, request).await
    }
}
