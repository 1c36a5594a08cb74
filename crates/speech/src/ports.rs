//! Port definitions for the provider clients
//!
//! Adapters implement these traits; the batch orchestrator and the HTTP
//! handlers only ever talk to the ports. Every failure comes back as a
//! `SpeechError` value, never a panic, and each call is attempted exactly
//! once.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::request::SpeechRequest;
use crate::types::{AudioData, Transcription};

/// Port for text-to-speech synthesis
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` into audio using the caller-supplied credentials
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when validation, the network call, or the
    /// remote synthesis fails.
    async fn synthesize(
        &self,
        text: &str,
        request: &SpeechRequest,
    ) -> Result<AudioData, SpeechError>;
}

/// Port for speech-to-text recognition
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe `audio` using the caller-supplied credentials
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` when validation, the network call, or the
    /// remote recognition fails.
    async fn transcribe(
        &self,
        audio: AudioData,
        request: &SpeechRequest,
    ) -> Result<Transcription, SpeechError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AudioFormat;

    struct EchoTts;

    #[async_trait]
    impl TextToSpeech for EchoTts {
        async fn synthesize(
            &self,
            text: &str,
            request: &SpeechRequest,
        ) -> Result<AudioData, SpeechError> {
            request.validate()?;
            Ok(AudioData::new(text.as_bytes().to_vec(), AudioFormat::Wav))
        }
    }

    struct FixedStt;

    #[async_trait]
    impl SpeechToText for FixedStt {
        async fn transcribe(
            &self,
            _audio: AudioData,
            request: &SpeechRequest,
        ) -> Result<Transcription, SpeechError> {
            request.validate()?;
            Ok(Transcription::new("fixed"))
        }
    }

    #[tokio::test]
    async fn mock_tts_synthesizes() {
        let request = SpeechRequest::new("en", "key");
        let audio = EchoTts.synthesize("hello", &request).await.unwrap();
        assert_eq!(audio.data(), b"hello");
    }

    #[tokio::test]
    async fn mock_tts_rejects_missing_key() {
        let request = SpeechRequest::new("en", "");
        let result = EchoTts.synthesize("hello", &request).await;
        assert!(matches!(result, Err(SpeechError::Validation(_))));
    }

    #[tokio::test]
    async fn mock_stt_transcribes() {
        let request = SpeechRequest::new("en", "key");
        let audio = AudioData::new(vec![0, 1], AudioFormat::Wav);
        let transcription = FixedStt.transcribe(audio, &request).await.unwrap();
        assert_eq!(transcription.text, "fixed");
    }
}
