//! Provider adapters and the router that dispatches to them

pub mod azure;
pub mod elevenlabs;

use std::time::Duration;

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::request::{Provider, SpeechRequest};
use crate::types::{AudioData, AudioFormat, Transcription, VoiceInfo};
use crate::voices;

pub use azure::AzureSpeech;
pub use elevenlabs::ElevenLabsSpeech;

/// Routes a call to the adapter for the named provider
///
/// This is the single entry point callers use; each call is attempted once
/// against exactly one provider, and every failure comes back as a
/// `SpeechError` value.
#[derive(Debug, Clone)]
pub struct SpeechRouter {
    azure: AzureSpeech,
    elevenlabs: ElevenLabsSpeech,
}

impl SpeechRouter {
    /// Build the router and its adapters from configuration
    pub fn new(config: &SpeechConfig) -> Result<Self, SpeechError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        Ok(Self {
            azure: AzureSpeech::new(timeout, config.azure_endpoint.clone())?,
            elevenlabs: ElevenLabsSpeech::new(timeout, config.elevenlabs_endpoint.clone())?,
        })
    }

    /// Synthesize text with the named provider
    pub async fn synthesize(
        &self,
        provider: Provider,
        text: &str,
        request: &SpeechRequest,
    ) -> Result<AudioData, SpeechError> {
        match provider {
            Provider::Azure => self.azure.synthesize(text, request).await,
            Provider::ElevenLabs => self.elevenlabs.synthesize(text, request).await,
        }
    }

    /// Transcribe audio with the named provider
    pub async fn transcribe(
        &self,
        provider: Provider,
        audio: AudioData,
        request: &SpeechRequest,
    ) -> Result<Transcription, SpeechError> {
        match provider {
            Provider::Azure => self.azure.transcribe(audio, request).await,
            Provider::ElevenLabs => Err(SpeechError::NotSupported(
                "Only Azure supports speech-to-text".to_string(),
            )),
        }
    }

    /// Voices offered by the named provider (static lookup, no network)
    #[must_use]
    pub fn voices(provider: Provider, language: &str) -> Vec<VoiceInfo> {
        match provider {
            Provider::Azure => voices::azure_voices(language),
            Provider::ElevenLabs => voices::elevenlabs_voices(),
        }
    }

    /// Audio format a provider's synthesis artifacts arrive in
    #[must_use]
    pub const fn artifact_format(provider: Provider) -> AudioFormat {
        match provider {
            Provider::Azure => AudioFormat::Wav,
            Provider::ElevenLabs => AudioFormat::Mp3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_router() -> SpeechRouter {
        SpeechRouter::new(&SpeechConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn elevenlabs_stt_is_not_supported() {
        let router = test_router();
        let audio = AudioData::new(vec![0u8; 4], AudioFormat::Wav);
        let request = SpeechRequest::new("en", "key");

        let result = router
            .transcribe(Provider::ElevenLabs, audio, &request)
            .await;

        assert!(matches!(result, Err(SpeechError::NotSupported(_))));
    }

    #[test]
    fn voices_lookup_is_static() {
        assert!(!SpeechRouter::voices(Provider::Azure, "en").is_empty());
        assert!(!SpeechRouter::voices(Provider::ElevenLabs, "en").is_empty());
    }

    #[test]
    fn artifact_formats_per_provider() {
        assert_eq!(
            SpeechRouter::artifact_format(Provider::Azure),
            AudioFormat::Wav
        );
        assert_eq!(
            SpeechRouter::artifact_format(Provider::ElevenLabs),
            AudioFormat::Mp3
        );
    }
}
