//! ElevenLabs adapter
//!
//! TTS only. The API key travels in the `xi-api-key` header of each call;
//! voice settings match what the service recommends for general narration.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::request::SpeechRequest;
use crate::types::{AudioData, AudioFormat};
use crate::voices::DEFAULT_ELEVENLABS_VOICE;

const API_BASE: &str = "https://api.elevenlabs.io/v1";
const MODEL_ID: &str = "eleven_multilingual_v2";

/// ElevenLabs TTS adapter
#[derive(Debug, Clone)]
pub struct ElevenLabsSpeech {
    client: Client,
    base_url: String,
}

/// Synthesis request body
#[derive(Debug, Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.5,
            style: 0.0,
            use_speaker_boost: true,
        }
    }
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiError {
    detail: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl ElevenLabsSpeech {
    /// Create a new adapter with a bounded per-call timeout
    pub fn new(timeout: Duration, endpoint: Option<String>) -> Result<Self, SpeechError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            base_url: endpoint.unwrap_or_else(|| API_BASE.to_string()),
        })
    }

    fn synthesis_url(&self, voice_id: &str) -> String {
        format!("{}/text-to-speech/{voice_id}", self.base_url)
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsSpeech {
    #[instrument(skip(self, text, request), fields(text_len = text.len()))]
    async fn synthesize(
        &self,
        text: &str,
        request: &SpeechRequest,
    ) -> Result<AudioData, SpeechError> {
        request.validate()?;
        if text.is_empty() {
            return Err(SpeechError::Validation("Text is required".to_string()));
        }

        let voice_id = request
            .voice
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_ELEVENLABS_VOICE);

        let body = SynthesisBody {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings::default(),
        };

        let response = self
            .client
            .post(self.synthesis_url(voice_id))
            .header("xi-api-key", &request.api_key)
            .header("Accept", "audio/mpeg")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_body) {
                return Err(SpeechError::SynthesisFailed(api_error.detail.message));
            }
            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        if audio_bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Synthesis returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio_bytes.len(), "ElevenLabs synthesis complete");
        Ok(AudioData::new(audio_bytes.to_vec(), AudioFormat::Mp3))
    }
}
