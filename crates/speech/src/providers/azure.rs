//! Azure Cognitive Services Speech adapter
//!
//! TTS goes through the REST synthesis endpoint with an SSML body; STT goes
//! through the short-audio recognition endpoint. Both take the subscription
//! key from the per-call request.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::request::SpeechRequest;
use crate::types::{AudioData, AudioFormat, Transcription};
use crate::voices;

/// Output format requested from the synthesis endpoint (PCM WAV)
const TTS_OUTPUT_FORMAT: &str = "riff-24khz-16bit-mono-pcm";

/// Azure speech adapter for both synthesis and recognition
#[derive(Debug, Clone)]
pub struct AzureSpeech {
    client: Client,
    /// Base URL override for tests; production URLs are region-derived
    endpoint: Option<String>,
}

impl AzureSpeech {
    /// Create a new adapter with a bounded per-call timeout
    pub fn new(timeout: Duration, endpoint: Option<String>) -> Result<Self, SpeechError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
        })?;
        Ok(Self { client, endpoint })
    }

    fn tts_url(&self, region: &str) -> String {
        self.endpoint.as_ref().map_or_else(
            || format!("https://{region}.tts.speech.microsoft.com/cognitiveservices/v1"),
            |base| format!("{base}/cognitiveservices/v1"),
        )
    }

    fn stt_url(&self, region: &str, language_tag: &str) -> String {
        let base = self.endpoint.as_ref().map_or_else(
            || format!("https://{region}.stt.speech.microsoft.com"),
            Clone::clone,
        );
        format!(
            "{base}/speech/recognition/conversation/cognitiveservices/v1?language={language_tag}"
        )
    }

    /// Build the SSML body for a synthesis request
    fn ssml(text: &str, language_tag: &str, voice: &str) -> String {
        format!(
            "<speak version='1.0' xml:lang='{language_tag}'>\
             <voice xml:lang='{language_tag}' name='{voice}'>{}</voice>\
             </speak>",
            escape_xml(text)
        )
    }
}

/// Short-audio recognition response
#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(rename = "RecognitionStatus")]
    status: String,
    #[serde(rename = "DisplayText", default)]
    display_text: Option<String>,
}

#[async_trait]
impl TextToSpeech for AzureSpeech {
    #[instrument(skip(self, text, request), fields(text_len = text.len(), language = %request.language))]
    async fn synthesize(
        &self,
        text: &str,
        request: &SpeechRequest,
    ) -> Result<AudioData, SpeechError> {
        request.validate()?;
        if text.is_empty() {
            return Err(SpeechError::Validation("Text is required".to_string()));
        }

        let language_tag = voices::bcp47(&request.language);
        let voice = request
            .voice
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| voices::default_azure_voice(&request.language));

        let body = Self::ssml(text, language_tag, voice);

        let response = self
            .client
            .post(self.tts_url(request.region()))
            .header("Ocp-Apim-Subscription-Key", &request.api_key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", TTS_OUTPUT_FORMAT)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {detail}"
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

        debug!(audio_size = audio_bytes.len(), "Azure synthesis complete");
        Ok(AudioData::new(audio_bytes.to_vec(), AudioFormat::Wav))
    }
}

#[async_trait]
impl SpeechToText for AzureSpeech {
    #[instrument(skip(self, audio, request), fields(audio_size = audio.size_bytes(), language = %request.language))]
    async fn transcribe(
        &self,
        audio: AudioData,
        request: &SpeechRequest,
    ) -> Result<Transcription, SpeechError> {
        request.validate()?;
        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        let language_tag = voices::bcp47(&request.language);
        let mime = audio.format().mime_type();

        let response = self
            .client
            .post(self.stt_url(request.region(), language_tag))
            .header("Ocp-Apim-Subscription-Key", &request.api_key)
            .header("Content-Type", mime)
            .header("Accept", "application/json")
            .body(audio.into_data())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SpeechError::RecognitionFailed(format!(
                "HTTP {status}: {detail}"
            )));
        }

        let recognition: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        if recognition.status != "Success" {
            return Err(SpeechError::RecognitionFailed(format!(
                "Recognition status: {}",
                recognition.status
            )));
        }

        let text = recognition.display_text.unwrap_or_default();
        debug!(text_len = text.len(), "Azure recognition complete");
        Ok(Transcription::new(text).with_language(language_tag))
    }
}

/// Minimal XML escaping for SSML text content
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_adapter(server: &MockServer) -> AzureSpeech {
        AzureSpeech::new(Duration::from_secs(5), Some(server.uri())).unwrap()
    }

    fn test_request() -> SpeechRequest {
        SpeechRequest::new("en", "test-key").with_region("eastus")
    }

    #[test]
    fn ssml_escapes_text() {
        let ssml = AzureSpeech::ssml("a < b & c", "en-US", "en-US-AriaNeural");
        assert!(ssml.contains("a &lt; b &amp; c"));
        assert!(ssml.contains("name='en-US-AriaNeural'"));
    }

    #[test]
    fn production_urls_are_region_scoped() {
        let adapter = AzureSpeech::new(Duration::from_secs(1), None).unwrap();
        assert_eq!(
            adapter.tts_url("westeurope"),
            "https://westeurope.tts.speech.microsoft.com/cognitiveservices/v1"
        );
        assert!(adapter
            .stt_url("westeurope", "de-DE")
            .starts_with("https://westeurope.stt.speech.microsoft.com/"));
    }

    #[tokio::test]
    async fn synthesize_success_returns_wav() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cognitiveservices/v1"))
            .and(header("Ocp-Apim-Subscription-Key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 64]))
            .expect(1)
            .mount(&server)
            .await;

        let audio = test_adapter(&server)
            .synthesize("hello", &test_request())
            .await
            .unwrap();

        assert_eq!(audio.format(), AudioFormat::Wav);
        assert_eq!(audio.size_bytes(), 64);
    }

    #[tokio::test]
    async fn synthesize_rejects_empty_text_before_dispatch() {
        let server = MockServer::start().await;
        // No mock mounted: a dispatched request would fail the test

        let result = test_adapter(&server)
            .synthesize("", &test_request())
            .await;

        assert!(matches!(result, Err(SpeechError::Validation(_))));
    }

    #[tokio::test]
    async fn synthesize_rejects_missing_key_before_dispatch() {
        let server = MockServer::start().await;

        let result = test_adapter(&server)
            .synthesize("hello", &SpeechRequest::new("en", ""))
            .await;

        assert!(matches!(result, Err(SpeechError::Validation(_))));
    }

    #[tokio::test]
    async fn synthesize_non_2xx_is_synthesis_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cognitiveservices/v1"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .expect(1)
            .mount(&server)
            .await;

        let result = test_adapter(&server)
            .synthesize("hello", &test_request())
            .await;

        let Err(SpeechError::SynthesisFailed(msg)) = result else {
            unreachable!("expected synthesis failure");
        };
        assert!(msg.contains("401"));
    }

    #[tokio::test]
    async fn synthesize_empty_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cognitiveservices/v1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = test_adapter(&server)
            .synthesize("hello", &test_request())
            .await;

        assert!(matches!(result, Err(SpeechError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn transcribe_success_returns_display_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/speech/recognition/conversation/cognitiveservices/v1"))
            .and(query_param("language", "en-US"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "RecognitionStatus": "Success",
                "DisplayText": "Hello world."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let audio = AudioData::new(vec![0u8; 16], AudioFormat::Wav);
        let transcription = test_adapter(&server)
            .transcribe(audio, &test_request())
            .await
            .unwrap();

        assert_eq!(transcription.text, "Hello world.");
        assert_eq!(transcription.language.as_deref(), Some("en-US"));
    }

    #[tokio::test]
    async fn transcribe_no_match_is_recognition_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/speech/recognition/conversation/cognitiveservices/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "RecognitionStatus": "NoMatch"
            })))
            .mount(&server)
            .await;

        let audio = AudioData::new(vec![0u8; 16], AudioFormat::Wav);
        let result = test_adapter(&server)
            .transcribe(audio, &test_request())
            .await;

        let Err(SpeechError::RecognitionFailed(msg)) = result else {
            unreachable!("expected recognition failure");
        };
        assert!(msg.contains("NoMatch"));
    }

    #[tokio::test]
    async fn transcribe_rejects_empty_audio() {
        let server = MockServer::start().await;

        let audio = AudioData::new(vec![], AudioFormat::Wav);
        let result = test_adapter(&server)
            .transcribe(audio, &test_request())
            .await;

        assert!(matches!(result, Err(SpeechError::InvalidAudio(_))));
    }
}
