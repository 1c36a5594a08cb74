//! Per-call provider request parameters
//!
//! Credentials travel with each request instead of living in process-global
//! state, so concurrent requests with different API keys cannot leak into
//! each other.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpeechError;

/// Default Azure region when the caller does not supply one
pub const DEFAULT_REGION: &str = "eastus";

/// Supported speech providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Azure Cognitive Services Speech (TTS + STT)
    Azure,
    /// ElevenLabs (TTS only)
    ElevenLabs,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Azure => f.write_str("azure"),
            Self::ElevenLabs => f.write_str("elevenlabs"),
        }
    }
}

impl FromStr for Provider {
    type Err = SpeechError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "azure" => Ok(Self::Azure),
            "elevenlabs" => Ok(Self::ElevenLabs),
            other => Err(SpeechError::Validation(format!(
                "Invalid provider: {other}"
            ))),
        }
    }
}

/// Parameters for one provider call
///
/// The API key is caller-supplied and scoped to this request only.
#[derive(Clone)]
pub struct SpeechRequest {
    /// Short language code from the caller (e.g. "en", "de")
    pub language: String,
    /// Optional voice identifier; provider default applies when absent
    pub voice: Option<String>,
    /// Provider API key, required
    pub api_key: String,
    /// Azure region; ignored by ElevenLabs
    pub region: Option<String>,
}

impl SpeechRequest {
    /// Create a request with the mandatory fields
    #[must_use]
    pub fn new(language: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            voice: None,
            api_key: api_key.into(),
            region: None,
        }
    }

    /// Set the voice identifier
    #[must_use]
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Set the Azure region
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// The effective region for Azure endpoints
    #[must_use]
    pub fn region(&self) -> &str {
        self.region
            .as_deref()
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_REGION)
    }

    /// Reject the request before dispatch when the credential is missing
    pub fn validate(&self) -> Result<(), SpeechError> {
        if self.api_key.trim().is_empty() {
            return Err(SpeechError::Validation("API key is required".to_string()));
        }
        Ok(())
    }
}

// Keep the API key out of logs.
impl fmt::Debug for SpeechRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechRequest")
            .field("language", &self.language)
            .field("voice", &self.voice)
            .field("api_key", &"[REDACTED]")
            .field("region", &self.region)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_known_names() {
        assert_eq!("azure".parse::<Provider>().ok(), Some(Provider::Azure));
        assert_eq!(
            "ElevenLabs".parse::<Provider>().ok(),
            Some(Provider::ElevenLabs)
        );
    }

    #[test]
    fn provider_rejects_unknown_names() {
        assert!("polly".parse::<Provider>().is_err());
        assert!("".parse::<Provider>().is_err());
    }

    #[test]
    fn provider_display_round_trips() {
        assert_eq!(Provider::Azure.to_string(), "azure");
        assert_eq!(Provider::ElevenLabs.to_string(), "elevenlabs");
    }

    #[test]
    fn validate_rejects_empty_api_key() {
        let request = SpeechRequest::new("en", "");
        assert!(matches!(
            request.validate(),
            Err(SpeechError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_whitespace_api_key() {
        let request = SpeechRequest::new("en", "   ");
        assert!(request.validate().is_err());
    }

    #[test]
    fn validate_accepts_present_api_key() {
        let request = SpeechRequest::new("en", "key-123");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn region_falls_back_to_default() {
        let request = SpeechRequest::new("en", "k");
        assert_eq!(request.region(), DEFAULT_REGION);

        let request = SpeechRequest::new("en", "k").with_region("");
        assert_eq!(request.region(), DEFAULT_REGION);

        let request = SpeechRequest::new("en", "k").with_region("westeurope");
        assert_eq!(request.region(), "westeurope");
    }

    #[test]
    fn debug_redacts_api_key() {
        let request = SpeechRequest::new("en", "super-secret");
        let debug = format!("{request:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
