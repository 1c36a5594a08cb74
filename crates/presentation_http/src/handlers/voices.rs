//! Voice lookup handler

use axum::{Json, extract::Query};
use serde::{Deserialize, Serialize};
use speech::{SpeechRouter, VoiceInfo};

use crate::error::ApiError;
use crate::handlers::{DEFAULT_LANGUAGE, parse_provider};

/// Query parameters for `GET /api/voices`
#[derive(Debug, Clone, Deserialize)]
pub struct VoicesQuery {
    pub provider: Option<String>,
    pub language: Option<String>,
}

/// Voice lookup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

/// List the voices a provider offers for a language
pub async fn list_voices(
    Query(query): Query<VoicesQuery>,
) -> Result<Json<VoicesResponse>, ApiError> {
    let provider = parse_provider(query.provider.as_deref().unwrap_or("azure"))?;
    let language = query
        .language
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    Ok(Json(VoicesResponse {
        voices: SpeechRouter::voices(provider, &language),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lists_azure_voices_for_default_language() {
        let response = list_voices(Query(VoicesQuery {
            provider: None,
            language: None,
        }))
        .await
        .unwrap();
        assert!(!response.voices.is_empty());
        assert!(response.voices[0].language.starts_with("en"));
    }

    #[tokio::test]
    async fn short_language_codes_select_the_matching_voice_table() {
        let response = list_voices(Query(VoicesQuery {
            provider: Some("azure".to_string()),
            language: Some("de".to_string()),
        }))
        .await
        .unwrap();
        assert!(response.voices.iter().all(|v| v.language == "de-DE"));
    }

    #[tokio::test]
    async fn lists_elevenlabs_voices() {
        let response = list_voices(Query(VoicesQuery {
            provider: Some("elevenlabs".to_string()),
            language: None,
        }))
        .await
        .unwrap();
        assert!(!response.voices.is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_provider() {
        let result = list_voices(Query(VoicesQuery {
            provider: Some("polly".to_string()),
            language: None,
        }))
        .await;
        assert!(matches!(result, Err(ApiError::BadRequest(_))));
    }
}
