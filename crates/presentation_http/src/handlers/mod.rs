//! HTTP request handlers

pub mod batch;
pub mod download;
pub mod health;
pub mod speech;
pub mod voices;

use std::str::FromStr;

use ::speech::{Provider, SpeechRequest};

use crate::error::ApiError;

/// Short language code applied when the caller omits one
pub(crate) const DEFAULT_LANGUAGE: &str = "en";

/// Parse a provider name from a form or query value
pub(crate) fn parse_provider(value: &str) -> Result<Provider, ApiError> {
    Provider::from_str(value).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Assemble and validate a provider request from caller-supplied fields
pub(crate) fn build_request(
    language: Option<String>,
    voice: Option<String>,
    api_key: Option<String>,
    region: Option<String>,
) -> Result<SpeechRequest, ApiError> {
    let api_key = api_key.unwrap_or_default();
    let language = language
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let mut request = SpeechRequest::new(language, api_key);
    if let Some(voice) = voice.filter(|v| !v.trim().is_empty()) {
        request = request.with_voice(voice);
    }
    if let Some(region) = region.filter(|r| !r.trim().is_empty()) {
        request = request.with_region(region);
    }

    request
        .validate()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(request)
}
