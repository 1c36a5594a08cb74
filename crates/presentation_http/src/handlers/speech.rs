//! Single-call synthesis and recognition handlers

use std::path::Path;

use axum::{Json, extract::Multipart, extract::State};
use serde::{Deserialize, Serialize};
use speech::{AudioData, AudioFormat, Provider, SpeechRequest, Transcription};
use storage::FileStore;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::handlers::{build_request, parse_provider};
use crate::state::AppState;

/// Request body for `POST /api/tts`
#[derive(Debug, Clone, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    pub provider: Option<String>,
    pub language: Option<String>,
    pub voice_name: Option<String>,
    pub api_key: Option<String>,
    pub region: Option<String>,
}

/// Response for `POST /api/tts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsResponse {
    pub success: bool,
    /// Artifact name in the download area
    pub filename: String,
    pub download_url: String,
}

/// Synthesize one utterance into the download area
#[instrument(skip(state, body), fields(provider = body.provider.as_deref().unwrap_or("azure")))]
pub async fn synthesize(
    State(state): State<AppState>,
    Json(body): Json<TtsRequest>,
) -> Result<Json<TtsResponse>, ApiError> {
    if body.text.trim().is_empty() {
        return Err(ApiError::BadRequest("No text provided".to_string()));
    }

    let provider = parse_provider(body.provider.as_deref().unwrap_or("azure"))?;
    let request = build_request(body.language, body.voice_name, body.api_key, body.region)?;

    let audio = state.router.synthesize(provider, &body.text, &request).await?;
    let filename = batch::generated_filename(provider, audio.format());
    state.store.put_download(&filename, audio.data()).await?;

    Ok(Json(TtsResponse {
        success: true,
        download_url: format!("/download/{filename}"),
        filename,
    }))
}

/// Response for `POST /api/stt`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttResponse {
    pub success: bool,
    /// Recognized text
    pub text: String,
}

/// Collected multipart form fields for recognition
#[derive(Debug, Default)]
struct SttForm {
    audio: Option<(String, Vec<u8>)>,
    provider: Option<String>,
    language: Option<String>,
    api_key: Option<String>,
    region: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<SttForm, ApiError> {
    let mut form = SttForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                let filename = field.file_name().unwrap_or("audio.wav").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
                form.audio = Some((filename, bytes.to_vec()));
            },
            "provider" => form.provider = Some(read_text(field).await?),
            "language" => form.language = Some(read_text(field).await?),
            "api_key" => form.api_key = Some(read_text(field).await?),
            "region" => form.region = Some(read_text(field).await?),
            _ => {},
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid form field: {e}")))
}

/// Transcribe one uploaded audio file
#[instrument(skip(state, multipart))]
pub async fn transcribe(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<SttResponse>, ApiError> {
    let form = read_form(multipart).await?;

    let (filename, bytes) = form
        .audio
        .ok_or_else(|| ApiError::BadRequest("No audio file provided".to_string()))?;
    if !FileStore::is_allowed_audio(&filename) {
        return Err(ApiError::BadRequest(format!(
            "Unsupported audio file: {filename}"
        )));
    }

    let provider = parse_provider(form.provider.as_deref().unwrap_or("azure"))?;
    let request = build_request(form.language, None, form.api_key, form.region)?;

    let staged = state.store.stage(&bytes, "stt", &filename).await?;
    let result = recognize_staged(&state, &staged, &filename, provider, &request).await;
    state.store.cleanup(&staged).await;

    let transcription = result?;
    Ok(Json(SttResponse {
        success: true,
        text: transcription.text,
    }))
}

/// Read the upload back from its staged path, convert if needed, transcribe
async fn recognize_staged(
    state: &AppState,
    staged: &Path,
    filename: &str,
    provider: Provider,
    request: &SpeechRequest,
) -> Result<Transcription, ApiError> {
    let bytes = state.store.read(staged).await?;

    let format = AudioFormat::from_filename(filename).unwrap_or(AudioFormat::Wav);
    let mut audio = AudioData::new(bytes, format);
    if !audio.format().is_recognition_ready() {
        match state.converter.convert_for_recognition(&audio).await {
            Ok(converted) => audio = converted,
            Err(e) => debug!(error = %e, "Conversion failed, sending original audio"),
        }
    }

    Ok(state.router.transcribe(provider, audio, request).await?)
}
