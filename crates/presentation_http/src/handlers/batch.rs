//! Batch processing handler
//!
//! `POST /api/batch` takes a multipart form with the job file and per-call
//! provider parameters. Item failures live inside the archived report, so a
//! run with failures still answers 200; only parse, validation, and local
//! I/O problems reject the request.

use std::str::FromStr;

use axum::{Json, extract::Multipart, extract::State};
use batch::BatchKind;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::handlers::{build_request, parse_provider};
use crate::state::AppState;

/// Batch run response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub success: bool,
    /// Total work items in the job, failures included
    pub processed_count: usize,
    /// Where to fetch the result archive
    pub download_url: String,
    pub message: String,
}

/// Collected multipart form fields
#[derive(Debug, Default)]
struct BatchForm {
    file: Option<Vec<u8>>,
    provider: Option<String>,
    language: Option<String>,
    api_key: Option<String>,
    region: Option<String>,
    kind: Option<String>,
}

async fn read_form(mut multipart: Multipart) -> Result<BatchForm, ApiError> {
    let mut form = BatchForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;
                form.file = Some(bytes.to_vec());
            },
            "provider" => form.provider = Some(read_text(field).await?),
            "language" => form.language = Some(read_text(field).await?),
            "api_key" => form.api_key = Some(read_text(field).await?),
            "region" => form.region = Some(read_text(field).await?),
            "type" => form.kind = Some(read_text(field).await?),
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

/// Run a batch TTS or STT job over an uploaded file
#[instrument(skip(state, multipart))]
pub async fn run_batch(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<BatchResponse>, ApiError> {
    let form = read_form(multipart).await?;

    let file = form
        .file
        .ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;
    let kind = form
        .kind
        .as_deref()
        .map(BatchKind::from_str)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
        .ok_or_else(|| ApiError::BadRequest("Missing batch type".to_string()))?;
    let provider = parse_provider(form.provider.as_deref().unwrap_or("azure"))?;
    let request = build_request(form.language, None, form.api_key, form.region)?;

    let summary = state
        .processor
        .run(kind, &file, provider, &request)
        .await?;

    Ok(Json(BatchResponse {
        success: true,
        processed_count: summary.processed_count,
        download_url: format!("/download/{}", summary.archive),
        message: format!(
            "Batch processing completed: {} succeeded, {} failed",
            summary.success_count, summary.failure_count
        ),
    }))
}
