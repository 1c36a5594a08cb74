//! Download handler
//!
//! Serves archives and artifacts out of the download area as attachments.
//! Name resolution is delegated to the store, which refuses anything with
//! path separators or parent components.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use speech::AudioFormat;
use tokio::fs;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Serve a file from the download area as an attachment
#[instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let path = state
        .store
        .download_path(&filename)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("File not found: {filename}")))?;

    let bytes = fs::read(&path)
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to read {filename}: {e}")))?;

    let content_type = content_type_for(&filename);
    let disposition = format!("attachment; filename=\"{filename}\"");

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

fn content_type_for(filename: &str) -> &'static str {
    if filename.ends_with(".zip") {
        return "application/zip";
    }
    AudioFormat::from_filename(filename)
        .map_or("application/octet-stream", |format| format.mime_type())
}
