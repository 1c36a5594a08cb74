//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(handlers::health::health_check))
        // Speech API
        .route("/api/tts", post(handlers::speech::synthesize))
        .route("/api/stt", post(handlers::speech::transcribe))
        .route("/api/batch", post(handlers::batch::run_batch))
        .route("/api/voices", get(handlers::voices::list_voices))
        // Artifact downloads
        .route("/download/{filename}", get(handlers::download::download))
        // Attach state
        .with_state(state)
}
