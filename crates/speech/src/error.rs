//! Speech provider errors

use thiserror::Error;

/// Errors that can occur while talking to a speech provider
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Request was rejected before dispatch (missing credential or payload)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the provider failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Provider call exceeded the configured deadline
    #[error("Provider request timed out")]
    Timeout,

    /// Synthesis rejected or failed remotely
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Recognition rejected or failed remotely
    #[error("Recognition failed: {0}")]
    RecognitionFailed(String),

    /// Invalid audio payload
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Provider returned a body we could not interpret
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Operation not offered by this provider
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Local audio conversion failed
    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_message() {
        let err = SpeechError::Validation("API key is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: API key is required");
    }

    #[test]
    fn timeout_error_message_carries_no_duration() {
        let err = SpeechError::Timeout;
        assert_eq!(err.to_string(), "Provider request timed out");
    }

    #[test]
    fn synthesis_failed_error_message() {
        let err = SpeechError::SynthesisFailed("voice rejected".to_string());
        assert_eq!(err.to_string(), "Synthesis failed: voice rejected");
    }

    #[test]
    fn recognition_failed_error_message() {
        let err = SpeechError::RecognitionFailed("no speech detected".to_string());
        assert_eq!(err.to_string(), "Recognition failed: no speech detected");
    }

    #[test]
    fn not_supported_error_message() {
        let err = SpeechError::NotSupported("elevenlabs has no STT".to_string());
        assert_eq!(err.to_string(), "Not supported: elevenlabs has no STT");
    }

    #[test]
    fn audio_processing_error_message() {
        let err = SpeechError::AudioProcessing("ffmpeg missing".to_string());
        assert_eq!(err.to_string(), "Audio processing failed: ffmpeg missing");
    }
}
