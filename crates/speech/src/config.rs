//! Configuration for the provider clients

use serde::{Deserialize, Serialize};

/// Configuration shared by the provider adapters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Per-call deadline in milliseconds; expiry surfaces as a failure
    /// outcome instead of blocking the batch indefinitely
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Override for the Azure endpoint base URL (tests)
    #[serde(default)]
    pub azure_endpoint: Option<String>,

    /// Override for the ElevenLabs endpoint base URL (tests)
    #[serde(default)]
    pub elevenlabs_endpoint: Option<String>,

    /// FFmpeg binary used for audio conversion
    #[serde(default)]
    pub ffmpeg_path: Option<String>,
}

const fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            azure_endpoint: None,
            elevenlabs_endpoint: None,
            ffmpeg_path: None,
        }
    }
}
