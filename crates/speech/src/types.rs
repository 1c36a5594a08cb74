//! Types shared by the speech provider clients

use std::fmt;

use serde::{Deserialize, Serialize};

/// Audio formats handled by the brokered providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WAV (uncompressed PCM)
    Wav,
    /// MP3
    Mp3,
    /// M4A/AAC
    M4a,
    /// FLAC (lossless)
    Flac,
    /// OGG container
    Ogg,
}

impl AudioFormat {
    /// MIME type for this format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::M4a => "audio/m4a",
            Self::Flac => "audio/flac",
            Self::Ogg => "audio/ogg",
        }
    }

    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
            Self::Flac => "flac",
            Self::Ogg => "ogg",
        }
    }

    /// Parse a format from a filename extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "m4a" | "mp4" | "aac" => Some(Self::M4a),
            "flac" => Some(Self::Flac),
            "ogg" | "opus" => Some(Self::Ogg),
            _ => None,
        }
    }

    /// Parse a format from a filename
    #[must_use]
    pub fn from_filename(name: &str) -> Option<Self> {
        name.rsplit_once('.')
            .and_then(|(_, ext)| Self::from_extension(ext))
    }

    /// Whether the recognition endpoint accepts this format without conversion
    ///
    /// Azure short-audio recognition wants PCM WAV; everything else is
    /// transcoded first.
    #[must_use]
    pub const fn is_recognition_ready(&self) -> bool {
        matches!(self, Self::Wav)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Container for audio bytes with their format
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Generate a filename with the matching extension
    #[must_use]
    pub fn filename(&self, base: &str) -> String {
        format!("{}.{}", base, self.format.extension())
    }
}

/// Result of a speech-to-text call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcription {
    /// Recognized text
    pub text: String,
    /// Language the recognizer was asked to use (BCP-47)
    pub language: Option<String>,
}

impl Transcription {
    /// Create a transcription with just text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
        }
    }

    /// Attach the recognition language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Whether the recognizer produced no usable text
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A voice offered by a provider, as served by `/api/voices`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Provider-specific voice identifier
    pub name: String,
    /// Human-readable name
    pub display_name: String,
    /// Language tag the voice speaks (BCP-47)
    pub language: String,
}

impl VoiceInfo {
    /// Create a new voice entry
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            language: language.into(),
        }
    }
}
