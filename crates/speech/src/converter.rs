//! Audio conversion for recognition input
//!
//! Uploaded audio arrives as mp3/m4a/flac/ogg; the recognition endpoint
//! wants PCM WAV. Conversion shells out to FFmpeg over stdin/stdout.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::SpeechError;
use crate::types::{AudioData, AudioFormat};

/// FFmpeg-backed audio converter
#[derive(Debug, Clone, Default)]
pub struct AudioConverter {
    /// FFmpeg binary path (defaults to "ffmpeg" in PATH)
    ffmpeg_path: Option<String>,
}

impl AudioConverter {
    /// Create a converter using `ffmpeg` from PATH
    #[must_use]
    pub const fn new() -> Self {
        Self { ffmpeg_path: None }
    }

    /// Create a converter with a custom FFmpeg binary
    #[must_use]
    pub fn with_ffmpeg_path(path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: Some(path.into()),
        }
    }

    fn ffmpeg_path(&self) -> &str {
        self.ffmpeg_path.as_deref().unwrap_or("ffmpeg")
    }

    /// Check whether FFmpeg can be spawned
    #[instrument(skip(self))]
    pub async fn is_available(&self) -> bool {
        Command::new(self.ffmpeg_path())
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    /// Convert audio to recognition-ready PCM WAV (16kHz mono)
    ///
    /// Audio already in WAV is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::AudioProcessing` when FFmpeg cannot be spawned,
    /// exits non-zero, or produces no output.
    #[instrument(skip(self, audio), fields(input_format = %audio.format()))]
    pub async fn convert_for_recognition(
        &self,
        audio: &AudioData,
    ) -> Result<AudioData, SpeechError> {
        if audio.format().is_recognition_ready() {
            debug!("Audio already recognition-ready, skipping conversion");
            return Ok(audio.clone());
        }

        debug!("Converting {} to wav", audio.format());

        let mut cmd = Command::new(self.ffmpeg_path());
        cmd.args(["-i", "pipe:0", "-f", "wav"])
            .args(["-codec:a", "pcm_s16le", "-ar", "16000", "-ac", "1"])
            .args(["-y", "-loglevel", "error", "pipe:1"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to spawn FFmpeg: {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(audio.data()).await.map_err(|e| {
                SpeechError::AudioProcessing(format!("Failed to write to FFmpeg stdin: {e}"))
            })?;
            // Drop stdin to signal EOF
            drop(stdin);
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to wait for FFmpeg: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::AudioProcessing(format!(
                "FFmpeg conversion failed: {stderr}"
            )));
        }

        if output.stdout.is_empty() {
            return Err(SpeechError::AudioProcessing(
                "FFmpeg produced empty output".to_string(),
            ));
        }

        debug!(output_size = output.stdout.len(), "Conversion successful");
        Ok(AudioData::new(output.stdout, AudioFormat::Wav))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_ffmpeg() {
        assert_eq!(AudioConverter::new().ffmpeg_path(), "ffmpeg");
    }

    #[test]
    fn custom_path_is_used() {
        let converter = AudioConverter::with_ffmpeg_path("/opt/ffmpeg");
        assert_eq!(converter.ffmpeg_path(), "/opt/ffmpeg");
    }

    #[tokio::test]
    async fn is_available_false_for_missing_binary() {
        let converter = AudioConverter::with_ffmpeg_path("/nonexistent/ffmpeg");
        assert!(!converter.is_available().await);
    }

    #[tokio::test]
    async fn wav_input_is_returned_unchanged() {
        let audio = AudioData::new(vec![9, 9, 9], AudioFormat::Wav);
        let converter = AudioConverter::with_ffmpeg_path("/nonexistent/ffmpeg");

        // No FFmpeg needed for already-ready audio
        let result = converter.convert_for_recognition(&audio).await.unwrap();
        assert_eq!(result.data(), audio.data());
        assert_eq!(result.format(), AudioFormat::Wav);
    }

    #[tokio::test]
    async fn conversion_fails_with_missing_binary() {
        let audio = AudioData::new(vec![1, 2, 3], AudioFormat::Mp3);
        let converter = AudioConverter::with_ffmpeg_path("/nonexistent/ffmpeg");

        let result = converter.convert_for_recognition(&audio).await;
        assert!(matches!(result, Err(SpeechError::AudioProcessing(_))));
    }
}
