//! Speech - cloud TTS/STT provider clients for Orato
//!
//! Brokers synthesis and recognition calls to the configured cloud
//! providers. Credentials are per-call parameters, never process state.
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` defines the `TextToSpeech` / `SpeechToText` traits
//! - `providers` contains the Azure and ElevenLabs adapters plus the
//!   `SpeechRouter` that dispatches to them by provider name
//!
//! # Example
//!
//! ```ignore
//! use speech::{Provider, SpeechConfig, SpeechRequest, SpeechRouter};
//!
//! let router = SpeechRouter::new(&SpeechConfig::default())?;
//! let request = SpeechRequest::new("en", api_key);
//! let audio = router.synthesize(Provider::Azure, "Hello!", &request).await?;
//! ```

pub mod config;
pub mod converter;
pub mod error;
pub mod ports;
pub mod providers;
pub mod request;
pub mod types;
pub mod voices;

pub use config::SpeechConfig;
pub use converter::AudioConverter;
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::{AzureSpeech, ElevenLabsSpeech, SpeechRouter};
pub use request::{DEFAULT_REGION, Provider, SpeechRequest};
pub use types::{AudioData, AudioFormat, Transcription, VoiceInfo};
