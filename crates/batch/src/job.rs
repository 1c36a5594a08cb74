//! Job description parsing
//!
//! A TTS job is a JSON array of single-key objects mapping output filename
//! to the text to synthesize. An STT job is a ZIP bundle of audio files.
//! Malformed top-level structure fails the whole job before any item is
//! dispatched.

use std::io::{Cursor, Read};
use std::str::FromStr;

use serde_json::Value;
use storage::FileStore;
use zip::ZipArchive;

use crate::error::BatchError;

/// Which operation a batch job performs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    /// Text-to-speech: JSON job file, audio artifacts out
    Tts,
    /// Speech-to-text: ZIP bundle in, transcript report out
    Stt,
}

impl FromStr for BatchKind {
    type Err = BatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tts" => Ok(Self::Tts),
            "stt" => Ok(Self::Stt),
            other => Err(BatchError::Validation(format!(
                "Invalid batch type: {other}"
            ))),
        }
    }
}

/// One TTS work item: output filename and the text to synthesize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtsItem {
    /// Requested output filename, also the report key
    pub output_name: String,
    /// Text to synthesize
    pub text: String,
}

/// One STT work item extracted from the uploaded bundle
#[derive(Debug, Clone)]
pub struct SttEntry {
    /// Bundle entry name (basename), also the report key
    pub name: String,
    /// Audio bytes
    pub data: Vec<u8>,
}

/// Parse a TTS job description
///
/// The wire format is a JSON array of objects, each with exactly one
/// key-value pair: output filename → text. Anything else is a job-level
/// parse failure.
pub fn parse_tts_job(bytes: &[u8]) -> Result<Vec<TtsItem>, BatchError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| BatchError::Parse(format!("Invalid JSON: {e}")))?;

    let Value::Array(elements) = value else {
        return Err(BatchError::Parse(
            "Expected a JSON array of single-key objects".to_string(),
        ));
    };

    let mut items = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let Value::Object(object) = element else {
            return Err(BatchError::Parse(format!(
                "Entry {index} is not an object"
            )));
        };
        if object.len() != 1 {
            return Err(BatchError::Parse(format!(
                "Entry {index} must have exactly one key-value pair"
            )));
        }
        // len() == 1 guarantees one pair
        let Some((output_name, value)) = object.into_iter().next() else {
            continue;
        };
        let Value::String(text) = value else {
            return Err(BatchError::Parse(format!(
                "Entry {index} ({output_name}): text must be a string"
            )));
        };
        items.push(TtsItem { output_name, text });
    }

    Ok(items)
}

/// Extract audio entries from an STT bundle, in archive order
///
/// Only files with accepted audio extensions (wav/mp3/m4a/flac) are kept;
/// directories, hidden files, and anything else are ignored. A bundle that
/// is not a readable ZIP is a job-level parse failure.
pub fn parse_stt_bundle(bytes: &[u8]) -> Result<Vec<SttEntry>, BatchError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| BatchError::Parse(format!("Invalid ZIP bundle: {e}")))?;

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut file = archive
            .by_index(index)
            .map_err(|e| BatchError::Parse(format!("Corrupt ZIP entry {index}: {e}")))?;

        if file.is_dir() {
            continue;
        }

        let name = file
            .name()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .to_string();

        if name.starts_with('.') || !FileStore::is_allowed_audio(&name) {
            continue;
        }

        let mut data = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
        file.read_to_end(&mut data)
            .map_err(|e| BatchError::Parse(format!("Failed to read {name}: {e}")))?;

        entries.push(SttEntry { name, data });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    mod kind {
        use super::*;

        #[test]
        fn parses_known_kinds() {
            assert_eq!("tts".parse::<BatchKind>().ok(), Some(BatchKind::Tts));
            assert_eq!("STT".parse::<BatchKind>().ok(), Some(BatchKind::Stt));
        }

        #[test]
        fn rejects_unknown_kind() {
            assert!("translate".parse::<BatchKind>().is_err());
        }
    }

    mod tts_job {
        use super::*;

        #[test]
        fn parses_array_of_single_key_objects() {
            let json = br#"[{"a.wav": "hello"}, {"b.wav": "world"}]"#;
            let items = parse_tts_job(json).unwrap();

            assert_eq!(items.len(), 2);
            assert_eq!(items[0].output_name, "a.wav");
            assert_eq!(items[0].text, "hello");
            assert_eq!(items[1].output_name, "b.wav");
            assert_eq!(items[1].text, "world");
        }

        #[test]
        fn preserves_input_order() {
            let json = br#"[{"z.wav": "1"}, {"a.wav": "2"}, {"m.wav": "3"}]"#;
            let items = parse_tts_job(json).unwrap();
            let names: Vec<&str> = items.iter().map(|i| i.output_name.as_str()).collect();
            assert_eq!(names, ["z.wav", "a.wav", "m.wav"]);
        }

        #[test]
        fn empty_array_is_a_valid_empty_job() {
            let items = parse_tts_job(b"[]").unwrap();
            assert!(items.is_empty());
        }

        #[test]
        fn rejects_non_array_top_level() {
            let result = parse_tts_job(br#"{"a.wav": "hello"}"#);
            assert!(matches!(result, Err(BatchError::Parse(_))));
        }

        #[test]
        fn rejects_invalid_json() {
            assert!(matches!(
                parse_tts_job(b"not json"),
                Err(BatchError::Parse(_))
            ));
        }

        #[test]
        fn rejects_non_object_element() {
            let result = parse_tts_job(br#"["just a string"]"#);
            assert!(matches!(result, Err(BatchError::Parse(_))));
        }

        #[test]
        fn rejects_multi_key_object() {
            let result = parse_tts_job(br#"[{"a.wav": "x", "b.wav": "y"}]"#);
            assert!(matches!(result, Err(BatchError::Parse(_))));
        }

        #[test]
        fn rejects_non_string_text() {
            let result = parse_tts_job(br#"[{"a.wav": 42}]"#);
            assert!(matches!(result, Err(BatchError::Parse(_))));
        }

        #[test]
        fn duplicate_keys_keep_both_items() {
            let json = br#"[{"a.wav": "first"}, {"a.wav": "second"}]"#;
            let items = parse_tts_job(json).unwrap();
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].text, "first");
            assert_eq!(items[1].text, "second");
        }
    }

    mod stt_bundle {
        use super::*;

        fn bundle(entries: &[(&str, &[u8])]) -> Vec<u8> {
            let mut cursor = Cursor::new(Vec::new());
            let mut writer = zip::ZipWriter::new(&mut cursor);
            let options = SimpleFileOptions::default();
            for (name, data) in entries {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data).unwrap();
            }
            writer.finish().unwrap();
            cursor.into_inner()
        }

        #[test]
        fn extracts_audio_entries_in_order() {
            let bytes = bundle(&[("b.wav", b"bb"), ("a.mp3", b"aa")]);
            let entries = parse_stt_bundle(&bytes).unwrap();

            assert_eq!(entries.len(), 2);
            assert_eq!(entries[0].name, "b.wav");
            assert_eq!(entries[0].data, b"bb");
            assert_eq!(entries[1].name, "a.mp3");
        }

        #[test]
        fn skips_non_audio_and_hidden_entries() {
            let bytes = bundle(&[
                ("readme.txt", b"text"),
                ("nested/clip.flac", b"ff"),
                ("__MACOSX/.hidden.wav", b"xx"),
                ("voice.m4a", b"mm"),
            ]);
            let entries = parse_stt_bundle(&bytes).unwrap();

            let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, ["clip.flac", "voice.m4a"]);
        }

        #[test]
        fn empty_bundle_is_a_valid_empty_job() {
            let bytes = bundle(&[]);
            let entries = parse_stt_bundle(&bytes).unwrap();
            assert!(entries.is_empty());
        }

        #[test]
        fn rejects_non_zip_payload() {
            let result = parse_stt_bundle(b"definitely not a zip");
            assert!(matches!(result, Err(BatchError::Parse(_))));
        }
    }
}
