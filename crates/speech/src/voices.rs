//! Static language and voice lookup tables
//!
//! Provider-specific mapping (BCP-47 tag, default neural voice, popular
//! ElevenLabs voices) is configuration, not logic. Values mirror what the
//! providers actually offer.

use crate::types::VoiceInfo;

/// Default ElevenLabs voice (Rachel)
pub const DEFAULT_ELEVENLABS_VOICE: &str = "21m00Tcm4TlvDq8ikWAM";

/// Map a short language code to the BCP-47 tag Azure expects
#[must_use]
pub fn bcp47(language: &str) -> &'static str {
    match language {
        "ar" => "ar-SA",
        "hi" => "hi-IN",
        "fr" => "fr-FR",
        "ps" => "ps-AF",
        "prs" => "prs-AF",
        "es" => "es-ES",
        "de" => "de-DE",
        "it" => "it-IT",
        "pt" => "pt-BR",
        "ru" => "ru-RU",
        "ja" => "ja-JP",
        "ko" => "ko-KR",
        "zh" => "zh-CN",
        _ => "en-US",
    }
}

/// Default Azure neural voice for a short language code
#[must_use]
pub fn default_azure_voice(language: &str) -> &'static str {
    match language {
        "ar" => "ar-SA-ZariyahNeural",
        "hi" => "hi-IN-SwaraNeural",
        "fr" => "fr-FR-DeniseNeural",
        "es" => "es-ES-ElviraNeural",
        "de" => "de-DE-KatjaNeural",
        "it" => "it-IT-ElsaNeural",
        "pt" => "pt-BR-FranciscaNeural",
        "ru" => "ru-RU-SvetlanaNeural",
        "ja" => "ja-JP-NanamiNeural",
        "ko" => "ko-KR-SunHiNeural",
        "zh" => "zh-CN-XiaoxiaoNeural",
        _ => "en-US-AriaNeural",
    }
}

/// Additional popular Azure voices per language
fn additional_azure_voices(language: &str) -> &'static [&'static str] {
    match language {
        "en" => &["en-US-GuyNeural", "en-US-JennyNeural", "en-US-DavisNeural"],
        "ar" => &["ar-SA-HamedNeural", "ar-SA-SalmaNeural"],
        "hi" => &["hi-IN-MadhurNeural", "hi-IN-PrabhatNeural"],
        "fr" => &["fr-FR-HenriNeural", "fr-FR-CelesteNeural"],
        "es" => &["es-ES-AlvaroNeural", "es-ES-LiaNeural"],
        "de" => &["de-DE-ConradNeural", "de-DE-KatjaNeural"],
        "it" => &["it-IT-DiegoNeural", "it-IT-ElsaNeural"],
        "pt" => &["pt-BR-AntonioNeural", "pt-BR-FranciscaNeural"],
        "ru" => &["ru-RU-DmitryNeural", "ru-RU-SvetlanaNeural"],
        "ja" => &["ja-JP-KeitaNeural", "ja-JP-NanamiNeural"],
        "ko" => &["ko-KR-InJoonNeural", "ko-KR-SunHiNeural"],
        "zh" => &["zh-CN-YunxiNeural", "zh-CN-XiaoxiaoNeural"],
        _ => &[],
    }
}

/// Voices available from Azure for a language, default first
#[must_use]
pub fn azure_voices(language: &str) -> Vec<VoiceInfo> {
    let tag = bcp47(language);
    let mut voices = vec![VoiceInfo::new(
        default_azure_voice(language),
        format!("Default {} Voice", language.to_uppercase()),
        tag,
    )];

    for voice in additional_azure_voices(language) {
        let display = voice.replace('-', " ").replace("Neural", "");
        voices.push(VoiceInfo::new(*voice, display.trim(), tag));
    }

    voices
}

/// Popular ElevenLabs voices
///
/// ElevenLabs needs an API key to enumerate voices, so the broker serves a
/// curated list instead.
#[must_use]
pub fn elevenlabs_voices() -> Vec<VoiceInfo> {
    [
        (DEFAULT_ELEVENLABS_VOICE, "Rachel (Default)"),
        ("AZnzlk1XvdvUeBnXmlld", "Domi"),
        ("EXAVITQu4vr4xnSDxMaL", "Bella"),
        ("ErXwobaYiN019PkySvjV", "Antoni"),
        ("MF3mGyEYCl7XYWbV9V6O", "Elli"),
        ("TxGEqnHWrfWFTfGW9XjX", "Josh"),
        ("VR6AewLTigWG4xSOukaG", "Arnold"),
        ("pNInz6obpgDQGcFmaJgB", "Adam"),
        ("yoZ06aMxZJJ28mfd3POQ", "Sam"),
    ]
    .into_iter()
    .map(|(id, name)| VoiceInfo::new(id, name, "en"))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcp47_maps_known_languages() {
        assert_eq!(bcp47("en"), "en-US");
        assert_eq!(bcp47("de"), "de-DE");
        assert_eq!(bcp47("zh"), "zh-CN");
        assert_eq!(bcp47("prs"), "prs-AF");
    }

    #[test]
    fn bcp47_falls_back_to_english() {
        assert_eq!(bcp47("xx"), "en-US");
        assert_eq!(bcp47(""), "en-US");
    }

    #[test]
    fn default_voice_matches_language() {
        assert_eq!(default_azure_voice("ja"), "ja-JP-NanamiNeural");
        assert_eq!(default_azure_voice("unknown"), "en-US-AriaNeural");
    }

    #[test]
    fn azure_voices_put_default_first() {
        let voices = azure_voices("fr");
        assert_eq!(voices[0].name, "fr-FR-DeniseNeural");
        assert!(voices.len() > 1);
        assert!(voices.iter().all(|v| v.language == "fr-FR"));
    }

    #[test]
    fn azure_voices_for_unknown_language_has_only_default() {
        let voices = azure_voices("xx");
        assert_eq!(voices.len(), 1);
        assert_eq!(voices[0].language, "en-US");
    }

    #[test]
    fn elevenlabs_list_starts_with_default_voice() {
        let voices = elevenlabs_voices();
        assert_eq!(voices[0].name, DEFAULT_ELEVENLABS_VOICE);
        assert_eq!(voices.len(), 9);
    }
}
