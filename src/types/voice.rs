//! Voice catalogue
//!
//! The voice identifiers offered in the picker.

/// Voice selected when nothing was saved
pub const DEFAULT_VOICE: &str = "ja-JP-NanamiNeural";

/// Voices offered in the picker, in display order
pub const VOICES: &[&str] = &[
    "ja-JP-NanamiNeural",
    "ja-JP-KeitaNeural",
    "ja-JP-AoiNeural",
    "ja-JP-DaichiNeural",
    "ja-JP-MayuNeural",
    "ja-JP-NaokiNeural",
    "ja-JP-ShioriNeural",
];

/// Locale prefix of a voice identifier ("ja-JP-NanamiNeural" -> "ja-JP").
///
/// Falls back to the default voice's locale when the identifier has fewer
/// than three dash-separated parts.
pub fn voice_locale(voice: &str) -> &str {
    let mut dashes = voice.match_indices('-').map(|(i, _)| i);
    match (dashes.next(), dashes.next()) {
        (Some(_), Some(second)) => &voice[..second],
        _ => "ja-JP",
    }
}

/// Picker options: the catalogue, plus `current` when it is not part of it.
pub fn voice_options(current: &str) -> Vec<String> {
    let mut options: Vec<String> = VOICES.iter().map(|v| v.to_string()).collect();
    if !current.is_empty() && !VOICES.contains(&current) {
        options.push(current.to_string());
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_voice_is_listed() {
        assert_eq!(VOICES[0], DEFAULT_VOICE);
    }

    #[test]
    fn test_voice_locale() {
        assert_eq!(voice_locale("ja-JP-NanamiNeural"), "ja-JP");
        assert_eq!(voice_locale("en-US-JennyNeural"), "en-US");
        assert_eq!(voice_locale("zh-CN-shaanxi-XiaoniNeural"), "zh-CN");
        assert_eq!(voice_locale("Nanami"), "ja-JP");
    }

    #[test]
    fn test_voice_options_keeps_custom_voice() {
        let options = voice_options("en-US-JennyNeural");
        assert_eq!(options.len(), VOICES.len() + 1);
        assert_eq!(options.last().map(String::as_str), Some("en-US-JennyNeural"));

        let options = voice_options(DEFAULT_VOICE);
        assert_eq!(options.len(), VOICES.len());
    }
}
