use std::fmt;

/// Languages the speech decoder of the model can voice.
pub const SPEECH_OUTPUT_LANGUAGES: &[&str] = &[
    "arb", "ben", "cat", "ces", "cmn", "cym", "dan", "deu", "eng", "est", "fin", "fra", "hin",
    "ind", "ita", "jpn", "kor", "mlt", "nld", "pes", "pol", "por", "ron", "rus", "slk", "spa",
    "swe", "swh", "tel", "tgl", "tha", "tur", "ukr", "urd", "uzn", "vie",
];

const DEFAULT_SOURCE: &str = "eng";

/// Model language code such as `eng`, `fra` or `cmn_Hant`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(code: &str) -> Result<Self, String> {
        let trimmed = code.trim();
        let valid = trimmed.len() >= 2
            && trimmed.len() <= 16
            && trimmed.starts_with(|c: char| c.is_ascii_lowercase())
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');

        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(format!("Invalid language code: '{}'", code))
        }
    }

    pub fn default_source() -> Self {
        Self(DEFAULT_SOURCE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn supports_speech_output(&self) -> bool {
        SPEECH_OUTPUT_LANGUAGES.contains(&self.0.as_str())
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::default_source()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
