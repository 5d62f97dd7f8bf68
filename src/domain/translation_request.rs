use super::{LanguageCode, OutputModality};

/// What the caller handed in. Exactly one of text or audio by construction.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationInput {
    Text(String),
    Audio(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub input: TranslationInput,
    pub src_lang: LanguageCode,
    pub target_lang: LanguageCode,
    pub output_modality: OutputModality,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestValidationError {
    #[error("Missing 'text' or 'target_lang'")]
    MissingTextOrTarget,
    #[error("No audio file uploaded")]
    MissingAudio,
    #[error("Provide either text or audio, not both")]
    AmbiguousInput,
    #[error("{0}")]
    InvalidLanguage(String),
    #[error("Speech output is not supported for language '{0}'")]
    SpeechUnsupported(String),
}

impl TranslationRequest {
    pub fn new(
        input: TranslationInput,
        src_lang: LanguageCode,
        target_lang: LanguageCode,
        output_modality: OutputModality,
    ) -> Result<Self, RequestValidationError> {
        match &input {
            TranslationInput::Text(text) if text.trim().is_empty() => {
                return Err(RequestValidationError::MissingTextOrTarget);
            }
            TranslationInput::Audio(bytes) if bytes.is_empty() => {
                return Err(RequestValidationError::MissingAudio);
            }
            _ => {}
        }

        if output_modality == OutputModality::Speech && !target_lang.supports_speech_output() {
            return Err(RequestValidationError::SpeechUnsupported(
                target_lang.to_string(),
            ));
        }

        Ok(Self {
            input,
            src_lang,
            target_lang,
            output_modality,
        })
    }

    /// Builds a request from loosely typed boundary fields. `src_lang` falls back to `eng`.
    pub fn from_parts(
        text: Option<String>,
        audio: Option<Vec<u8>>,
        src_lang: Option<&str>,
        target_lang: Option<&str>,
        output_modality: OutputModality,
    ) -> Result<Self, RequestValidationError> {
        let input = match (text, audio) {
            (Some(_), Some(_)) => return Err(RequestValidationError::AmbiguousInput),
            (Some(text), None) => TranslationInput::Text(text),
            (None, Some(audio)) => TranslationInput::Audio(audio),
            (None, None) => return Err(RequestValidationError::MissingTextOrTarget),
        };

        let target_lang = match target_lang.map(str::trim) {
            Some(code) if !code.is_empty() => {
                LanguageCode::parse(code).map_err(RequestValidationError::InvalidLanguage)?
            }
            _ => return Err(RequestValidationError::MissingTextOrTarget),
        };

        let src_lang = match src_lang.map(str::trim) {
            Some(code) if !code.is_empty() => {
                LanguageCode::parse(code).map_err(RequestValidationError::InvalidLanguage)?
            }
            _ => LanguageCode::default_source(),
        };

        Self::new(input, src_lang, target_lang, output_modality)
    }

    pub fn needs_translation(&self) -> bool {
        self.src_lang != self.target_lang
    }
}
