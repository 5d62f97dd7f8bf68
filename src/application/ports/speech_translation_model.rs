use async_trait::async_trait;

use crate::domain::{LanguageCode, Waveform};

#[derive(Debug, Clone, PartialEq)]
pub enum ModelInput {
    Text { text: String, src_lang: LanguageCode },
    Speech(Waveform),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Text,
    Speech,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Text => "text",
            GenerationMode::Speech => "speech",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub input: ModelInput,
    pub target_lang: LanguageCode,
    pub mode: GenerationMode,
}

/// What a generation produced; the adapter resolves the model's raw output into one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Text(String),
    Speech(Waveform),
}

impl ModelOutput {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelOutput::Text(_) => "text",
            ModelOutput::Speech(_) => "speech",
        }
    }
}

/// A loaded multilingual speech/text model.
///
/// Text mode with speech input is transcription when `target_lang` is the spoken
/// language. Text mode with text input is translation. Speech mode with text
/// input is synthesis.
#[async_trait]
pub trait SpeechTranslationModel: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<ModelOutput, ModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model loading failed: {0}")]
    LoadFailed(String),
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    #[error("unexpected model output: expected {expected}, got {actual}")]
    UnexpectedOutput {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
