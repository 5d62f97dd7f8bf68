use std::collections::BTreeMap;

use serde::Serialize;

use crate::application::services::{PipelineError, PipelineResult};

pub const SYNTHESIS_MESSAGE: &str = "Audio generated successfully";

/// Success body. Fields a request never produced are left out.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TranslationEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcribed_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl TranslationEnvelope {
    pub fn build(result: PipelineResult) -> Self {
        let mut envelope = Self {
            transcribed_text: result.transcribed_text,
            translated_text: result.translated_text,
            warnings: result.warnings,
            ..Self::default()
        };

        if let Some(audio) = result.audio {
            envelope.message = Some(SYNTHESIS_MESSAGE.to_string());
            envelope.audio_file = Some(audio.file_name.to_string());
            envelope.duration = Some(audio.duration_secs);
            envelope.sample_rate = Some(audio.sample_rate);
            envelope.file_size = Some(audio.byte_size);
        }

        envelope
    }
}

/// Failure body: always `error`, plus whatever the pipeline produced before failing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcribed_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub diagnostics: BTreeMap<String, String>,
}

impl ErrorEnvelope {
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            stage: None,
            transcribed_text: None,
            translated_text: None,
            diagnostics: BTreeMap::new(),
        }
    }

    pub fn from_pipeline(error: &PipelineError) -> Self {
        let partial = &error.partial;
        Self {
            error: error.to_string(),
            stage: Some(error.stage.to_string()),
            transcribed_text: partial.transcribed_text.clone(),
            translated_text: partial.translated_text.clone(),
            diagnostics: partial
                .diagnostics
                .iter()
                .map(|(stage, status)| (stage.to_string(), status.to_string()))
                .collect(),
        }
    }
}
