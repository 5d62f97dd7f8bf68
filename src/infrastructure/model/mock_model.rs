use std::f32::consts::PI;

use async_trait::async_trait;

use crate::application::ports::{
    GenerationMode, GenerationRequest, ModelError, ModelInput, ModelOutput,
    SpeechTranslationModel,
};
use crate::domain::Waveform;

pub const MOCK_SAMPLE_RATE: u32 = 16_000;
const SECONDS_PER_CHAR: f32 = 0.06;
const MIN_SPEECH_SECS: f32 = 1.0;
const TONE_HZ: f32 = 440.0;

/// Deterministic stand-in used when no inference server is configured.
pub struct MockSpeechTranslationModel;

#[async_trait]
impl SpeechTranslationModel for MockSpeechTranslationModel {
    async fn generate(&self, request: GenerationRequest) -> Result<ModelOutput, ModelError> {
        match (request.mode, request.input) {
            (GenerationMode::Text, ModelInput::Text { text, src_lang }) => Ok(ModelOutput::Text(
                format!("[{}->{}] {}", src_lang, request.target_lang, text),
            )),
            (GenerationMode::Text, ModelInput::Speech(waveform)) => {
                Ok(ModelOutput::Text(format!(
                    "[{}] {:.1}s of speech",
                    request.target_lang,
                    waveform.duration_secs()
                )))
            }
            (GenerationMode::Speech, ModelInput::Text { text, .. }) => {
                let secs = (text.chars().count() as f32 * SECONDS_PER_CHAR).max(MIN_SPEECH_SECS);
                Ok(ModelOutput::Speech(tone(secs)))
            }
            (GenerationMode::Speech, ModelInput::Speech(waveform)) => {
                Ok(ModelOutput::Speech(waveform))
            }
        }
    }
}

fn tone(secs: f32) -> Waveform {
    let len = (secs * MOCK_SAMPLE_RATE as f32) as usize;
    let samples = (0..len)
        .map(|i| 0.5 * (2.0 * PI * TONE_HZ * i as f32 / MOCK_SAMPLE_RATE as f32).sin())
        .collect();
    Waveform::new(samples, MOCK_SAMPLE_RATE)
}
