use std::sync::Arc;

use crate::application::ports::{
    AudioDecoderError, AudioStore, AudioStoreError, DecodeError, GenerationMode,
    GenerationRequest, ModelError, ModelInput, ModelOutput, SpeechTranslationModel,
};
use crate::domain::{
    AudioId, LanguageCode, OutputAudioFile, OutputModality, Stage, StageStatus,
    TranslationInput, TranslationRequest, Waveform,
};

use super::audio_decoder_chain::AudioDecoderChain;
use super::pipeline_result::{PipelineError, PipelineResult};
use super::waveform_normalizer::{NormalizedWaveform, WaveformNormalizer};

/// Runs transcribe, translate and synthesize as far as a request needs them.
pub struct TranslationOrchestrator {
    decoder_chain: Arc<AudioDecoderChain>,
    normalizer: Arc<WaveformNormalizer>,
    model: Arc<dyn SpeechTranslationModel>,
    audio_store: Arc<dyn AudioStore>,
}

impl TranslationOrchestrator {
    pub fn new(
        decoder_chain: Arc<AudioDecoderChain>,
        normalizer: Arc<WaveformNormalizer>,
        model: Arc<dyn SpeechTranslationModel>,
        audio_store: Arc<dyn AudioStore>,
    ) -> Self {
        Self {
            decoder_chain,
            normalizer,
            model,
            audio_store,
        }
    }

    #[tracing::instrument(
        skip(self, request),
        fields(
            src_lang = %request.src_lang,
            target_lang = %request.target_lang,
            modality = %request.output_modality
        )
    )]
    pub async fn run(&self, request: TranslationRequest) -> Result<PipelineResult, PipelineError> {
        let needs_translation = request.needs_translation();
        let TranslationRequest {
            input,
            src_lang,
            target_lang,
            output_modality,
        } = request;

        let mut result = PipelineResult::new();

        let source_text = match input {
            TranslationInput::Text(text) => {
                result.mark(Stage::Decode, StageStatus::Skipped);
                result.mark(Stage::Transcribe, StageStatus::Skipped);
                text
            }
            TranslationInput::Audio(bytes) => {
                let decoded = self.decode_for_model(bytes).await;
                let prepared = result.record(Stage::Decode, decoded)?;
                result.warnings.extend(prepared.warnings);

                let transcribed = self.transcribe(prepared.waveform, &src_lang).await;
                let text = result.record(Stage::Transcribe, transcribed)?;
                tracing::info!(chars = text.len(), "Audio transcribed");
                result.transcribed_text = Some(text.clone());
                text
            }
        };

        let (text, text_lang) = if needs_translation {
            let translated = self.translate(&source_text, &src_lang, &target_lang).await;
            let translated = result.record(Stage::Translate, translated)?;
            tracing::info!(chars = translated.len(), "Text translated");
            result.translated_text = Some(translated.clone());
            (translated, target_lang)
        } else {
            tracing::debug!("Source and target language match, translation skipped");
            result.mark(Stage::Translate, StageStatus::Skipped);
            (source_text, src_lang)
        };

        match output_modality {
            OutputModality::Text => {
                result.mark(Stage::Synthesize, StageStatus::Skipped);
                result.mark(Stage::Write, StageStatus::Skipped);
            }
            OutputModality::Speech => {
                let synthesized = self.synthesize(&text, &text_lang).await;
                let waveform = result.record(Stage::Synthesize, synthesized)?;

                let written = self.write_output(waveform).await;
                let (file, warnings) = result.record(Stage::Write, written)?;
                result.warnings.extend(warnings);
                tracing::info!(
                    file = %file.file_name,
                    duration_secs = file.duration_secs,
                    bytes = file.byte_size,
                    "Speech synthesized"
                );
                result.audio = Some(file);
            }
        }

        result.final_text = Some(text);
        result.final_lang = Some(text_lang);
        Ok(result)
    }

    /// Decode, resample and normalize off the async workers.
    async fn decode_for_model(&self, bytes: Vec<u8>) -> Result<NormalizedWaveform, DecodeError> {
        let chain = Arc::clone(&self.decoder_chain);
        let normalizer = Arc::clone(&self.normalizer);

        tokio::task::spawn_blocking(move || {
            let waveform = chain.decode(&bytes)?;
            let prepared = normalizer.prepare_model_input(waveform);
            if prepared.waveform.is_empty() {
                return Err(DecodeError::single(
                    "normalizer",
                    AudioDecoderError::DecodingFailed(
                        "no samples left after resampling and clipping".to_string(),
                    ),
                ));
            }
            Ok(prepared)
        })
        .await
        .unwrap_or_else(|e| {
            Err(DecodeError::single(
                "runtime",
                AudioDecoderError::DecodingFailed(e.to_string()),
            ))
        })
    }

    /// Each synthesis gets a fresh server-side id; `output.wav` follows the newest.
    async fn write_output(
        &self,
        waveform: Waveform,
    ) -> Result<(OutputAudioFile, Vec<String>), AudioStoreError> {
        let normalizer = Arc::clone(&self.normalizer);
        let normalized = tokio::task::spawn_blocking(move || normalizer.normalize(waveform))
            .await
            .map_err(|e| AudioStoreError::EncodingFailed(e.to_string()))?;

        let file = self
            .audio_store
            .write(&AudioId::new(), &normalized.waveform)
            .await?;
        Ok((file, normalized.warnings))
    }

    /// Self-transcription: the target language is the spoken one.
    async fn transcribe(
        &self,
        waveform: Waveform,
        src_lang: &LanguageCode,
    ) -> Result<String, ModelError> {
        tracing::debug!(samples = waveform.len(), "Transcribing audio");
        let output = self
            .model
            .generate(GenerationRequest {
                input: ModelInput::Speech(waveform),
                target_lang: src_lang.clone(),
                mode: GenerationMode::Text,
            })
            .await?;
        expect_text(output)
    }

    async fn translate(
        &self,
        text: &str,
        src_lang: &LanguageCode,
        target_lang: &LanguageCode,
    ) -> Result<String, ModelError> {
        tracing::debug!(chars = text.len(), "Translating text");
        let output = self
            .model
            .generate(GenerationRequest {
                input: ModelInput::Text {
                    text: text.to_string(),
                    src_lang: src_lang.clone(),
                },
                target_lang: target_lang.clone(),
                mode: GenerationMode::Text,
            })
            .await?;
        expect_text(output)
    }

    async fn synthesize(&self, text: &str, lang: &LanguageCode) -> Result<Waveform, ModelError> {
        tracing::debug!(chars = text.len(), lang = %lang, "Synthesizing speech");
        let output = self
            .model
            .generate(GenerationRequest {
                input: ModelInput::Text {
                    text: text.to_string(),
                    src_lang: lang.clone(),
                },
                target_lang: lang.clone(),
                mode: GenerationMode::Speech,
            })
            .await?;

        match output {
            ModelOutput::Speech(waveform) if waveform.is_empty() || waveform.sample_rate == 0 => {
                Err(ModelError::GenerationFailed(
                    "model returned an empty waveform".to_string(),
                ))
            }
            ModelOutput::Speech(waveform) => Ok(waveform),
            other => Err(ModelError::UnexpectedOutput {
                expected: "speech",
                actual: other.kind(),
            }),
        }
    }
}

fn expect_text(output: ModelOutput) -> Result<String, ModelError> {
    match output {
        ModelOutput::Text(text) => Ok(text.trim().to_string()),
        other => Err(ModelError::UnexpectedOutput {
            expected: "text",
            actual: other.kind(),
        }),
    }
}
