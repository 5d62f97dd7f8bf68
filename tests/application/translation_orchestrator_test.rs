use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

use async_trait::async_trait;

use vaani::application::ports::{
    AudioStore, AudioStoreError, GenerationRequest, ModelError, ModelInput, ModelOutput,
    ResampleError, Resampler, SpeechTranslationModel,
};
use vaani::application::services::{PipelineFailure, TranslationOrchestrator, WaveformNormalizer};
use vaani::infrastructure::audio::RubatoResampler;
use vaani::infrastructure::storage::LocalAudioStore;
use vaani::domain::{
    AudioFileName, AudioId, LanguageCode, OutputAudioFile, OutputModality, Stage, StageStatus,
    TranslationInput, TranslationRequest, Waveform,
};

use crate::support::{
    CountingModel, TRANSCRIPT, build_wav, create_orchestrator, decoder_chain, normalizer,
    sine_pcm16,
};

fn lang(code: &str) -> LanguageCode {
    LanguageCode::parse(code).unwrap()
}

fn text_request(src: &str, target: &str, modality: OutputModality) -> TranslationRequest {
    TranslationRequest::new(
        TranslationInput::Text("good morning".to_string()),
        lang(src),
        lang(target),
        modality,
    )
    .unwrap()
}

fn audio_request(src: &str, target: &str, modality: OutputModality) -> TranslationRequest {
    let wav = build_wav(16_000, 1, &sine_pcm16(16_000, 1.0, 0.5));
    TranslationRequest::new(TranslationInput::Audio(wav), lang(src), lang(target), modality)
        .unwrap()
}

struct TextOnlyModel;

#[async_trait]
impl SpeechTranslationModel for TextOnlyModel {
    async fn generate(&self, _request: GenerationRequest) -> Result<ModelOutput, ModelError> {
        Ok(ModelOutput::Text("not audio".to_string()))
    }
}

struct SilentModel;

#[async_trait]
impl SpeechTranslationModel for SilentModel {
    async fn generate(&self, _request: GenerationRequest) -> Result<ModelOutput, ModelError> {
        Ok(ModelOutput::Speech(Waveform::new(Vec::new(), 16_000)))
    }
}

/// Remembers how many samples each transcription received.
#[derive(Default)]
struct RecordingModel {
    input_lens: Mutex<Vec<usize>>,
}

#[async_trait]
impl SpeechTranslationModel for RecordingModel {
    async fn generate(&self, request: GenerationRequest) -> Result<ModelOutput, ModelError> {
        if let ModelInput::Speech(waveform) = &request.input {
            self.input_lens.lock().unwrap().push(waveform.len());
        }
        Ok(ModelOutput::Text("ok".to_string()))
    }
}

/// Pass-through resampler that notes which thread ran it.
#[derive(Default)]
struct ThreadNotingResampler {
    thread: Mutex<Option<ThreadId>>,
}

impl Resampler for ThreadNotingResampler {
    fn resample(
        &self,
        samples: &[f32],
        _from_rate: u32,
        _to_rate: u32,
    ) -> Result<Vec<f32>, ResampleError> {
        *self.thread.lock().unwrap() = Some(std::thread::current().id());
        Ok(samples.to_vec())
    }
}

struct ReadOnlyStore;

#[async_trait]
impl AudioStore for ReadOnlyStore {
    async fn write(
        &self,
        _id: &AudioId,
        _waveform: &Waveform,
    ) -> Result<OutputAudioFile, AudioStoreError> {
        Err(AudioStoreError::WriteFailed("disk full".to_string()))
    }

    async fn fetch(&self, name: &AudioFileName) -> Result<Vec<u8>, AudioStoreError> {
        Err(AudioStoreError::NotFound(name.to_string()))
    }
}

#[tokio::test]
async fn given_matching_languages_when_running_then_translation_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(CountingModel::new());
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());

    let result = orchestrator
        .run(text_request("eng", "eng", OutputModality::Text))
        .await
        .unwrap();

    assert_eq!(model.translations(), 0);
    assert_eq!(result.status(Stage::Translate), Some(StageStatus::Skipped));
    assert_eq!(result.translated_text, None);
    assert_eq!(result.final_text.as_deref(), Some("good morning"));
    assert_eq!(result.final_lang, Some(lang("eng")));
}

#[tokio::test]
async fn given_different_languages_when_running_then_translates_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(CountingModel::new());
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());

    let result = orchestrator
        .run(text_request("eng", "fra", OutputModality::Text))
        .await
        .unwrap();

    assert_eq!(model.translations(), 1);
    assert_eq!(result.translated_text.as_deref(), Some("good morning (fra)"));
    assert_eq!(result.final_lang, Some(lang("fra")));
}

#[tokio::test]
async fn given_text_modality_when_running_then_never_synthesizes() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(CountingModel::new());
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());

    let result = orchestrator
        .run(audio_request("fra", "eng", OutputModality::Text))
        .await
        .unwrap();

    assert_eq!(model.syntheses(), 0);
    assert!(result.audio.is_none());
    assert_eq!(result.status(Stage::Synthesize), Some(StageStatus::Skipped));
    assert_eq!(result.status(Stage::Write), Some(StageStatus::Skipped));
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn given_speech_modality_when_running_then_synthesizes_and_reports_duration() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(CountingModel::with_speech_secs(1.25));
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());

    let result = orchestrator
        .run(text_request("eng", "eng", OutputModality::Speech))
        .await
        .unwrap();

    assert_eq!(model.syntheses(), 1);
    let audio = result.audio.unwrap();
    assert_eq!(audio.sample_rate, 16_000);
    assert_eq!(audio.duration_secs, 20_000.0 / 16_000.0);
    assert!(audio.path.exists());
    assert_eq!(
        std::fs::metadata(&audio.path).unwrap().len(),
        audio.byte_size
    );
    assert!(dir.path().join("output.wav").exists());
}

#[tokio::test]
async fn given_audio_input_when_running_then_transcript_is_trimmed_and_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(CountingModel::new());
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());

    let result = orchestrator
        .run(audio_request("eng", "eng", OutputModality::Text))
        .await
        .unwrap();

    assert_eq!(model.transcribes(), 1);
    assert_eq!(result.transcribed_text.as_deref(), Some(TRANSCRIPT));
    assert_eq!(result.final_text.as_deref(), Some(TRANSCRIPT));
    assert_eq!(result.status(Stage::Decode), Some(StageStatus::Completed));
    assert_eq!(result.status(Stage::Transcribe), Some(StageStatus::Completed));
}

#[tokio::test]
async fn given_text_input_when_running_then_decode_and_transcribe_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(CountingModel::new());
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());

    let result = orchestrator
        .run(text_request("eng", "fra", OutputModality::Text))
        .await
        .unwrap();

    assert_eq!(model.transcribes(), 0);
    assert_eq!(result.status(Stage::Decode), Some(StageStatus::Skipped));
    assert_eq!(result.status(Stage::Transcribe), Some(StageStatus::Skipped));
}

#[tokio::test]
async fn given_undecodable_audio_when_running_then_fails_at_decode_without_model_calls() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(CountingModel::new());
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());
    let request = TranslationRequest::new(
        TranslationInput::Audio(b"not audio at all".to_vec()),
        lang("eng"),
        lang("fra"),
        OutputModality::Speech,
    )
    .unwrap();

    let err = orchestrator.run(request).await.unwrap_err();

    assert_eq!(err.stage, Stage::Decode);
    assert!(matches!(err.failure, PipelineFailure::Decode(_)));
    assert_eq!(err.partial.status(Stage::Decode), Some(StageStatus::Failed));
    assert_eq!(model.transcribes(), 0);
}

#[tokio::test]
async fn given_translation_failure_when_running_then_partial_transcript_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(CountingModel::failing_translation());
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());

    let err = orchestrator
        .run(audio_request("hin", "eng", OutputModality::Speech))
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Translate);
    assert!(matches!(err.failure, PipelineFailure::Model(_)));
    assert_eq!(err.partial.transcribed_text.as_deref(), Some(TRANSCRIPT));
    assert_eq!(
        err.partial.status(Stage::Transcribe),
        Some(StageStatus::Completed)
    );
    assert_eq!(err.partial.status(Stage::Synthesize), None);
    assert_eq!(model.syntheses(), 0);
}

#[tokio::test]
async fn given_model_returning_text_for_speech_when_synthesizing_then_unexpected_output() {
    let dir = tempfile::tempdir().unwrap();
    let (orchestrator, _store) = create_orchestrator(Arc::new(TextOnlyModel), dir.path());

    let err = orchestrator
        .run(text_request("eng", "eng", OutputModality::Speech))
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Synthesize);
    assert!(matches!(
        err.failure,
        PipelineFailure::Model(ModelError::UnexpectedOutput {
            expected: "speech",
            actual: "text"
        })
    ));
}

#[tokio::test]
async fn given_empty_synthesized_waveform_when_running_then_synthesis_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (orchestrator, _store) = create_orchestrator(Arc::new(SilentModel), dir.path());

    let err = orchestrator
        .run(text_request("eng", "eng", OutputModality::Speech))
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Synthesize);
}

#[tokio::test]
async fn given_failing_store_when_writing_then_fails_at_write_stage() {
    let model = Arc::new(CountingModel::new());
    let orchestrator = TranslationOrchestrator::new(
        decoder_chain(),
        normalizer(),
        model.clone(),
        Arc::new(ReadOnlyStore),
    );

    let err = orchestrator
        .run(text_request("eng", "fra", OutputModality::Speech))
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Write);
    assert!(matches!(err.failure, PipelineFailure::Write(_)));
    assert_eq!(
        err.partial.translated_text.as_deref(),
        Some("good morning (fra)")
    );
    assert_eq!(
        err.partial.status(Stage::Synthesize),
        Some(StageStatus::Completed)
    );
}

#[tokio::test]
async fn given_concurrent_speech_requests_when_running_then_each_gets_its_own_file() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(CountingModel::new());
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());
    let orchestrator = Arc::new(orchestrator);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move {
                orchestrator
                    .run(text_request("eng", "fra", OutputModality::Speech))
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut names = Vec::new();
    for handle in handles {
        let result = handle.await.unwrap();
        names.push(result.audio.unwrap().file_name.to_string());
    }
    names.sort();
    names.dedup();

    assert_eq!(names.len(), 4);
    assert_eq!(model.syntheses(), 4);
    assert!(dir.path().join("output.wav").exists());
}

#[tokio::test]
async fn given_two_sample_clip_at_48khz_when_running_then_model_never_sees_empty_audio() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(RecordingModel::default());
    let (orchestrator, _store) = create_orchestrator(model.clone(), dir.path());
    let wav = build_wav(48_000, 1, &[12_000, -12_000]);
    let request = TranslationRequest::new(
        TranslationInput::Audio(wav),
        lang("eng"),
        lang("eng"),
        OutputModality::Text,
    )
    .unwrap();

    orchestrator.run(request).await.unwrap();

    let lens = model.input_lens.lock().unwrap().clone();
    assert_eq!(lens.len(), 1);
    assert!(lens[0] > 0);
}

#[tokio::test]
async fn given_clip_limit_that_leaves_nothing_when_running_then_fails_at_decode() {
    let dir = tempfile::tempdir().unwrap();
    let model = Arc::new(RecordingModel::default());
    let clipping = Arc::new(WaveformNormalizer::new(
        Arc::new(RubatoResampler),
        16_000,
        Some(0.00001),
    ));
    let store = Arc::new(LocalAudioStore::new(dir.path().to_path_buf()).unwrap());
    let orchestrator =
        TranslationOrchestrator::new(decoder_chain(), clipping, model.clone(), store);

    let err = orchestrator
        .run(audio_request("eng", "eng", OutputModality::Text))
        .await
        .unwrap_err();

    assert_eq!(err.stage, Stage::Decode);
    assert!(matches!(err.failure, PipelineFailure::Decode(_)));
    assert_eq!(err.partial.status(Stage::Decode), Some(StageStatus::Failed));
    assert!(model.input_lens.lock().unwrap().is_empty());
}

#[tokio::test]
async fn given_audio_needing_resampling_when_running_then_resampling_runs_off_the_async_thread() {
    let dir = tempfile::tempdir().unwrap();
    let resampler = Arc::new(ThreadNotingResampler::default());
    let normalizer = Arc::new(WaveformNormalizer::new(resampler.clone(), 16_000, None));
    let store = Arc::new(LocalAudioStore::new(dir.path().to_path_buf()).unwrap());
    let model = Arc::new(CountingModel::new());
    let orchestrator = TranslationOrchestrator::new(decoder_chain(), normalizer, model, store);
    let wav = build_wav(44_100, 1, &sine_pcm16(44_100, 0.5, 0.5));
    let request = TranslationRequest::new(
        TranslationInput::Audio(wav),
        lang("eng"),
        lang("eng"),
        OutputModality::Text,
    )
    .unwrap();

    orchestrator.run(request).await.unwrap();

    let resampled_on = resampler.thread.lock().unwrap().expect("resampler was not called");
    assert_ne!(resampled_on, std::thread::current().id());
}
