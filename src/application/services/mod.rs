mod audio_decoder_chain;
mod pipeline_result;
mod translation_orchestrator;
mod waveform_normalizer;

pub use audio_decoder_chain::AudioDecoderChain;
pub use pipeline_result::{PipelineError, PipelineFailure, PipelineResult};
pub use translation_orchestrator::TranslationOrchestrator;
pub use waveform_normalizer::{
    MIN_DURATION_SECS, NormalizedWaveform, TARGET_PEAK, WaveformNormalizer, normalize_peak,
};
