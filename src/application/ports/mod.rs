mod audio_decoder;
mod audio_store;
mod resampler;
mod speech_translation_model;

pub use audio_decoder::{AudioDecoder, AudioDecoderError, DecodeError, DecoderFailure};
pub use audio_store::{AudioStore, AudioStoreError};
pub use resampler::{ResampleError, Resampler};
pub use speech_translation_model::{
    GenerationMode, GenerationRequest, ModelError, ModelInput, ModelOutput,
    SpeechTranslationModel,
};
