mod audio_file;
mod language_code;
mod output_modality;
mod stage;
mod translation_request;
mod waveform;

pub use audio_file::{AudioFileName, AudioId, OutputAudioFile};
pub use language_code::{LanguageCode, SPEECH_OUTPUT_LANGUAGES};
pub use output_modality::OutputModality;
pub use stage::{Stage, StageStatus};
pub use translation_request::{
    RequestValidationError, TranslationInput, TranslationRequest,
};
pub use waveform::Waveform;
