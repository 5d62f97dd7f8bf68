mod audio;
mod audio_form;
pub mod envelope;
pub mod error;
mod health;
mod speech;
mod translate;

pub use audio::{audio_file_handler, latest_audio_handler};
pub use envelope::{ErrorEnvelope, SYNTHESIS_MESSAGE, TranslationEnvelope};
pub use error::{ApiError, NOT_FOUND_MESSAGE};
pub use health::{LIVENESS_MESSAGE, health_handler, root_handler};
pub use speech::{speech_to_speech_handler, speech_to_text_handler};
pub use translate::{TextRequestBody, text_to_speech_handler, translate_handler};
