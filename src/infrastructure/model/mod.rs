mod mock_model;
mod model_factory;
mod precision;
mod remote_model;

pub use mock_model::{MOCK_SAMPLE_RATE, MockSpeechTranslationModel};
pub use model_factory::{ModelFactory, ModelProvider};
pub use precision::Precision;
pub use remote_model::{
    RemoteModelConfig, RemoteSpeechTranslationModel, decode_samples, encode_samples,
};
