mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioSettings, CorsSettings, DEFAULT_PORT, LoggingSettings, ModelSettings, ServerSettings,
    Settings, StorageSettings,
};
