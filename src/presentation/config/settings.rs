use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::infrastructure::model::{ModelProvider, Precision};

use super::Environment;

pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub cors: CorsSettings,
    pub model: ModelSettings,
    pub audio: AudioSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Comma-separated allow-list, or `*`.
    pub origins: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    pub provider: ModelProvider,
    pub base_url: String,
    pub model_id: String,
    pub precisions: Vec<Precision>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    pub model_sample_rate: u32,
    pub max_duration_secs: Option<f64>,
    pub min_duration_secs: f64,
    pub ffmpeg_fallback: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub json: bool,
    pub filter: Option<String>,
}

impl Settings {
    /// Defaults, then `appsettings.<env>`, then `APP__*` variables, then `PORT` and `CORS_ORIGINS`.
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", DEFAULT_PORT as i64)?
            .set_default("cors.origins", "*")?
            .set_default("model.provider", "remote")?
            .set_default("model.base_url", "http://127.0.0.1:8000")?
            .set_default("model.model_id", "facebook/hf-seamless-m4t-medium")?
            .set_default("model.precisions", vec!["float16", "float32"])?
            .set_default("audio.model_sample_rate", 16_000i64)?
            .set_default("audio.min_duration_secs", 0.5)?
            .set_default("audio.ffmpeg_fallback", true)?
            .set_default("storage.output_dir", "audio_output")?
            .set_default("logging.json", false)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("cors.origins", std::env::var("CORS_ORIGINS").ok())?
            .build()?
            .try_deserialize()
    }
}
