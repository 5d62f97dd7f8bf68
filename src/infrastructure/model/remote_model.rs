use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    GenerationMode, GenerationRequest, ModelError, ModelInput, ModelOutput,
    SpeechTranslationModel,
};
use crate::domain::Waveform;

use super::precision::Precision;

#[derive(Debug, Clone)]
pub struct RemoteModelConfig {
    pub base_url: String,
    pub model_id: String,
    pub precisions: Vec<Precision>,
    pub request_timeout: Option<Duration>,
}

/// Talks to a model inference server that hosts the weights and tokenizer.
pub struct RemoteSpeechTranslationModel {
    client: reqwest::Client,
    base_url: String,
    model_id: String,
    precision: Precision,
}

#[derive(Serialize)]
struct LoadBody<'a> {
    model_id: &'a str,
    precision: Precision,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    model_id: &'a str,
    tgt_lang: &'a str,
    mode: &'static str,
    input: WireInput<'a>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireInput<'a> {
    Text { text: &'a str, src_lang: &'a str },
    Speech { audio_b64: String, sample_rate: u32 },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum WireOutput {
    Text { text: String },
    Speech { audio_b64: String, sample_rate: u32 },
}

impl RemoteSpeechTranslationModel {
    /// Loads the model, trying each precision in order. Failing every one is fatal for startup.
    pub async fn load(config: RemoteModelConfig) -> Result<Self, ModelError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ModelError::LoadFailed(format!("http client: {}", e)))?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        tracing::info!(
            base_url = %base_url,
            model = %config.model_id,
            "Loading speech translation model"
        );

        let mut last_error = None;
        for precision in &config.precisions {
            match request_load(&client, &base_url, &config.model_id, *precision).await {
                Ok(()) => {
                    tracing::info!(precision = %precision, "Model loaded");
                    return Ok(Self {
                        client,
                        base_url,
                        model_id: config.model_id,
                        precision: *precision,
                    });
                }
                Err(e) => {
                    tracing::warn!(precision = %precision, error = %e, "Model load failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| ModelError::LoadFailed("no precision configured".to_string())))
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }
}

async fn request_load(
    client: &reqwest::Client,
    base_url: &str,
    model_id: &str,
    precision: Precision,
) -> Result<(), ModelError> {
    let response = client
        .post(format!("{}/v1/load", base_url))
        .json(&LoadBody {
            model_id,
            precision,
        })
        .send()
        .await
        .map_err(|e| ModelError::LoadFailed(format!("request: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(ModelError::LoadFailed(format!(
            "{} status {}: {}",
            precision, status, body
        )));
    }

    Ok(())
}

#[async_trait]
impl SpeechTranslationModel for RemoteSpeechTranslationModel {
    async fn generate(&self, request: GenerationRequest) -> Result<ModelOutput, ModelError> {
        let input = match &request.input {
            ModelInput::Text { text, src_lang } => WireInput::Text {
                text: text.as_str(),
                src_lang: src_lang.as_str(),
            },
            ModelInput::Speech(waveform) => WireInput::Speech {
                audio_b64: encode_samples(&waveform.samples),
                sample_rate: waveform.sample_rate,
            },
        };

        let body = GenerateBody {
            model_id: &self.model_id,
            tgt_lang: request.target_lang.as_str(),
            mode: request.mode.as_str(),
            input,
        };

        tracing::debug!(
            mode = request.mode.as_str(),
            tgt_lang = %request.target_lang,
            "Sending generation request"
        );

        let response = self
            .client
            .post(format!("{}/v1/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ModelError::GenerationFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let output: WireOutput = response
            .json()
            .await
            .map_err(|e| ModelError::ApiRequestFailed(format!("body: {}", e)))?;

        let output = match output {
            WireOutput::Text { text } => ModelOutput::Text(text),
            WireOutput::Speech {
                audio_b64,
                sample_rate,
            } => ModelOutput::Speech(Waveform::new(decode_samples(&audio_b64)?, sample_rate)),
        };

        match (request.mode, &output) {
            (GenerationMode::Text, ModelOutput::Text(_))
            | (GenerationMode::Speech, ModelOutput::Speech(_)) => Ok(output),
            (mode, other) => Err(ModelError::UnexpectedOutput {
                expected: mode.as_str(),
                actual: other.kind(),
            }),
        }
    }
}

/// Little-endian f32 samples, base64 encoded.
pub fn encode_samples(samples: &[f32]) -> String {
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    STANDARD.encode(bytes)
}

pub fn decode_samples(encoded: &str) -> Result<Vec<f32>, ModelError> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| ModelError::GenerationFailed(format!("audio payload: {}", e)))?;

    if bytes.len() % 4 != 0 {
        return Err(ModelError::GenerationFailed(format!(
            "audio payload length {} is not a multiple of 4",
            bytes.len()
        )));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}
