use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::application::ports::{ModelError, SpeechTranslationModel};

use super::mock_model::MockSpeechTranslationModel;
use super::precision::Precision;
use super::remote_model::{RemoteModelConfig, RemoteSpeechTranslationModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    Remote,
    Mock,
}

pub struct ModelFactory;

impl ModelFactory {
    pub async fn create(
        provider: ModelProvider,
        base_url: &str,
        model_id: &str,
        precisions: &[Precision],
        request_timeout_secs: Option<u64>,
    ) -> Result<Arc<dyn SpeechTranslationModel>, ModelError> {
        match provider {
            ModelProvider::Remote => {
                let precisions = if precisions.is_empty() {
                    Precision::fallback_order()
                } else {
                    precisions.to_vec()
                };
                let model = RemoteSpeechTranslationModel::load(RemoteModelConfig {
                    base_url: base_url.to_string(),
                    model_id: model_id.to_string(),
                    precisions,
                    request_timeout: request_timeout_secs.map(Duration::from_secs),
                })
                .await?;
                Ok(Arc::new(model))
            }
            ModelProvider::Mock => {
                tracing::warn!("Using mock speech translation model");
                Ok(Arc::new(MockSpeechTranslationModel))
            }
        }
    }
}
