use std::sync::Arc;

use crate::application::ports::AudioStore;
use crate::application::services::TranslationOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<TranslationOrchestrator>,
    pub audio_store: Arc<dyn AudioStore>,
}
