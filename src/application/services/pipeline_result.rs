use std::collections::BTreeMap;

use crate::application::ports::{AudioStoreError, DecodeError, ModelError};
use crate::domain::{LanguageCode, OutputAudioFile, Stage, StageStatus};

/// Request-scoped accumulator, filled stage by stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineResult {
    pub transcribed_text: Option<String>,
    pub translated_text: Option<String>,
    /// Text handed to the output stage, with its language.
    pub final_text: Option<String>,
    pub final_lang: Option<LanguageCode>,
    pub audio: Option<OutputAudioFile>,
    pub diagnostics: BTreeMap<Stage, StageStatus>,
    pub warnings: Vec<String>,
}

impl PipelineResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, stage: Stage, status: StageStatus) {
        self.diagnostics.insert(stage, status);
    }

    pub fn status(&self, stage: Stage) -> Option<StageStatus> {
        self.diagnostics.get(&stage).copied()
    }

    /// Marks `stage` from `outcome`; on failure hands the partial result to the error.
    pub fn record<T, E>(&mut self, stage: Stage, outcome: Result<T, E>) -> Result<T, PipelineError>
    where
        E: Into<PipelineFailure>,
    {
        match outcome {
            Ok(value) => {
                self.mark(stage, StageStatus::Completed);
                Ok(value)
            }
            Err(e) => {
                self.mark(stage, StageStatus::Failed);
                let failure = e.into();
                tracing::error!(stage = %stage, error = %failure, "Pipeline stage failed");
                Err(PipelineError {
                    stage,
                    failure,
                    partial: std::mem::take(self),
                })
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineFailure {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Write(#[from] AudioStoreError),
}

#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {failure}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub failure: PipelineFailure,
    pub partial: PipelineResult,
}
