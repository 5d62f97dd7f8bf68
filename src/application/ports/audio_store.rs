use std::io;

use async_trait::async_trait;

use crate::domain::{AudioFileName, AudioId, OutputAudioFile, Waveform};

#[async_trait]
pub trait AudioStore: Send + Sync {
    /// Persists `waveform` as 16-bit PCM under `id` and refreshes the latest-output alias.
    async fn write(&self, id: &AudioId, waveform: &Waveform)
    -> Result<OutputAudioFile, AudioStoreError>;

    async fn fetch(&self, name: &AudioFileName) -> Result<Vec<u8>, AudioStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("encoding failed: {0}")]
    EncodingFailed(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("audio file not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
