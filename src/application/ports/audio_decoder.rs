use std::fmt;

use crate::domain::Waveform;

/// One decoding strategy of the fallback chain.
pub trait AudioDecoder: Send + Sync {
    fn name(&self) -> &'static str;

    fn decode(&self, data: &[u8]) -> Result<Waveform, AudioDecoderError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioDecoderError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("decoder unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone)]
pub struct DecoderFailure {
    pub decoder: &'static str,
    pub error: AudioDecoderError,
}

impl fmt::Display for DecoderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.decoder, self.error)
    }
}

/// Every strategy of the chain failed.
#[derive(Debug, Clone, thiserror::Error)]
#[error("could not decode audio ({} decoders tried): {}", .failures.len(), last_cause(.failures))]
pub struct DecodeError {
    pub failures: Vec<DecoderFailure>,
}

impl DecodeError {
    pub fn single(decoder: &'static str, error: AudioDecoderError) -> Self {
        Self {
            failures: vec![DecoderFailure { decoder, error }],
        }
    }

    pub fn last(&self) -> Option<&DecoderFailure> {
        self.failures.last()
    }
}

fn last_cause(failures: &[DecoderFailure]) -> String {
    failures
        .last()
        .map(ToString::to_string)
        .unwrap_or_else(|| "no decoders configured".to_string())
}
