use std::sync::Arc;

use crate::application::ports::{AudioDecoder, AudioDecoderError, DecodeError, DecoderFailure};
use crate::domain::Waveform;

/// Ordered decoding strategies; the first one producing usable audio wins.
pub struct AudioDecoderChain {
    decoders: Vec<Arc<dyn AudioDecoder>>,
}

impl AudioDecoderChain {
    pub fn new(decoders: Vec<Arc<dyn AudioDecoder>>) -> Self {
        Self { decoders }
    }

    pub fn decoder_names(&self) -> Vec<&'static str> {
        self.decoders.iter().map(|d| d.name()).collect()
    }

    pub fn decode(&self, data: &[u8]) -> Result<Waveform, DecodeError> {
        let mut failures = Vec::with_capacity(self.decoders.len());

        for decoder in &self.decoders {
            match decoder.decode(data).and_then(validate) {
                Ok(waveform) => {
                    tracing::debug!(
                        decoder = decoder.name(),
                        samples = waveform.len(),
                        sample_rate = waveform.sample_rate,
                        failed_before = failures.len(),
                        "Audio decoded"
                    );
                    return Ok(waveform);
                }
                Err(error) => {
                    tracing::warn!(decoder = decoder.name(), error = %error, "Decoder failed, trying next");
                    failures.push(DecoderFailure {
                        decoder: decoder.name(),
                        error,
                    });
                }
            }
        }

        let error = DecodeError { failures };
        tracing::warn!(
            tried = error.failures.len(),
            last = ?error.last().map(|f| f.decoder),
            "No decoder accepted the audio"
        );
        Err(error)
    }
}

fn validate(waveform: Waveform) -> Result<Waveform, AudioDecoderError> {
    if waveform.sample_rate == 0 {
        return Err(AudioDecoderError::DecodingFailed(
            "zero sample rate".to_string(),
        ));
    }
    if waveform.is_empty() {
        return Err(AudioDecoderError::DecodingFailed(
            "no audio samples decoded".to_string(),
        ));
    }
    Ok(waveform)
}
