use std::io::Cursor;

use hound::{SampleFormat, WavReader};

use crate::application::ports::{AudioDecoder, AudioDecoderError};
use crate::domain::Waveform;

use super::downmix_interleaved;

/// RIFF/WAVE reader for PCM and IEEE-float payloads.
pub struct WavContainerDecoder;

impl AudioDecoder for WavContainerDecoder {
    fn name(&self) -> &'static str {
        "wav"
    }

    fn decode(&self, data: &[u8]) -> Result<Waveform, AudioDecoderError> {
        let reader = WavReader::new(Cursor::new(data))
            .map_err(|e| AudioDecoderError::UnsupportedFormat(format!("wav header: {}", e)))?;

        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Float, 32) => reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|e| AudioDecoderError::DecodingFailed(format!("wav samples: {}", e)))?,
            (SampleFormat::Int, 16) => {
                let pcm: Vec<i16> = reader
                    .into_samples::<i16>()
                    .collect::<Result<_, _>>()
                    .map_err(|e| {
                        AudioDecoderError::DecodingFailed(format!("wav samples: {}", e))
                    })?;
                Waveform::from_pcm16(&pcm, spec.sample_rate).samples
            }
            (SampleFormat::Int, bits) if (8..=32).contains(&bits) => {
                let scale = (1i64 << (bits - 1)) as f32;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<Result<_, _>>()
                    .map_err(|e| {
                        AudioDecoderError::DecodingFailed(format!("wav samples: {}", e))
                    })?
            }
            (format, bits) => {
                return Err(AudioDecoderError::UnsupportedFormat(format!(
                    "{:?} with {} bits per sample",
                    format, bits
                )));
            }
        };

        let samples = downmix_interleaved(&interleaved, channels);
        if samples.is_empty() {
            return Err(AudioDecoderError::DecodingFailed(
                "wav contains no samples".to_string(),
            ));
        }

        Ok(Waveform::new(samples, spec.sample_rate))
    }
}
