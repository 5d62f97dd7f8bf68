use rubato::{
    Resampler as _, SincFixedIn, SincInterpolationParameters, SincInterpolationType,
    WindowFunction,
};

use crate::application::ports::{ResampleError, Resampler};

const CHUNK_SIZE: usize = 1024;

/// Band-limited sinc resampler for mono model input.
pub struct RubatoResampler;

/// Output length for `input_len` samples, rounded up so a non-empty clip
/// never resamples to nothing.
pub fn resampled_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    (input_len as u64 * to_rate as u64).div_ceil(from_rate as u64) as usize
}

fn sinc_params() -> SincInterpolationParameters {
    SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    }
}

impl Resampler for RubatoResampler {
    fn resample(
        &self,
        samples: &[f32],
        from_rate: u32,
        to_rate: u32,
    ) -> Result<Vec<f32>, ResampleError> {
        if from_rate == 0 || to_rate == 0 {
            return Err(ResampleError(format!(
                "invalid rates {} -> {}",
                from_rate, to_rate
            )));
        }
        if from_rate == to_rate || samples.is_empty() {
            return Ok(samples.to_vec());
        }

        let ratio = to_rate as f64 / from_rate as f64;
        let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, sinc_params(), CHUNK_SIZE, 1)
            .map_err(|e| ResampleError(format!("init: {}", e)))?;

        let expected_len = resampled_len(samples.len(), from_rate, to_rate);
        // the filter emits `delay` frames of warm-up before the first real sample
        let delay = resampler.output_delay();
        let wanted = delay + expected_len;
        let mut output = Vec::with_capacity(wanted + CHUNK_SIZE);

        let mut chunks = samples.chunks_exact(CHUNK_SIZE);
        for chunk in &mut chunks {
            let frames = resampler
                .process(&[chunk], None)
                .map_err(|e| ResampleError(e.to_string()))?;
            append_channel(&mut output, frames);
        }

        let rest = chunks.remainder();
        if !rest.is_empty() {
            let frames = resampler
                .process_partial(Some(&[rest][..]), None)
                .map_err(|e| ResampleError(e.to_string()))?;
            append_channel(&mut output, frames);
        }

        // flush the tail still held inside the filter
        while output.len() < wanted {
            let before = output.len();
            let frames = resampler
                .process_partial::<&[f32]>(None, None)
                .map_err(|e| ResampleError(e.to_string()))?;
            append_channel(&mut output, frames);
            if output.len() == before {
                break;
            }
        }

        output.drain(..delay.min(output.len()));
        output.resize(expected_len, 0.0);

        tracing::trace!(
            from_rate,
            to_rate,
            input = samples.len(),
            output = output.len(),
            delay,
            "Resampled"
        );
        Ok(output)
    }
}

fn append_channel(output: &mut Vec<f32>, frames: Vec<Vec<f32>>) {
    if let Some(channel) = frames.into_iter().next() {
        output.extend(channel);
    }
}
