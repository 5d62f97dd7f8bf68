use std::sync::Arc;

use crate::application::ports::Resampler;
use crate::domain::Waveform;

pub const TARGET_PEAK: f32 = 0.95;
pub const MIN_DURATION_SECS: f64 = 0.5;
const PEAK_TOLERANCE: f32 = 1e-6;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWaveform {
    pub waveform: Waveform,
    pub warnings: Vec<String>,
}

/// Peak normalization plus optional resampling and clipping for model input.
pub struct WaveformNormalizer {
    resampler: Arc<dyn Resampler>,
    model_sample_rate: u32,
    max_duration_secs: Option<f64>,
    min_duration_secs: f64,
}

impl WaveformNormalizer {
    pub fn new(
        resampler: Arc<dyn Resampler>,
        model_sample_rate: u32,
        max_duration_secs: Option<f64>,
    ) -> Self {
        Self {
            resampler,
            model_sample_rate,
            max_duration_secs,
            min_duration_secs: MIN_DURATION_SECS,
        }
    }

    pub fn with_min_duration(mut self, min_duration_secs: f64) -> Self {
        self.min_duration_secs = min_duration_secs;
        self
    }

    pub fn model_sample_rate(&self) -> u32 {
        self.model_sample_rate
    }

    /// Rescales so the peak magnitude is `TARGET_PEAK`. Silence is returned untouched.
    pub fn normalize(&self, waveform: Waveform) -> NormalizedWaveform {
        let waveform = normalize_peak(waveform);
        let mut warnings = Vec::new();

        let duration = waveform.duration_secs();
        if duration < self.min_duration_secs {
            tracing::warn!(
                duration_secs = duration,
                min_duration_secs = self.min_duration_secs,
                "Audio shorter than expected, upstream synthesis may have been truncated"
            );
            warnings.push(format!(
                "audio duration {:.3}s is below {:.1}s",
                duration, self.min_duration_secs
            ));
        }

        NormalizedWaveform { waveform, warnings }
    }

    /// Brings decoded input to the model's rate and length, then normalizes it.
    pub fn prepare_model_input(&self, waveform: Waveform) -> NormalizedWaveform {
        let mut waveform = waveform;
        let mut warnings = Vec::new();

        if waveform.sample_rate != self.model_sample_rate && !waveform.is_empty() {
            match self.resampler.resample(
                &waveform.samples,
                waveform.sample_rate,
                self.model_sample_rate,
            ) {
                Ok(samples) => {
                    tracing::debug!(
                        from_rate = waveform.sample_rate,
                        to_rate = self.model_sample_rate,
                        samples = samples.len(),
                        "Resampled model input"
                    );
                    waveform = Waveform::new(samples, self.model_sample_rate);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Resampling failed, keeping source sample rate");
                    warnings.push(e.to_string());
                }
            }
        }

        if let Some(max_secs) = self.max_duration_secs {
            let max_samples = (max_secs * waveform.sample_rate as f64) as usize;
            if waveform.len() > max_samples {
                tracing::info!(
                    duration_secs = waveform.duration_secs(),
                    max_duration_secs = max_secs,
                    "Clipping model input"
                );
                waveform.samples.truncate(max_samples);
                warnings.push(format!("input clipped to {:.1}s", max_secs));
            }
        }

        let mut normalized = self.normalize(waveform);
        warnings.append(&mut normalized.warnings);
        normalized.warnings = warnings;
        normalized
    }
}

/// Peak normalization on its own; idempotent because an input already at the
/// target peak is returned unchanged.
pub fn normalize_peak(mut waveform: Waveform) -> Waveform {
    let mut peak = waveform.peak();
    if peak == 0.0 || !peak.is_finite() {
        return waveform;
    }

    // raw PCM range, bring into [-1, 1] first
    if peak > 1.0 {
        for sample in &mut waveform.samples {
            *sample /= peak;
        }
        peak = waveform.peak();
    }

    if (peak - TARGET_PEAK).abs() <= PEAK_TOLERANCE {
        return waveform;
    }

    let gain = TARGET_PEAK / peak;
    for sample in &mut waveform.samples {
        *sample *= gain;
    }
    waveform
}
