pub trait Resampler: Send + Sync {
    fn resample(&self, samples: &[f32], from_rate: u32, to_rate: u32)
    -> Result<Vec<f32>, ResampleError>;
}

#[derive(Debug, thiserror::Error)]
#[error("resampling failed: {0}")]
pub struct ResampleError(pub String);
