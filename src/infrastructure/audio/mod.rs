mod ffmpeg_decoder;
mod rubato_resampler;
mod symphonia_decoder;
mod wav_decoder;

use std::sync::Arc;

use crate::application::ports::AudioDecoder;
use crate::application::services::AudioDecoderChain;

pub use ffmpeg_decoder::{FfmpegAudioDecoder, check_ffmpeg_binary, drain_child_output};
pub use rubato_resampler::{RubatoResampler, resampled_len};
pub use symphonia_decoder::SymphoniaDecoder;
pub use wav_decoder::WavContainerDecoder;

/// symphonia, then the plain WAV reader, then ffmpeg when enabled and installed.
pub fn default_decoder_chain(ffmpeg_fallback: bool) -> AudioDecoderChain {
    let mut decoders: Vec<Arc<dyn AudioDecoder>> =
        vec![Arc::new(SymphoniaDecoder), Arc::new(WavContainerDecoder)];

    if ffmpeg_fallback {
        match check_ffmpeg_binary() {
            Ok(()) => decoders.push(Arc::new(FfmpegAudioDecoder)),
            Err(e) => tracing::warn!(error = %e, "ffmpeg fallback disabled"),
        }
    }

    let chain = AudioDecoderChain::new(decoders);
    tracing::info!(decoders = ?chain.decoder_names(), "Audio decoder chain ready");
    chain
}

/// Averages interleaved frames down to one channel.
pub(crate) fn downmix_interleaved(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}
