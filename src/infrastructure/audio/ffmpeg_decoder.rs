use std::io::{Read, Write};
use std::process::{Child, Command, Stdio};

use crate::application::ports::{AudioDecoder, AudioDecoderError};
use crate::domain::Waveform;

const FFMPEG_BINARY: &str = "ffmpeg";
const OUTPUT_SAMPLE_RATE: u32 = 16_000;

/// Last-resort reader: pipes the bytes through the `ffmpeg` binary as 16 kHz mono s16le.
pub struct FfmpegAudioDecoder;

pub fn check_ffmpeg_binary() -> Result<(), AudioDecoderError> {
    let output = Command::new(FFMPEG_BINARY)
        .arg("-version")
        .output()
        .map_err(|e| AudioDecoderError::Unavailable(format!("ffmpeg not found: {}", e)))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(AudioDecoderError::Unavailable(format!(
            "ffmpeg -version exited with {}",
            output.status
        )))
    }
}

impl AudioDecoder for FfmpegAudioDecoder {
    fn name(&self) -> &'static str {
        "ffmpeg"
    }

    fn decode(&self, data: &[u8]) -> Result<Waveform, AudioDecoderError> {
        if data.is_empty() {
            return Err(AudioDecoderError::DecodingFailed("empty input".to_string()));
        }

        let rate = OUTPUT_SAMPLE_RATE.to_string();
        let mut child = Command::new(FFMPEG_BINARY)
            .args([
                "-hide_banner",
                "-loglevel",
                "error",
                "-i",
                "pipe:0",
                "-f",
                "s16le",
                "-acodec",
                "pcm_s16le",
                "-ac",
                "1",
                "-ar",
                rate.as_str(),
                "pipe:1",
            ])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AudioDecoderError::Unavailable(format!("spawn ffmpeg: {}", e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| AudioDecoderError::DecodingFailed("ffmpeg stdin closed".to_string()))?;
        let input = data.to_vec();
        // stdout must be drained while stdin is still being fed
        let writer = std::thread::spawn(move || {
            // ffmpeg may exit early on garbage input; the broken pipe shows up in its exit status
            let _ = stdin.write_all(&input);
        });

        let read = match child.stdout.take() {
            Some(stdout) => drain_child_output(&mut child, stdout),
            None => Ok(Vec::new()),
        };
        let _ = writer.join();
        let raw = read?;

        let output = child
            .wait_with_output()
            .map_err(|e| AudioDecoderError::DecodingFailed(format!("wait ffmpeg: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AudioDecoderError::DecodingFailed(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let pcm: Vec<i16> = raw
            .chunks_exact(2)
            .map(|b| i16::from_le_bytes([b[0], b[1]]))
            .collect();

        if pcm.is_empty() {
            return Err(AudioDecoderError::DecodingFailed(
                "ffmpeg produced no samples".to_string(),
            ));
        }

        Ok(Waveform::from_pcm16(&pcm, OUTPUT_SAMPLE_RATE))
    }
}

/// Reads `stdout` to the end; on failure the child is killed and reaped.
pub fn drain_child_output<R: Read>(
    child: &mut Child,
    mut stdout: R,
) -> Result<Vec<u8>, AudioDecoderError> {
    let mut raw = Vec::new();
    if let Err(e) = stdout.read_to_end(&mut raw) {
        let _ = child.kill();
        let _ = child.wait();
        return Err(AudioDecoderError::DecodingFailed(format!(
            "read ffmpeg: {}",
            e
        )));
    }
    Ok(raw)
}
