use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use hound::{SampleFormat, WavSpec, WavWriter};
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};
use tokio::sync::Mutex;

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::{AudioFileName, AudioId, OutputAudioFile, Waveform};

/// Writes one WAV per synthesis and keeps `output.wav` pointing at the newest one.
pub struct LocalAudioStore {
    inner: Arc<LocalFileSystem>,
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalAudioStore {
    pub fn new(root: PathBuf) -> Result<Self, AudioStoreError> {
        std::fs::create_dir_all(&root)?;
        let fs = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait::async_trait]
impl AudioStore for LocalAudioStore {
    #[tracing::instrument(skip(self, waveform), fields(audio_id = %id.as_uuid()))]
    async fn write(
        &self,
        id: &AudioId,
        waveform: &Waveform,
    ) -> Result<OutputAudioFile, AudioStoreError> {
        let encoded = encode_wav_pcm16(waveform)?;
        let file_name = AudioFileName::for_id(id);
        let store_path = StorePath::from(file_name.as_str());
        let latest = StorePath::from(AudioFileName::latest().as_str());

        // one writer at a time, so the alias always ends on the newest file
        let _guard = self.write_lock.lock().await;

        self.inner
            .put(&store_path, PutPayload::from(encoded.clone()))
            .await
            .map_err(|e| AudioStoreError::WriteFailed(e.to_string()))?;

        let meta = self
            .inner
            .head(&store_path)
            .await
            .map_err(|e| AudioStoreError::WriteFailed(format!("stat: {}", e)))?;

        self.inner
            .put(&latest, PutPayload::from(encoded))
            .await
            .map_err(|e| AudioStoreError::WriteFailed(format!("latest alias: {}", e)))?;

        tracing::debug!(file = %file_name, bytes = meta.size, "Audio file written");

        Ok(OutputAudioFile {
            path: self.root.join(file_name.as_str()),
            file_name,
            sample_rate: waveform.sample_rate,
            duration_secs: waveform.duration_secs(),
            byte_size: meta.size as u64,
        })
    }

    async fn fetch(&self, name: &AudioFileName) -> Result<Vec<u8>, AudioStoreError> {
        let store_path = StorePath::from(name.as_str());
        let result = self.inner.get(&store_path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => AudioStoreError::NotFound(name.to_string()),
            other => AudioStoreError::ReadFailed(other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| AudioStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Mono 16-bit PCM WAV; samples are clamped to [-1, 1] and scaled by 32768.
pub fn encode_wav_pcm16(waveform: &Waveform) -> Result<Vec<u8>, AudioStoreError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::with_capacity(44 + waveform.len() * 2));
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| AudioStoreError::EncodingFailed(e.to_string()))?;
        for &sample in &waveform.samples {
            let value = (sample.clamp(-1.0, 1.0) * 32768.0)
                .round()
                .clamp(i16::MIN as f32, i16::MAX as f32) as i16;
            writer
                .write_sample(value)
                .map_err(|e| AudioStoreError::EncodingFailed(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| AudioStoreError::EncodingFailed(e.to_string()))?;
    }

    Ok(cursor.into_inner())
}
