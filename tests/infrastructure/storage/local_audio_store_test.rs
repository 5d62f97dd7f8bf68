use std::io::Cursor;

use vaani::application::ports::{AudioStore, AudioStoreError};
use vaani::domain::{AudioFileName, AudioId, Waveform};
use vaani::infrastructure::storage::{LocalAudioStore, encode_wav_pcm16};

use crate::support::sine;

fn create_test_store() -> (tempfile::TempDir, LocalAudioStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalAudioStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

fn read_pcm(bytes: Vec<u8>) -> (hound::WavSpec, Vec<f32>) {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    let samples = reader
        .samples::<i16>()
        .map(|s| s.unwrap() as f32 / 32768.0)
        .collect();
    (spec, samples)
}

#[tokio::test]
async fn given_waveform_when_writing_then_reading_back_matches_within_quantization() {
    let (_dir, store) = create_test_store();
    let waveform = sine(22_050, 0.5, 0.8);
    let id = AudioId::new();

    let file = store.write(&id, &waveform).await.unwrap();
    let bytes = store.fetch(&file.file_name).await.unwrap();
    let (spec, samples) = read_pcm(bytes);

    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_rate, 22_050);
    assert_eq!(samples.len(), waveform.len());
    for (got, want) in samples.iter().zip(&waveform.samples) {
        assert!((got - want).abs() <= 1.0 / 32768.0 + 1e-6);
    }
}

#[tokio::test]
async fn given_write_when_finished_then_metadata_matches_file_on_disk() {
    let (dir, store) = create_test_store();
    let waveform = Waveform::new(vec![0.1; 8_000], 16_000);
    let id = AudioId::new();

    let file = store.write(&id, &waveform).await.unwrap();

    assert_eq!(file.file_name, AudioFileName::for_id(&id));
    assert_eq!(file.path, dir.path().join(file.file_name.as_str()));
    assert_eq!(file.sample_rate, 16_000);
    assert_eq!(file.duration_secs, 0.5);
    assert_eq!(file.byte_size, std::fs::metadata(&file.path).unwrap().len());
    assert_eq!(file.byte_size, 44 + 8_000 * 2);
}

#[tokio::test]
async fn given_two_writes_when_fetching_latest_then_returns_most_recent() {
    let (_dir, store) = create_test_store();
    let first = store
        .write(&AudioId::new(), &Waveform::new(vec![0.1; 100], 16_000))
        .await
        .unwrap();
    let second = store
        .write(&AudioId::new(), &Waveform::new(vec![0.2; 200], 16_000))
        .await
        .unwrap();

    let latest = store.fetch(&AudioFileName::latest()).await.unwrap();

    assert_ne!(first.file_name, second.file_name);
    assert_eq!(latest, store.fetch(&second.file_name).await.unwrap());
    assert_eq!(latest.len() as u64, second.byte_size);
}

#[tokio::test]
async fn given_missing_file_when_fetching_then_returns_not_found() {
    let (_dir, store) = create_test_store();

    let result = store
        .fetch(&AudioFileName::parse("nonexistent.wav").unwrap())
        .await;

    assert!(matches!(result, Err(AudioStoreError::NotFound(_))));
}

#[test]
fn given_out_of_range_samples_when_encoding_then_clamped_to_pcm16_limits() {
    let waveform = Waveform::new(vec![2.0, -2.0, 1.0, -1.0], 8_000);

    let (_, samples) = read_pcm(encode_wav_pcm16(&waveform).unwrap());

    assert_eq!(samples, vec![32767.0 / 32768.0, -1.0, 32767.0 / 32768.0, -1.0]);
}

#[test]
fn given_nested_missing_directory_when_creating_store_then_creates_it() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path().join("a").join("b");

    let store = LocalAudioStore::new(root.clone()).unwrap();

    assert!(root.is_dir());
    assert_eq!(store.root(), &root);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_overlapping_writes_when_done_then_latest_alias_matches_newest_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = std::sync::Arc::new(LocalAudioStore::new(dir.path().to_path_buf()).unwrap());

    let handles: Vec<_> = (1..=8)
        .map(|i| {
            let store = std::sync::Arc::clone(&store);
            tokio::spawn(async move {
                let waveform = sine(16_000, 0.05 * i as f32, 0.5);
                store.write(&AudioId::new(), &waveform).await.unwrap()
            })
        })
        .collect();

    let mut files = Vec::new();
    for handle in handles {
        files.push(handle.await.unwrap());
    }

    let newest = files
        .iter()
        .map(|f| std::fs::metadata(&f.path).unwrap().modified().unwrap())
        .max()
        .unwrap();
    let latest = std::fs::read(dir.path().join("output.wav")).unwrap();
    let matches_newest = files.iter().any(|f| {
        std::fs::metadata(&f.path).unwrap().modified().unwrap() == newest
            && std::fs::read(&f.path).unwrap() == latest
    });
    assert!(matches_newest, "output.wav is not the newest synthesis");
}
