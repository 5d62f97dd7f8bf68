use std::fmt;
use std::path::PathBuf;

use uuid::Uuid;

const WAV_EXTENSION: &str = ".wav";
const LATEST_FILE_NAME: &str = "output.wav";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AudioId(Uuid);

impl AudioId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AudioId {
    fn default() -> Self {
        Self::new()
    }
}

/// A bare `.wav` file name inside the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioFileName(String);

impl AudioFileName {
    pub fn for_id(id: &AudioId) -> Self {
        Self(format!("{}{}", id.as_uuid(), WAV_EXTENSION))
    }

    /// The "most recent synthesis" alias.
    pub fn latest() -> Self {
        Self(LATEST_FILE_NAME.to_string())
    }

    /// Accepts only plain file names, so lookups never leave the output directory.
    pub fn parse(name: &str) -> Option<Self> {
        let stem = name.strip_suffix(WAV_EXTENSION)?;
        let valid = !stem.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !name.contains("..");

        valid.then(|| Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AudioFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputAudioFile {
    pub file_name: AudioFileName,
    pub path: PathBuf,
    pub sample_rate: u32,
    pub duration_secs: f64,
    pub byte_size: u64,
}
