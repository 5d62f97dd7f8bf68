use std::fmt;

use serde::{Deserialize, Serialize};

/// Weight precision requested from the inference server at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Float16,
    Float32,
}

impl Precision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Float16 => "float16",
            Precision::Float32 => "float32",
        }
    }

    /// Lower-memory mode first, default precision as the fallback.
    pub fn fallback_order() -> Vec<Precision> {
        vec![Precision::Float16, Precision::Float32]
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
