use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputModality {
    Text,
    Speech,
}

impl OutputModality {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputModality::Text => "text",
            OutputModality::Speech => "speech",
        }
    }
}

impl fmt::Display for OutputModality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
