use serde::{Deserialize, Serialize};

/// Who a narrative line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The ship's AI; also used for system messages such as "Saved.".
    Ai,
    Captain,
    ScienceOfficer,
    MarsCouncil,
}

impl Speaker {
    /// Display name shown above the line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ai => "AI",
            Self::Captain => "Captain rini",
            Self::ScienceOfficer => "Science officer spencer",
            Self::MarsCouncil => "Mars council",
        }
    }

    /// Short styling category for the presentation layer.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Captain => "k",
            Self::ScienceOfficer => "s",
            Self::MarsCouncil => "m",
        }
    }
}

/// A single line in the mission log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl LogEntry {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Speaker::Ai, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_names_and_kinds() {
        assert_eq!(Speaker::Captain.name(), "Captain rini");
        assert_eq!(Speaker::Captain.kind(), "k");
        assert_eq!(Speaker::ScienceOfficer.kind(), "s");
        assert_eq!(Speaker::MarsCouncil.kind(), "m");
        assert_eq!(Speaker::Ai.name(), "AI");
    }

    #[test]
    fn ai_shorthand() {
        let entry = LogEntry::ai("Saved.");
        assert_eq!(entry.speaker, Speaker::Ai);
        assert_eq!(entry.text, "Saved.");
    }
}
