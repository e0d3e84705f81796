use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance tag of a timeline event. Not used in scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Chat,
    Voice,
    System,
    #[default]
    Manual,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventSource::Chat => "chat",
            EventSource::Voice => "voice",
            EventSource::System => "system",
            EventSource::Manual => "manual",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "chat" => Some(EventSource::Chat),
            "voice" => Some(EventSource::Voice),
            "system" => Some(EventSource::System),
            "manual" => Some(EventSource::Manual),
            _ => None,
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
