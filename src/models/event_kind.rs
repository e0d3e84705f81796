use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of things that can land on the health timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Appointment,
    PlateScan,
    SoapNote,
    Emergency,
    Chat,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Appointment,
        EventKind::PlateScan,
        EventKind::SoapNote,
        EventKind::Emergency,
        EventKind::Chat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Appointment => "appointment",
            EventKind::PlateScan => "plate_scan",
            EventKind::SoapNote => "soap_note",
            EventKind::Emergency => "emergency",
            EventKind::Chat => "chat",
        }
    }

    /// Helper: convert input from CLI (case-insensitive, `-` accepted for `_`)
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == normalized)
    }

    /// Appointments and SOAP notes both count as a checkup.
    pub fn is_checkup(&self) -> bool {
        matches!(self, EventKind::Appointment | EventKind::SoapNote)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
