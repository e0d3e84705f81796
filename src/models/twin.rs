use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of nudges carried by a twin state.
pub const MAX_NUDGES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// `> 70` is High, `31..=70` is Moderate, everything else (negatives too) is Low.
    pub fn from_score(score: i32) -> Self {
        if score > 70 {
            RiskLevel::High
        } else if score > 30 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    /// Canned recommendations for the level.
    pub fn nudges(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::Low => &[
                "Great job maintaining your health logging.",
                "Keep hydrated and active today.",
            ],
            RiskLevel::Moderate => &[
                "Consider booking a checkup soon.",
                "Review your recent activity for irregularities.",
            ],
            RiskLevel::High => &[
                "Immediate attention recommended.",
                "Please review your emergency contacts.",
                "Consider sharing your data with a specialist.",
            ],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived risk snapshot of the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalTwinState {
    pub updated_at: DateTime<Utc>,
    pub risk_score: i32,
    pub risk_level: RiskLevel,
    pub key_signals: Vec<String>,
    pub nudges: Vec<String>,
}
