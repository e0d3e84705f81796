use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A medication with its daily dose times and today's adherence flag.
///
/// Field names are persisted in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationSchedule {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// `HH:MM` local times, one per scheduled dose.
    pub times: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_today: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_taken: Option<DateTime<Utc>>,
}

impl MedicationSchedule {
    pub fn new(
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
        times: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            times,
            created_at: Utc::now(),
            active: true,
            taken_today: None,
            last_taken: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn is_taken_today(&self) -> bool {
        self.taken_today.unwrap_or(false)
    }
}
