//! Digital twin: a point-count risk score over recent history.
//!
//! Rules are independent and additive, evaluated in this order:
//!
//! | rule                                   | points | signal                              |
//! |----------------------------------------|--------|-------------------------------------|
//! | emergency within 7 days                | +30    | "Recent emergency event detected"   |
//! | newest insert older than 3 days        | +5     | "No activity logged in 3+ days"     |
//! | no appointment/SOAP note within 30 days| +15    | "No checkups in last 30 days"       |
//! | no medications at all                  | +5     | (none)                              |
//! | at least one active medication         | -5     | "Medication adherence active"       |
//!
//! The score is capped at 100. There is no floor unless
//! [`ScoringPolicy::clamp_negative`] is set, so a fully healthy history with
//! an active medication scores -5.

use crate::models::twin::MAX_NUDGES;
use crate::models::{DigitalTwinState, EventKind, MedicationSchedule, RiskLevel, TimelineEvent};
use crate::storage::{KeyValueStore, TWIN_KEY, read_json, write_json};
use chrono::{DateTime, TimeDelta, Utc};

pub const EMERGENCY_POINTS: i32 = 30;
pub const INACTIVITY_POINTS: i32 = 5;
pub const MISSED_CHECKUP_POINTS: i32 = 15;
pub const NO_MEDICATION_POINTS: i32 = 5;
pub const ACTIVE_MEDICATION_POINTS: i32 = -5;
pub const MAX_SCORE: i32 = 100;

pub const SIGNAL_RECENT_EMERGENCY: &str = "Recent emergency event detected";
pub const SIGNAL_INACTIVITY: &str = "No activity logged in 3+ days";
pub const SIGNAL_NO_CHECKUP: &str = "No checkups in last 30 days";
pub const SIGNAL_ADHERENCE_ACTIVE: &str = "Medication adherence active";

const EMERGENCY_WINDOW_DAYS: i64 = 7;
const INACTIVITY_DAYS: i64 = 3;
const CHECKUP_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringPolicy {
    /// Raise negative scores to 0.
    pub clamp_negative: bool,
}

/// Compute the twin from the event list (newest insert first) and medication list.
pub fn compute_twin(
    events: &[TimelineEvent],
    medications: &[MedicationSchedule],
    now: DateTime<Utc>,
    policy: ScoringPolicy,
) -> DigitalTwinState {
    let mut score = 0;
    let mut signals = Vec::new();

    let emergency_window = TimeDelta::days(EMERGENCY_WINDOW_DAYS);
    if events
        .iter()
        .any(|e| e.kind == EventKind::Emergency && e.age(now) <= emergency_window)
    {
        score += EMERGENCY_POINTS;
        signals.push(SIGNAL_RECENT_EMERGENCY.to_string());
    }

    if let Some(latest) = events.first()
        && latest.age(now) > TimeDelta::days(INACTIVITY_DAYS)
    {
        score += INACTIVITY_POINTS;
        signals.push(SIGNAL_INACTIVITY.to_string());
    }

    let checkup_window = TimeDelta::days(CHECKUP_WINDOW_DAYS);
    if !events.is_empty()
        && !events
            .iter()
            .any(|e| e.kind.is_checkup() && e.age(now) <= checkup_window)
    {
        score += MISSED_CHECKUP_POINTS;
        signals.push(SIGNAL_NO_CHECKUP.to_string());
    }

    // Medications present but none active contribute nothing.
    if medications.is_empty() {
        score += NO_MEDICATION_POINTS;
    } else if medications.iter().any(|m| m.active) {
        score += ACTIVE_MEDICATION_POINTS;
        signals.push(SIGNAL_ADHERENCE_ACTIVE.to_string());
    }

    score = score.min(MAX_SCORE);
    if policy.clamp_negative {
        score = score.max(0);
    }

    let level = RiskLevel::from_score(score);
    let nudges = level
        .nudges()
        .iter()
        .take(MAX_NUDGES)
        .map(|s| s.to_string())
        .collect();

    DigitalTwinState {
        updated_at: now,
        risk_score: score,
        risk_level: level,
        key_signals: signals,
        nudges,
    }
}

/// Holds the latest twin state and mirrors it to storage.
pub struct TwinStore<S: KeyValueStore> {
    store: S,
    policy: ScoringPolicy,
    state: Option<DigitalTwinState>,
}

impl<S: KeyValueStore> TwinStore<S> {
    pub fn new(store: S, policy: ScoringPolicy) -> Self {
        Self {
            store,
            policy,
            state: None,
        }
    }

    /// Pick up the persisted twin. On a missing or unreadable value the
    /// current in-memory state is kept.
    pub fn load_twin(&mut self) {
        if let Some(state) = read_json(&self.store, TWIN_KEY) {
            self.state = Some(state);
        }
    }

    /// Recompute, keep in memory and persist. A failed write is logged only.
    pub fn recompute_twin(
        &mut self,
        events: &[TimelineEvent],
        medications: &[MedicationSchedule],
        now: DateTime<Utc>,
    ) -> &DigitalTwinState {
        let state = compute_twin(events, medications, now, self.policy);
        tracing::debug!(
            score = state.risk_score,
            level = %state.risk_level,
            "Digital twin recomputed"
        );

        write_json(&mut self.store, TWIN_KEY, &state);
        self.state.insert(state)
    }

    pub fn current(&self) -> Option<&DigitalTwinState> {
        self.state.as_ref()
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }
}
