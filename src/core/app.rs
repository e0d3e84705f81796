//! Composition root: the three stores wired to their storage and collaborators.

use crate::config::Config;
use crate::core::medications::MedicationStore;
use crate::core::reminders::{ReminderScheduler, SqliteReminders};
use crate::core::timeline::TimelineLog;
use crate::core::twin::{ScoringPolicy, TwinStore};
use crate::errors::AppResult;
use crate::models::DigitalTwinState;
use crate::storage::{KeyValueStore, SqliteStore};
use chrono::{DateTime, Utc};

pub struct AppState<S: KeyValueStore, R: ReminderScheduler> {
    pub timeline: TimelineLog<S>,
    pub medications: MedicationStore<S, R>,
    pub twin: TwinStore<S>,
}

impl AppState<SqliteStore, SqliteReminders> {
    /// Open every store against the configured database and load persisted state.
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let mut state = Self::from_parts(
            SqliteStore::open(&cfg.database)?,
            SqliteStore::open(&cfg.database)?,
            SqliteStore::open(&cfg.database)?,
            SqliteReminders::open(&cfg.database)?,
            cfg.scoring_policy(),
        );
        state.load_all();
        Ok(state)
    }
}

impl<S: KeyValueStore + Clone, R: ReminderScheduler> AppState<S, R> {
    /// Build every store on clones of one shared storage handle. Nothing is loaded.
    pub fn with_store(store: S, reminders: R, policy: ScoringPolicy) -> Self {
        Self::from_parts(store.clone(), store.clone(), store, reminders, policy)
    }
}

impl<S: KeyValueStore, R: ReminderScheduler> AppState<S, R> {
    pub fn from_parts(
        timeline_store: S,
        medication_store: S,
        twin_store: S,
        reminders: R,
        policy: ScoringPolicy,
    ) -> Self {
        Self {
            timeline: TimelineLog::new(timeline_store),
            medications: MedicationStore::new(medication_store, reminders),
            twin: TwinStore::new(twin_store, policy),
        }
    }

    pub fn load_all(&mut self) {
        self.timeline.load_events();
        self.medications.load_medications();
        self.twin.load_twin();
    }

    /// Recompute the twin from the current events and medications.
    pub fn recompute_twin(&mut self) -> &DigitalTwinState {
        self.recompute_twin_at(Utc::now())
    }

    pub fn recompute_twin_at(&mut self, now: DateTime<Utc>) -> &DigitalTwinState {
        self.twin.recompute_twin(
            self.timeline.events(),
            self.medications.medications(),
            now,
        )
    }
}
