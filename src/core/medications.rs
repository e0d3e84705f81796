//! Medication schedules with a per-day "taken" flag.
//!
//! Nothing here rolls the day over: `reset_daily_adherence` must be called by
//! whoever detects a new day. Loading does not reset `taken_today` either.

use crate::core::reminders::ReminderScheduler;
use crate::errors::{AppError, AppResult};
use crate::models::MedicationSchedule;
use crate::storage::{KeyValueStore, MEDICATIONS_KEY, read_json, write_json};
use crate::utils::time::validate_times;
use chrono::Utc;

pub struct MedicationStore<S: KeyValueStore, R: ReminderScheduler> {
    store: S,
    reminders: R,
    medications: Vec<MedicationSchedule>,
}

impl<S: KeyValueStore, R: ReminderScheduler> MedicationStore<S, R> {
    pub fn new(store: S, reminders: R) -> Self {
        Self {
            store,
            reminders,
            medications: Vec::new(),
        }
    }

    /// Replace the in-memory list with what storage holds.
    pub fn load_medications(&mut self) {
        self.medications = read_json(&self.store, MEDICATIONS_KEY).unwrap_or_default();
        tracing::debug!(count = self.medications.len(), "Medications loaded");
    }

    /// Append `med`, persist, then schedule its reminders.
    pub fn add_medication(&mut self, med: MedicationSchedule) -> AppResult<()> {
        if self.get(&med.id).is_some() {
            return Err(AppError::DuplicateMedication(med.id));
        }
        validate_times(&med.times)?;

        self.medications.push(med);
        self.persist();

        if let Some(added) = self.medications.last()
            && added.active
        {
            schedule_quietly(&mut self.reminders, added);
        }
        Ok(())
    }

    /// Drop the medication, persist, then cancel its reminders.
    pub fn remove_medication(&mut self, id: &str) -> AppResult<MedicationSchedule> {
        let idx = self.index_of(id)?;
        let removed = self.medications.remove(idx);
        self.persist();
        cancel_quietly(&mut self.reminders, id);
        Ok(removed)
    }

    /// Flip `taken_today`. Turning it on stamps `last_taken`; turning it off
    /// leaves the previous stamp in place. Returns the new flag.
    pub fn toggle_taken(&mut self, id: &str) -> AppResult<bool> {
        let idx = self.index_of(id)?;
        let med = &mut self.medications[idx];

        let now_taken = !med.is_taken_today();
        med.taken_today = Some(now_taken);
        if now_taken {
            med.last_taken = Some(Utc::now());
        }

        self.persist();
        Ok(now_taken)
    }

    /// Mark every medication as not taken today.
    pub fn reset_daily_adherence(&mut self) {
        for med in &mut self.medications {
            med.taken_today = Some(false);
        }
        self.persist();
    }

    /// Activate or deactivate; reminders follow the flag.
    pub fn set_active(&mut self, id: &str, active: bool) -> AppResult<()> {
        let idx = self.index_of(id)?;
        if self.medications[idx].active == active {
            return Ok(());
        }

        self.medications[idx].active = active;
        self.persist();

        if active {
            schedule_quietly(&mut self.reminders, &self.medications[idx]);
        } else {
            cancel_quietly(&mut self.reminders, id);
        }
        Ok(())
    }

    pub fn medications(&self) -> &[MedicationSchedule] {
        &self.medications
    }

    pub fn active(&self) -> impl Iterator<Item = &MedicationSchedule> {
        self.medications.iter().filter(|m| m.active)
    }

    pub fn get(&self, id: &str) -> Option<&MedicationSchedule> {
        self.medications.iter().find(|m| m.id == id)
    }

    pub fn reminders(&self) -> &R {
        &self.reminders
    }

    fn index_of(&self, id: &str) -> AppResult<usize> {
        self.medications
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| AppError::MedicationNotFound(id.to_string()))
    }

    fn persist(&mut self) {
        write_json(&mut self.store, MEDICATIONS_KEY, &self.medications);
    }
}

fn schedule_quietly<R: ReminderScheduler>(reminders: &mut R, med: &MedicationSchedule) {
    match reminders.schedule(med) {
        Ok(n) => tracing::debug!(medication = %med.id, scheduled = n, "Reminders scheduled"),
        Err(e) => tracing::error!(medication = %med.id, "Failed to schedule reminders: {e}"),
    }
}

fn cancel_quietly<R: ReminderScheduler>(reminders: &mut R, id: &str) {
    match reminders.cancel(id) {
        Ok(n) => tracing::debug!(medication = id, cancelled = n, "Reminders cancelled"),
        Err(e) => tracing::error!(medication = id, "Failed to cancel reminders: {e}"),
    }
}
