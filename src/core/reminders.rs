//! Reminder scheduling collaborator of the medication store.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::{ReminderRow, delete_reminders, insert_reminders, load_reminders};
use crate::errors::AppResult;
use crate::models::MedicationSchedule;

pub trait ReminderScheduler {
    /// Schedule one daily reminder per entry in `med.times`. Returns how many were scheduled.
    fn schedule(&mut self, med: &MedicationSchedule) -> AppResult<usize>;

    /// Cancel every reminder of the medication. Returns how many were cancelled.
    fn cancel(&mut self, medication_id: &str) -> AppResult<usize>;
}

/// Discards every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReminders;

impl ReminderScheduler for NoopReminders {
    fn schedule(&mut self, _med: &MedicationSchedule) -> AppResult<usize> {
        Ok(0)
    }

    fn cancel(&mut self, _medication_id: &str) -> AppResult<usize> {
        Ok(0)
    }
}

/// Reminders kept in the `reminders` table.
pub struct SqliteReminders {
    pool: DbPool,
}

impl SqliteReminders {
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        init_db(&pool.conn)?;
        Ok(Self { pool })
    }

    pub fn list(&self) -> AppResult<Vec<ReminderRow>> {
        load_reminders(&self.pool.conn)
    }
}

impl ReminderScheduler for SqliteReminders {
    fn schedule(&mut self, med: &MedicationSchedule) -> AppResult<usize> {
        // Re-scheduling replaces, never duplicates.
        delete_reminders(&self.pool.conn, &med.id)?;
        insert_reminders(&mut self.pool.conn, &med.id, &med.name, &med.times)
    }

    fn cancel(&mut self, medication_id: &str) -> AppResult<usize> {
        delete_reminders(&self.pool.conn, medication_id)
    }
}
