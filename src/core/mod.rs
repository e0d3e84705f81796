pub mod app;
pub mod backup;
pub mod log;
pub mod medications;
pub mod reminders;
pub mod timeline;
pub mod twin;

pub use app::AppState;
pub use medications::MedicationStore;
pub use reminders::{NoopReminders, ReminderScheduler, SqliteReminders};
pub use timeline::TimelineLog;
pub use twin::{ScoringPolicy, TwinStore, compute_twin};
