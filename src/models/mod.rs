pub mod event_kind;
pub mod event_source;
pub mod medication;
pub mod timeline_event;
pub mod twin;

pub use event_kind::EventKind;
pub use event_source::EventSource;
pub use medication::MedicationSchedule;
pub use timeline_event::TimelineEvent;
pub use twin::{DigitalTwinState, RiskLevel};
