use chrono::{Duration, Utc};
use healthtwin::core::twin::ScoringPolicy;
use healthtwin::core::{AppState, MedicationStore, NoopReminders, ReminderScheduler, TimelineLog, TwinStore};
use healthtwin::errors::{AppError, AppResult};
use healthtwin::models::{EventKind, EventSource, MedicationSchedule, RiskLevel, TimelineEvent};
use healthtwin::storage::{MEDICATIONS_KEY, MemoryStore, TIMELINE_KEY, TWIN_KEY};

/// Scheduler that remembers every request.
#[derive(Default)]
struct RecordingReminders {
    scheduled: Vec<(String, usize)>,
    cancelled: Vec<String>,
    fail: bool,
}

impl ReminderScheduler for RecordingReminders {
    fn schedule(&mut self, med: &MedicationSchedule) -> AppResult<usize> {
        if self.fail {
            return Err(AppError::Other("scheduler down".into()));
        }
        self.scheduled.push((med.id.clone(), med.times.len()));
        Ok(med.times.len())
    }

    fn cancel(&mut self, medication_id: &str) -> AppResult<usize> {
        if self.fail {
            return Err(AppError::Other("scheduler down".into()));
        }
        self.cancelled.push(medication_id.to_string());
        Ok(1)
    }
}

fn metformin(id: &str) -> MedicationSchedule {
    MedicationSchedule::new(
        "Metformin",
        "500mg",
        "twice daily",
        vec!["08:00".into(), "20:00".into()],
    )
    .with_id(id)
}

#[test]
fn timeline_prepends_and_survives_reload() {
    let store = MemoryStore::new();
    let mut log = TimelineLog::new(store.clone());
    log.load_events();
    assert!(log.is_empty());

    log.add_event(TimelineEvent::new(EventKind::Chat, "first").with_id("1"))
        .unwrap();
    log.add_event(
        TimelineEvent::new(EventKind::Appointment, "second")
            .with_id("2")
            .with_summary("annual visit")
            .with_source(EventSource::Voice),
    )
    .unwrap();

    let recent = log.get_recent_events(1);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, "2");

    let mut reloaded = TimelineLog::new(store);
    reloaded.load_events();
    let ids: Vec<&str> = reloaded.events().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
    assert_eq!(reloaded.events()[0], log.events()[0]);
    assert_eq!(reloaded.get_recent_events(10).len(), 2);
}

#[test]
fn timeline_keeps_insertion_order_not_timestamp_order() {
    let mut log = TimelineLog::new(MemoryStore::new());
    let now = Utc::now();

    log.add_event(TimelineEvent::new(EventKind::Chat, "new").with_id("new").at(now))
        .unwrap();
    log.add_event(
        TimelineEvent::new(EventKind::Chat, "backfilled")
            .with_id("old")
            .at(now - Duration::days(20)),
    )
    .unwrap();

    assert_eq!(log.events()[0].id, "old");
}

#[test]
fn timeline_rejects_duplicate_ids() {
    let mut log = TimelineLog::new(MemoryStore::new());
    log.add_event(TimelineEvent::new(EventKind::Chat, "a").with_id("dup"))
        .unwrap();

    let err = log
        .add_event(TimelineEvent::new(EventKind::Emergency, "b").with_id("dup"))
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateEvent(id) if id == "dup"));
    assert_eq!(log.len(), 1);
}

#[test]
fn timeline_filters_by_kind() {
    let mut log = TimelineLog::new(MemoryStore::new());
    for (id, kind) in [
        ("1", EventKind::Chat),
        ("2", EventKind::Emergency),
        ("3", EventKind::Chat),
    ] {
        log.add_event(TimelineEvent::new(kind, id).with_id(id)).unwrap();
    }

    let chats: Vec<String> = log
        .events_of_kind(EventKind::Chat)
        .into_iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(chats, ["3", "1"]);
}

#[test]
fn failed_write_keeps_event_in_memory() {
    let store = MemoryStore::new();
    let mut log = TimelineLog::new(store.clone());

    store.set_fail_writes(true);
    log.add_event(TimelineEvent::new(EventKind::Chat, "unsaved").with_id("x"))
        .unwrap();

    assert_eq!(log.len(), 1);
    assert_eq!(store.raw(TIMELINE_KEY), None);
}

#[test]
fn failed_read_and_malformed_data_load_as_empty() {
    let store = MemoryStore::new();
    store.put_raw(TIMELINE_KEY, "{not json");
    store.put_raw(MEDICATIONS_KEY, "[{\"id\": 1}]");

    let mut log = TimelineLog::new(store.clone());
    log.load_events();
    assert!(log.is_empty());

    let mut meds = MedicationStore::new(store.clone(), NoopReminders);
    meds.load_medications();
    assert!(meds.medications().is_empty());

    store.put_raw(TIMELINE_KEY, "[]");
    store.set_fail_reads(true);
    log.load_events();
    assert!(log.is_empty());
}

#[test]
fn medication_round_trip_and_removal() {
    let store = MemoryStore::new();
    let mut meds = MedicationStore::new(store.clone(), RecordingReminders::default());
    meds.add_medication(metformin("m1")).unwrap();

    let mut reopened = MedicationStore::new(store.clone(), NoopReminders);
    reopened.load_medications();
    assert_eq!(reopened.medications(), meds.medications());
    assert_eq!(reopened.get("m1").unwrap().times, ["08:00", "20:00"]);

    let removed = meds.remove_medication("m1").unwrap();
    assert_eq!(removed.name, "Metformin");

    let mut reopened = MedicationStore::new(store, NoopReminders);
    reopened.load_medications();
    assert!(reopened.get("m1").is_none());

    assert_eq!(meds.reminders().scheduled, [("m1".to_string(), 2)]);
    assert_eq!(meds.reminders().cancelled, ["m1"]);
}

#[test]
fn inactive_medication_gets_no_reminders_until_activated() {
    let mut meds = MedicationStore::new(MemoryStore::new(), RecordingReminders::default());
    meds.add_medication(metformin("m1").inactive()).unwrap();
    assert!(meds.reminders().scheduled.is_empty());

    meds.set_active("m1", true).unwrap();
    assert_eq!(meds.reminders().scheduled.len(), 1);
    assert_eq!(meds.active().count(), 1);

    meds.set_active("m1", false).unwrap();
    assert_eq!(meds.reminders().cancelled, ["m1"]);
    assert_eq!(meds.active().count(), 0);
}

#[test]
fn scheduler_failure_does_not_block_the_mutation() {
    let reminders = RecordingReminders {
        fail: true,
        ..Default::default()
    };
    let mut meds = MedicationStore::new(MemoryStore::new(), reminders);

    meds.add_medication(metformin("m1")).unwrap();
    meds.remove_medication("m1").unwrap();
    assert!(meds.medications().is_empty());
}

#[test]
fn invalid_dose_time_rejects_medication() {
    let mut meds = MedicationStore::new(MemoryStore::new(), RecordingReminders::default());
    let bad = MedicationSchedule::new("X", "1", "daily", vec!["8am".into()]).with_id("bad");

    let err = meds.add_medication(bad).unwrap_err();
    assert!(matches!(err, AppError::InvalidTime(t) if t == "8am"));
    assert!(meds.medications().is_empty());
    assert!(meds.reminders().scheduled.is_empty());
}

#[test]
fn toggle_taken_stamps_only_when_turning_on() {
    let mut meds = MedicationStore::new(MemoryStore::new(), NoopReminders);
    meds.add_medication(metformin("m1")).unwrap();
    assert!(!meds.get("m1").unwrap().is_taken_today());

    assert!(meds.toggle_taken("m1").unwrap());
    let stamp = meds.get("m1").unwrap().last_taken;
    assert!(stamp.is_some());

    assert!(!meds.toggle_taken("m1").unwrap());
    let med = meds.get("m1").unwrap();
    assert_eq!(med.taken_today, Some(false));
    assert_eq!(med.last_taken, stamp);
}

#[test]
fn unknown_medication_ids_are_reported() {
    let mut meds = MedicationStore::new(MemoryStore::new(), NoopReminders);
    assert!(matches!(
        meds.toggle_taken("ghost"),
        Err(AppError::MedicationNotFound(_))
    ));
    assert!(matches!(
        meds.remove_medication("ghost"),
        Err(AppError::MedicationNotFound(_))
    ));
    assert!(matches!(
        meds.set_active("ghost", true),
        Err(AppError::MedicationNotFound(_))
    ));
}

#[test]
fn duplicate_medication_is_rejected() {
    let mut meds = MedicationStore::new(MemoryStore::new(), NoopReminders);
    meds.add_medication(metformin("m1")).unwrap();
    assert!(matches!(
        meds.add_medication(metformin("m1")),
        Err(AppError::DuplicateMedication(_))
    ));
}

#[test]
fn reset_daily_adherence_clears_every_flag_and_persists() {
    let store = MemoryStore::new();
    let mut meds = MedicationStore::new(store.clone(), NoopReminders);
    meds.add_medication(metformin("m1")).unwrap();
    meds.add_medication(metformin("m2")).unwrap();
    meds.toggle_taken("m1").unwrap();
    meds.toggle_taken("m2").unwrap();

    meds.reset_daily_adherence();

    let mut reopened = MedicationStore::new(store, NoopReminders);
    reopened.load_medications();
    assert!(reopened.medications().iter().all(|m| !m.is_taken_today()));
    assert!(reopened.medications().iter().all(|m| m.last_taken.is_some()));
}

#[test]
fn loading_does_not_reset_adherence() {
    let store = MemoryStore::new();
    let mut meds = MedicationStore::new(store.clone(), NoopReminders);
    meds.add_medication(metformin("m1")).unwrap();
    meds.toggle_taken("m1").unwrap();

    let mut reopened = MedicationStore::new(store, NoopReminders);
    reopened.load_medications();
    assert!(reopened.get("m1").unwrap().is_taken_today());
}

#[test]
fn twin_is_persisted_and_reloaded() {
    let store = MemoryStore::new();
    let mut twin = TwinStore::new(store.clone(), ScoringPolicy::default());
    assert!(twin.current().is_none());

    let computed = twin.recompute_twin(&[], &[], Utc::now()).clone();
    assert_eq!(computed.risk_score, 5);

    let mut reopened = TwinStore::new(store, ScoringPolicy::default());
    reopened.load_twin();
    assert_eq!(reopened.current(), Some(&computed));
}

#[test]
fn failed_twin_load_keeps_current_state() {
    let store = MemoryStore::new();
    let mut twin = TwinStore::new(store.clone(), ScoringPolicy::default());
    twin.recompute_twin(&[], &[], Utc::now());

    store.set_fail_reads(true);
    twin.load_twin();
    assert!(twin.current().is_some());

    store.set_fail_reads(false);
    store.put_raw(TWIN_KEY, "garbage");
    twin.load_twin();
    assert_eq!(twin.current().unwrap().risk_score, 5);
}

#[test]
fn failed_twin_write_still_updates_memory() {
    let store = MemoryStore::new();
    let mut twin = TwinStore::new(store.clone(), ScoringPolicy::default());

    store.set_fail_writes(true);
    twin.recompute_twin(&[], &[], Utc::now());

    assert!(twin.current().is_some());
    assert_eq!(store.raw(TWIN_KEY), None);
}

#[test]
fn app_state_feeds_both_stores_into_the_twin() {
    let store = MemoryStore::new();
    let mut app = AppState::with_store(store.clone(), NoopReminders, ScoringPolicy::default());
    app.load_all();

    app.timeline
        .add_event(
            TimelineEvent::new(EventKind::Emergency, "fall")
                .with_id("e1")
                .at(Utc::now() - Duration::days(1)),
        )
        .unwrap();
    let twin = app.recompute_twin().clone();
    assert_eq!(twin.risk_score, 50);
    assert_eq!(twin.risk_level, RiskLevel::Moderate);

    app.timeline
        .add_event(TimelineEvent::new(EventKind::Appointment, "follow-up").with_id("a1"))
        .unwrap();
    app.medications.add_medication(metformin("m1")).unwrap();
    let twin = app.recompute_twin().clone();
    assert_eq!(twin.risk_score, 25);

    let mut restarted = AppState::with_store(store, NoopReminders, ScoringPolicy::default());
    restarted.load_all();
    assert_eq!(restarted.twin.current(), Some(&twin));
    assert_eq!(restarted.timeline.len(), 2);
    assert_eq!(restarted.medications.medications().len(), 1);
}
