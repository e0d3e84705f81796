use chrono::{DateTime, Duration, TimeZone, Utc};
use healthtwin::core::twin::{
    SIGNAL_ADHERENCE_ACTIVE, SIGNAL_INACTIVITY, SIGNAL_NO_CHECKUP, SIGNAL_RECENT_EMERGENCY,
    ScoringPolicy, compute_twin,
};
use healthtwin::models::{EventKind, MedicationSchedule, RiskLevel, TimelineEvent};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

fn event(id: &str, kind: EventKind, days_ago: i64) -> TimelineEvent {
    TimelineEvent::new(kind, id)
        .with_id(id)
        .at(now() - Duration::days(days_ago))
}

fn med(id: &str, active: bool) -> MedicationSchedule {
    let m = MedicationSchedule::new("Aspirin", "81mg", "daily", vec!["08:00".into()]).with_id(id);
    if active { m } else { m.inactive() }
}

fn score(events: &[TimelineEvent], meds: &[MedicationSchedule]) -> i32 {
    compute_twin(events, meds, now(), ScoringPolicy::default()).risk_score
}

#[test]
fn empty_history_without_medications_scores_five_every_time() {
    for _ in 0..3 {
        let twin = compute_twin(&[], &[], now(), ScoringPolicy::default());
        assert_eq!(twin.risk_score, 5);
        assert_eq!(twin.risk_level, RiskLevel::Low);
        assert!(twin.key_signals.is_empty(), "no-medication points carry no signal");
        assert_eq!(twin.updated_at, now());
    }
}

#[test]
fn recent_emergency_fires_within_seven_days_only() {
    let recent = compute_twin(
        &[event("e", EventKind::Emergency, 2)],
        &[],
        now(),
        ScoringPolicy::default(),
    );
    assert!(recent.key_signals.iter().any(|s| s == SIGNAL_RECENT_EMERGENCY));
    // 30 emergency + 15 no checkup + 5 no medication
    assert_eq!(recent.risk_score, 50);

    let old = compute_twin(
        &[event("e", EventKind::Emergency, 10)],
        &[],
        now(),
        ScoringPolicy::default(),
    );
    assert!(!old.key_signals.iter().any(|s| s == SIGNAL_RECENT_EMERGENCY));
    // 5 inactivity + 15 no checkup + 5 no medication
    assert_eq!(old.risk_score, 25);
}

#[test]
fn emergency_exactly_seven_days_old_still_counts() {
    let twin = compute_twin(
        &[event("e", EventKind::Emergency, 7)],
        &[],
        now(),
        ScoringPolicy::default(),
    );
    assert!(twin.key_signals.contains(&SIGNAL_RECENT_EMERGENCY.to_string()));
}

#[test]
fn single_recent_emergency_without_medications_is_moderate() {
    let twin = compute_twin(
        &[event("e", EventKind::Emergency, 1)],
        &[],
        now(),
        ScoringPolicy::default(),
    );

    assert_eq!(twin.risk_score, 50);
    assert_eq!(twin.risk_level, RiskLevel::Moderate);
    assert_eq!(
        twin.key_signals,
        vec![SIGNAL_RECENT_EMERGENCY.to_string(), SIGNAL_NO_CHECKUP.to_string()]
    );
    assert_eq!(
        twin.nudges,
        vec![
            "Consider booking a checkup soon.".to_string(),
            "Review your recent activity for irregularities.".to_string(),
        ]
    );
}

#[test]
fn healthy_history_with_active_medication_goes_negative() {
    let events = [event("a", EventKind::Appointment, 1)];
    let meds = [med("m1", true)];

    let twin = compute_twin(&events, &meds, now(), ScoringPolicy::default());
    assert_eq!(twin.risk_score, -5);
    assert_eq!(twin.risk_level, RiskLevel::Low);
    assert_eq!(twin.key_signals, vec![SIGNAL_ADHERENCE_ACTIVE.to_string()]);

    let clamped = compute_twin(
        &events,
        &meds,
        now(),
        ScoringPolicy {
            clamp_negative: true,
        },
    );
    assert_eq!(clamped.risk_score, 0);
    assert_eq!(clamped.risk_level, RiskLevel::Low);
}

#[test]
fn inactive_medications_only_contribute_nothing() {
    let events = [event("a", EventKind::Appointment, 1)];
    assert_eq!(score(&events, &[med("m1", false), med("m2", false)]), 0);
}

#[test]
fn inactivity_looks_at_the_first_inserted_event_only() {
    // first element is the latest insert even though an older timestamp
    let events = [
        event("old", EventKind::Chat, 5),
        event("new", EventKind::Chat, 0),
    ];
    let twin = compute_twin(&events, &[med("m", true)], now(), ScoringPolicy::default());
    assert!(twin.key_signals.contains(&SIGNAL_INACTIVITY.to_string()));

    let reversed = [
        event("new", EventKind::Chat, 0),
        event("old", EventKind::Chat, 5),
    ];
    let twin = compute_twin(&reversed, &[med("m", true)], now(), ScoringPolicy::default());
    assert!(!twin.key_signals.contains(&SIGNAL_INACTIVITY.to_string()));
}

#[test]
fn soap_note_counts_as_checkup_but_plate_scan_does_not() {
    assert_eq!(score(&[event("s", EventKind::SoapNote, 10)], &[med("m", true)]), 0);
    // 10 days old: +5 inactivity, +15 no checkup, -5 medication
    assert_eq!(score(&[event("p", EventKind::PlateScan, 10)], &[med("m", true)]), 15);
}

#[test]
fn checkup_older_than_thirty_days_is_missed() {
    let events = [
        event("chat", EventKind::Chat, 0),
        event("appt", EventKind::Appointment, 31),
    ];
    let twin = compute_twin(&events, &[med("m", true)], now(), ScoringPolicy::default());
    assert_eq!(twin.risk_score, 10);
    assert_eq!(twin.key_signals[0], SIGNAL_NO_CHECKUP);
}

#[test]
fn every_rule_fires_together() {
    let events = [
        event("chat", EventKind::Chat, 4),
        event("emergency", EventKind::Emergency, 6),
    ];
    let twin = compute_twin(&events, &[], now(), ScoringPolicy::default());

    assert_eq!(twin.risk_score, 30 + 5 + 15 + 5);
    assert_eq!(twin.risk_level, RiskLevel::Moderate);
    assert_eq!(
        twin.key_signals,
        vec![
            SIGNAL_RECENT_EMERGENCY.to_string(),
            SIGNAL_INACTIVITY.to_string(),
            SIGNAL_NO_CHECKUP.to_string(),
        ]
    );
}

#[test]
fn level_boundaries_and_nudges() {
    assert_eq!(RiskLevel::from_score(-5), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(30), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(31), RiskLevel::Moderate);
    assert_eq!(RiskLevel::from_score(70), RiskLevel::Moderate);
    assert_eq!(RiskLevel::from_score(71), RiskLevel::High);
    assert_eq!(RiskLevel::from_score(100), RiskLevel::High);

    assert_eq!(RiskLevel::Low.nudges().len(), 2);
    assert_eq!(RiskLevel::Moderate.nudges().len(), 2);
    assert_eq!(RiskLevel::High.nudges().len(), 3);
}

#[test]
fn score_level_and_nudges_stay_consistent_across_histories() {
    let kinds = [
        EventKind::Appointment,
        EventKind::PlateScan,
        EventKind::SoapNote,
        EventKind::Emergency,
        EventKind::Chat,
    ];
    let ages = [0, 2, 4, 8, 31];
    let med_sets: [Vec<MedicationSchedule>; 3] =
        [vec![], vec![med("a", true)], vec![med("i", false)]];

    for first in kinds {
        for second in kinds {
            for age_a in ages {
                for age_b in ages {
                    let events = [event("x", first, age_a), event("y", second, age_b)];
                    for meds in &med_sets {
                        let twin = compute_twin(&events, meds, now(), ScoringPolicy::default());

                        assert!(twin.risk_score <= 100);
                        assert!(twin.risk_score >= -5);
                        assert_eq!(twin.risk_level, RiskLevel::from_score(twin.risk_score));
                        assert!(!twin.nudges.is_empty() && twin.nudges.len() <= 3);
                        assert!(twin.key_signals.len() <= 4);
                    }
                }
            }
        }
    }
}
