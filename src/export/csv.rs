use crate::errors::AppResult;
use crate::models::{MedicationSchedule, TimelineEvent};
use csv::Writer;
use std::path::Path;

pub fn write_events_csv(path: &Path, events: &[TimelineEvent]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["id", "type", "title", "summary", "timestamp", "source"])?;

    for ev in events {
        wtr.write_record([
            ev.id.as_str(),
            ev.kind.as_str(),
            ev.title.as_str(),
            ev.summary.as_deref().unwrap_or(""),
            ev.timestamp.to_rfc3339().as_str(),
            ev.source.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_medications_csv(path: &Path, meds: &[MedicationSchedule]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record([
        "id",
        "name",
        "dosage",
        "frequency",
        "times",
        "created_at",
        "active",
        "taken_today",
        "last_taken",
    ])?;

    for m in meds {
        wtr.write_record([
            m.id.clone(),
            m.name.clone(),
            m.dosage.clone(),
            m.frequency.clone(),
            m.times.join(" "),
            m.created_at.to_rfc3339(),
            m.active.to_string(),
            m.is_taken_today().to_string(),
            m.last_taken.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
