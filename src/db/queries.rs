use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, Row, params};

/// A scheduled daily reminder for one dose of a medication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRow {
    pub id: i64,
    pub medication_id: String,
    pub medication_name: String,
    pub time: String,
    pub created_at: String,
}

fn map_reminder(row: &Row) -> rusqlite::Result<ReminderRow> {
    Ok(ReminderRow {
        id: row.get("id")?,
        medication_id: row.get("medication_id")?,
        medication_name: row.get("medication_name")?,
        time: row.get("time")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_reminders(
    conn: &mut Connection,
    medication_id: &str,
    medication_name: &str,
    times: &[String],
) -> AppResult<usize> {
    let now = Local::now().to_rfc3339();
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO reminders (medication_id, medication_name, time, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )?;
        for t in times {
            stmt.execute(params![medication_id, medication_name, t, now])?;
        }
    }
    tx.commit()?;
    Ok(times.len())
}

pub fn delete_reminders(conn: &Connection, medication_id: &str) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM reminders WHERE medication_id = ?1",
        params![medication_id],
    )?;
    Ok(n)
}

pub fn load_reminders(conn: &Connection) -> AppResult<Vec<ReminderRow>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM reminders
         ORDER BY time ASC, medication_name ASC",
    )?;

    let rows = stmt.query_map([], map_reminder)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
