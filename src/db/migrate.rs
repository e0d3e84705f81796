use crate::db::log::htlog;
use rusqlite::{Connection, OptionalExtension, Result};

/// Check if a table with the given name exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `kv_store` table holding one JSON document per collection.
fn create_kv_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS kv_store (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Create the `reminders` table (one row per scheduled dose time).
fn create_reminders_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reminders (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            medication_id   TEXT NOT NULL,
            medication_name TEXT NOT NULL,
            time            TEXT NOT NULL,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reminders_medication ON reminders(medication_id);
        "#,
    )?;
    Ok(())
}

/// Bring the schema up to date. Safe to call on every open.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "kv_store")? {
        create_kv_table(conn)?;
        record(conn, "kv_store");
    }

    if !table_exists(conn, "reminders")? {
        create_reminders_table(conn)?;
        record(conn, "reminders");
    }

    Ok(())
}

fn record(conn: &Connection, table: &str) {
    if let Err(e) = htlog(
        conn,
        "migration_applied",
        table,
        &format!("Created table {table}"),
    ) {
        tracing::warn!(table, "Failed to log migration: {e}");
    }
}
