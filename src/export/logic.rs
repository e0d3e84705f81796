use crate::errors::{AppError, AppResult};
use crate::export::csv::{write_events_csv, write_medications_csv};
use crate::export::fs_utils::ensure_writable;
use crate::export::json::write_json;
use crate::export::{ExportFormat, ExportTarget, notify_export_success};
use crate::models::{MedicationSchedule, TimelineEvent};
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Export one collection to `file` (absolute path).
    ///
    /// Returns the number of exported rows; nothing is written when the
    /// collection is empty.
    pub fn export(
        target: ExportTarget,
        format: ExportFormat,
        file: &str,
        force: bool,
        events: &[TimelineEvent],
        medications: &[MedicationSchedule],
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let rows = match target {
            ExportTarget::Events => events.len(),
            ExportTarget::Medications => medications.len(),
        };
        if rows == 0 {
            warning(format!("{}: nothing to export.", target.label()));
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match (target, format) {
            (ExportTarget::Events, ExportFormat::Csv) => write_events_csv(path, events)?,
            (ExportTarget::Events, ExportFormat::Json) => write_json(path, events)?,
            (ExportTarget::Medications, ExportFormat::Csv) => {
                write_medications_csv(path, medications)?
            }
            (ExportTarget::Medications, ExportFormat::Json) => write_json(path, medications)?,
        }

        notify_export_success(target.label(), path);
        Ok(rows)
    }
}
