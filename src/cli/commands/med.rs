use super::audit;
use crate::cli::parser::MedCommand;
use crate::config::Config;
use crate::core::AppState;
use crate::errors::AppResult;
use crate::models::MedicationSchedule;
use crate::ui::messages::{info, success};
use crate::utils::time::{display_local, split_times};

pub fn handle(action: &MedCommand, cfg: &Config) -> AppResult<()> {
    let mut state = AppState::open(cfg)?;

    match action {
        MedCommand::Add {
            id,
            name,
            dosage,
            frequency,
            times,
            inactive,
        } => {
            let mut med = MedicationSchedule::new(
                name.trim(),
                dosage.trim(),
                frequency.trim(),
                split_times(times),
            );
            if let Some(id) = id {
                med = med.with_id(id.trim());
            }
            if *inactive {
                med = med.inactive();
            }

            let med_id = med.id.clone();
            let doses = med.times.len();
            state.medications.add_medication(med)?;

            audit(cfg, "med_add", &med_id, &format!("{} {}", name.trim(), dosage.trim()));
            success(format!("Medication {med_id} added ({doses} daily doses)"));
        }

        MedCommand::List => {
            let meds = state.medications.medications();
            if meds.is_empty() {
                info("No medications.");
                return Ok(());
            }

            println!("MEDICATIONS:");
            for m in meds {
                println!(
                    "{} | {} {} | {} | {} | {} | taken today: {}{}",
                    m.id,
                    m.name,
                    m.dosage,
                    m.frequency,
                    m.times.join(","),
                    if m.active { "active" } else { "inactive" },
                    if m.is_taken_today() { "yes" } else { "no" },
                    m.last_taken
                        .map(|t| format!(" (last {})", display_local(&t)))
                        .unwrap_or_default(),
                );
            }
        }

        MedCommand::Remove { id } => {
            let removed = state.medications.remove_medication(id)?;
            audit(cfg, "med_remove", id, &format!("Removed {}", removed.name));
            success(format!("Medication {id} removed"));
        }

        MedCommand::Take { id } => {
            let taken = state.medications.toggle_taken(id)?;
            audit(cfg, "med_take", id, &format!("taken today = {taken}"));
            if taken {
                success(format!("Medication {id} marked as taken today"));
            } else {
                info(format!("Medication {id} marked as not taken today"));
            }
        }

        MedCommand::Activate { id } => {
            state.medications.set_active(id, true)?;
            audit(cfg, "med_activate", id, "Medication activated");
            success(format!("Medication {id} activated"));
        }

        MedCommand::Deactivate { id } => {
            state.medications.set_active(id, false)?;
            audit(cfg, "med_deactivate", id, "Medication deactivated");
            success(format!("Medication {id} deactivated"));
        }

        MedCommand::Reset => {
            state.medications.reset_daily_adherence();
            audit(cfg, "med_reset", "", "Daily adherence reset");
            success("Daily adherence reset for all medications");
        }

        MedCommand::Reminders => {
            let rows = state.medications.reminders().list()?;
            if rows.is_empty() {
                info("No reminders scheduled.");
                return Ok(());
            }

            println!("REMINDERS:");
            for r in rows {
                println!("{} | {} | {}", r.time, r.medication_name, r.medication_id);
            }
        }
    }

    Ok(())
}
