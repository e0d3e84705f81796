use super::audit;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AppState;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        what,
        format,
        file,
        force,
    } = cmd
    {
        let state = AppState::open(cfg)?;

        let rows = ExportLogic::export(
            *what,
            *format,
            file,
            *force,
            state.timeline.events(),
            state.medications.medications(),
        )?;

        if rows > 0 {
            audit(
                cfg,
                "export",
                file,
                &format!("Exported {rows} rows as {}", format.as_str()),
            );
        }
    }

    Ok(())
}
