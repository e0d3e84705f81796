use super::audit;
use crate::cli::parser::TwinCommand;
use crate::config::Config;
use crate::core::AppState;
use crate::errors::AppResult;
use crate::models::DigitalTwinState;
use crate::ui::messages::{header, info, paint_level};
use crate::utils::time::display_local;

pub fn handle(action: &TwinCommand, cfg: &Config) -> AppResult<()> {
    let mut state = AppState::open(cfg)?;

    match action {
        TwinCommand::Recompute => {
            let twin = state.recompute_twin().clone();
            audit(
                cfg,
                "twin_recompute",
                twin.risk_level.as_str(),
                &format!("Risk score {}", twin.risk_score),
            );
            print_twin(&twin);
        }

        TwinCommand::Show => match state.twin.current() {
            Some(twin) => print_twin(twin),
            None => info("No digital twin computed yet. Run `healthtwin twin recompute`."),
        },
    }

    Ok(())
}

fn print_twin(twin: &DigitalTwinState) {
    header("Digital twin");
    println!("Updated:    {}", display_local(&twin.updated_at));
    println!("Risk score: {}", twin.risk_score);
    println!("Risk level: {}", paint_level(twin.risk_level));

    if !twin.key_signals.is_empty() {
        println!("\nSignals:");
        for s in &twin.key_signals {
            println!("  - {s}");
        }
    }

    println!("\nNudges:");
    for n in &twin.nudges {
        println!("  → {n}");
    }
}
