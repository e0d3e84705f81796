use super::audit;
use crate::cli::parser::EventCommand;
use crate::config::Config;
use crate::core::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::{EventKind, EventSource, TimelineEvent};
use crate::ui::messages::{info, success};
use crate::utils::time::{display_local, parse_optional_timestamp};

pub fn handle(action: &EventCommand, cfg: &Config) -> AppResult<()> {
    match action {
        EventCommand::Add {
            id,
            kind,
            title,
            summary,
            source,
            at,
        } => {
            let kind =
                EventKind::from_code(kind).ok_or_else(|| AppError::InvalidEventKind(kind.clone()))?;
            let source = EventSource::from_code(source)
                .ok_or_else(|| AppError::InvalidEventSource(source.clone()))?;

            let mut event = TimelineEvent::new(kind, title.trim()).with_source(source);
            if let Some(id) = id {
                event = event.with_id(id.trim());
            }
            if let Some(summary) = summary {
                event = event.with_summary(summary.trim());
            }
            if let Some(ts) = parse_optional_timestamp(at.as_ref())? {
                event = event.at(ts);
            }

            let event_id = event.id.clone();
            let mut state = AppState::open(cfg)?;
            state.timeline.add_event(event)?;

            audit(cfg, "event_add", &event_id, &format!("{kind}: {}", title.trim()));
            success(format!("Event {event_id} added ({kind})"));
        }

        EventCommand::List { limit, kind } => {
            let state = AppState::open(cfg)?;
            let limit = limit.unwrap_or(cfg.recent_limit);

            let events = match kind {
                Some(k) => {
                    let k = EventKind::from_code(k)
                        .ok_or_else(|| AppError::InvalidEventKind(k.clone()))?;
                    state
                        .timeline
                        .events_of_kind(k)
                        .into_iter()
                        .take(limit)
                        .collect()
                }
                None => state.timeline.get_recent_events(limit),
            };

            if events.is_empty() {
                info("No timeline events.");
                return Ok(());
            }

            println!("EVENTS (newest first, {} of {}):", events.len(), state.timeline.len());
            for ev in &events {
                println!(
                    "{} | {} | {:<11} | {:<6} | {}",
                    ev.id,
                    display_local(&ev.timestamp),
                    ev.kind.as_str(),
                    ev.source.as_str(),
                    ev.title
                );
                if let Some(summary) = &ev.summary {
                    println!("    {summary}");
                }
            }
        }
    }

    Ok(())
}
