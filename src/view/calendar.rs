use super::animation::MorphingIcon;
use super::Palette;
use crate::components::calendar::{AuthState, CalendarEvent, CalendarSnapshot};

pub const CONNECT_PROMPT: &str = "Connect your Google Calendar";
pub const FREE_DAY: &str = "No events today - enjoy your free time! 🎉";

/// One schedule line: time, title, duration, category badge and location
pub fn event_line(event: &CalendarEvent, palette: &Palette) -> String {
    let mut line = format!(
        "{} {}  {} ({})  {}",
        event.category.icon(),
        event.time_label(),
        event.summary,
        event.duration_label(),
        palette.accent(&format!("[{}]", event.category))
    );
    if let Some(location) = &event.location {
        line.push_str(&format!("  📍 {}", location));
    }
    line
}

/// Calendar card for a session snapshot
pub fn render_calendar(snapshot: &CalendarSnapshot, palette: &Palette, tick: u64) -> Vec<String> {
    let mut lines = vec![palette.heading("Today's Schedule")];

    match snapshot.auth {
        AuthState::Initial => {
            lines.push(format!("📅 {}", CONNECT_PROMPT));
            lines.push(palette.muted("See today's events right on your dashboard"));
        }
        AuthState::Loading => {
            lines.push(format!("{} Connecting...", MorphingIcon::SPINNER.frame(tick)));
        }
        AuthState::Error => {
            lines.push(palette.error("Connection Error"));
            if let Some(message) = &snapshot.error {
                lines.push(palette.error(message));
            }
            lines.push(palette.muted("Try again to reconnect your calendar"));
        }
        AuthState::Authenticated => {
            if snapshot.fetching && snapshot.events.is_empty() {
                lines.push(format!(
                    "{} Loading events...",
                    MorphingIcon::SPINNER.frame(tick)
                ));
            } else if snapshot.events.is_empty() {
                lines.push(FREE_DAY.to_string());
            } else {
                lines.extend(snapshot.events.iter().map(|event| event_line(event, palette)));
            }

            if let Some(message) = &snapshot.fetch_error {
                lines.push(palette.error(&format!("⚠️ Showing earlier events: {}", message)));
            }
            if let Some(refreshed) = snapshot.last_refreshed {
                lines.push(palette.muted(&format!("Updated {}", refreshed.format("%H:%M"))));
            }
        }
    }

    lines
}
