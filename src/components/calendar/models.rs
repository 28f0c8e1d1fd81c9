use super::categorize::categorize;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed set of event categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Meeting,
    Personal,
    Work,
    Other,
}

impl EventCategory {
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "meeting",
            EventCategory::Personal => "personal",
            EventCategory::Work => "work",
            EventCategory::Other => "other",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "👥",
            EventCategory::Personal => "☕",
            EventCategory::Work => "💼",
            EventCategory::Other => "📌",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Event as returned by a calendar provider, before categorisation
#[derive(Debug, Clone, PartialEq)]
pub struct RawCalendarEvent {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Categorised calendar event
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub category: EventCategory,
}

impl From<RawCalendarEvent> for CalendarEvent {
    fn from(raw: RawCalendarEvent) -> Self {
        let category = categorize(&raw.summary, raw.description.as_deref());
        Self {
            id: raw.id,
            summary: raw.summary,
            description: raw.description,
            location: raw.location,
            start: raw.start,
            end: raw.end,
            category,
        }
    }
}

impl CalendarEvent {
    /// Start time as "HH:MM"
    pub fn time_label(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    /// Duration as "30 min", "1 hour", "2 hours" or "1h 30m"
    pub fn duration_label(&self) -> String {
        let minutes = (self.end - self.start).num_minutes().max(0);
        if minutes < 60 {
            return format!("{} min", minutes);
        }

        let hours = minutes / 60;
        let rest = minutes % 60;
        match (hours, rest) {
            (1, 0) => "1 hour".to_string(),
            (h, 0) => format!("{} hours", h),
            (h, m) => format!("{}h {}m", h, m),
        }
    }
}

/// Calendar connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthState {
    #[default]
    Initial,
    Loading,
    Authenticated,
    Error,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AuthState::Initial => "initial",
            AuthState::Loading => "loading",
            AuthState::Authenticated => "authenticated",
            AuthState::Error => "error",
        };
        f.write_str(label)
    }
}

/// Everything the calendar widget displays, published on every change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarSnapshot {
    pub auth: AuthState,
    /// Sign-in failure message, shown while in the error state
    pub error: Option<String>,
    /// Events owned by an authenticated session
    pub events: Vec<CalendarEvent>,
    /// A fetch is in flight
    pub fetching: bool,
    /// Last fetch failed; `events` are stale
    pub fetch_error: Option<String>,
    pub last_refreshed: Option<DateTime<Local>>,
}

impl CalendarSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.auth == AuthState::Authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(start: (u32, u32), end: (u32, u32)) -> CalendarEvent {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        CalendarEvent::from(RawCalendarEvent {
            id: "1".to_string(),
            summary: "Focus".to_string(),
            description: None,
            location: None,
            start: day.and_hms_opt(start.0, start.1, 0).unwrap(),
            end: day.and_hms_opt(end.0, end.1, 0).unwrap(),
        })
    }

    #[test]
    fn test_duration_labels() {
        assert_eq!(event((9, 0), (9, 30)).duration_label(), "30 min");
        assert_eq!(event((9, 0), (10, 0)).duration_label(), "1 hour");
        assert_eq!(event((9, 0), (11, 0)).duration_label(), "2 hours");
        assert_eq!(event((9, 0), (10, 30)).duration_label(), "1h 30m");
        assert_eq!(event((10, 0), (9, 0)).duration_label(), "0 min");
    }

    #[test]
    fn test_time_label() {
        assert_eq!(event((9, 5), (9, 30)).time_label(), "09:05");
    }
}
