use crate::components::calendar::CalendarEvent;
use crate::components::quotes::QuoteItem;
use crate::components::weather::WeatherSnapshot;
use crate::utils::time::{long_date, short_date};
use chrono::NaiveDate;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherLine {
    pub location: String,
    pub temperature_celsius: u8,
    pub condition: String,
}

impl From<&WeatherSnapshot> for WeatherLine {
    fn from(weather: &WeatherSnapshot) -> Self {
        Self {
            location: weather.location.clone(),
            temperature_celsius: weather.temperature_celsius,
            condition: weather.condition.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLine {
    pub title: String,
    pub time: String,
}

impl From<&CalendarEvent> for EventLine {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            title: event.summary.clone(),
            time: event.time_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteLine {
    pub text: String,
    pub author: String,
}

impl From<&QuoteItem> for QuoteLine {
    fn from(quote: &QuoteItem) -> Self {
        Self {
            text: quote.text.clone(),
            author: quote.author.clone(),
        }
    }
}

/// Aggregated weather, schedule and quote behind the email preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDraft {
    pub date: NaiveDate,
    pub weather: WeatherLine,
    pub events: Vec<EventLine>,
    pub quote: QuoteLine,
}

impl SummaryDraft {
    /// Draft shown before any widget has data
    pub fn seed(date: NaiveDate) -> Self {
        Self {
            date,
            weather: WeatherLine {
                location: "San Francisco".to_string(),
                temperature_celsius: 22,
                condition: "Partly Cloudy".to_string(),
            },
            events: Vec::new(),
            quote: QuoteLine {
                text: "The way to get started is to quit talking and begin doing.".to_string(),
                author: "Walt Disney".to_string(),
            },
        }
    }
}

/// Render the plain-text digest. Same draft, same bytes.
pub fn format_summary(draft: &SummaryDraft) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "🌅 Daily Prep Summary for {}", long_date(&draft.date));
    out.push('\n');

    out.push_str("🌤️ WEATHER UPDATE\n");
    let _ = writeln!(
        out,
        "{}: {}°C, {}",
        draft.weather.location, draft.weather.temperature_celsius, draft.weather.condition
    );
    out.push('\n');

    out.push_str("📅 YOUR SCHEDULE TODAY\n");
    if draft.events.is_empty() {
        out.push_str("• No events scheduled - enjoy your free day!\n");
    } else {
        for event in &draft.events {
            let _ = writeln!(out, "• {} - {}", event.time, event.title);
        }
    }
    out.push('\n');

    out.push_str("✨ DAILY INSPIRATION\n");
    let _ = writeln!(out, "\"{}\"", draft.quote.text);
    let _ = writeln!(out, "— {}", draft.quote.author);
    out.push('\n');

    out.push_str("Have a wonderful and productive day! 🌟\n");
    out.push('\n');
    out.push_str("---\n");
    out.push_str("Powered by Daily Prep Assistant\n");
    out.push_str("Your personal morning companion ❤️");

    out
}

/// Subject line for the summary email
pub fn summary_subject(date: &NaiveDate) -> String {
    format!("Your Daily Prep Summary for {}", short_date(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> SummaryDraft {
        let mut draft = SummaryDraft::seed(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        draft.events = vec![
            EventLine {
                title: "Team Standup".to_string(),
                time: "09:00".to_string(),
            },
            EventLine {
                title: "Project Review".to_string(),
                time: "11:30".to_string(),
            },
        ];
        draft
    }

    #[test]
    fn test_format_summary_layout() {
        let text = format_summary(&draft());
        let expected = "\
🌅 Daily Prep Summary for Monday, October 19, 2026

🌤️ WEATHER UPDATE
San Francisco: 22°C, Partly Cloudy

📅 YOUR SCHEDULE TODAY
• 09:00 - Team Standup
• 11:30 - Project Review

✨ DAILY INSPIRATION
\"The way to get started is to quit talking and begin doing.\"
— Walt Disney

Have a wonderful and productive day! 🌟

---
Powered by Daily Prep Assistant
Your personal morning companion ❤️";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_format_summary_is_stable() {
        let draft = draft();
        assert_eq!(format_summary(&draft), format_summary(&draft.clone()));
    }

    #[test]
    fn test_free_day_placeholder() {
        let mut draft = draft();
        draft.events.clear();
        let text = format_summary(&draft);
        assert!(text.contains("• No events scheduled - enjoy your free day!"));
        assert!(!text.contains("Team Standup"));
    }

    #[test]
    fn test_subject() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(summary_subject(&date), "Your Daily Prep Summary for 10/19/2026");
    }
}
