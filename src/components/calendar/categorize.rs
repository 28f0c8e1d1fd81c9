use super::models::{CalendarEvent, EventCategory, RawCalendarEvent};
use std::collections::HashSet;
use tracing::warn;

/// Keyword rules, checked in order. The first matching rule wins.
const RULES: [(EventCategory, &[&str]); 3] = [
    (EventCategory::Meeting, &["meeting", "call", "interview"]),
    (EventCategory::Work, &["work", "project", "deadline"]),
    (
        EventCategory::Personal,
        &["personal", "family", "doctor", "lunch", "break"],
    ),
];

/// Categorise an event from its summary and description text
pub fn categorize(summary: &str, description: Option<&str>) -> EventCategory {
    let summary = summary.to_lowercase();
    let description = description.unwrap_or_default().to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| summary.contains(keyword) || description.contains(keyword))
        })
        .map(|(category, _)| *category)
        .unwrap_or(EventCategory::Other)
}

/// Turn a provider result into the displayed collection: categorised,
/// ordered by start time, with duplicate ids dropped (first one kept).
pub fn normalize_events(raw: Vec<RawCalendarEvent>) -> Vec<CalendarEvent> {
    let mut seen = HashSet::new();
    let mut events: Vec<CalendarEvent> = raw
        .into_iter()
        .filter(|event| {
            let fresh = seen.insert(event.id.clone());
            if !fresh {
                warn!("Dropping calendar event with duplicate id {}", event.id);
            }
            fresh
        })
        .map(CalendarEvent::from)
        .collect();

    events.sort_by_key(|event| event.start);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(id: &str, summary: &str, hour: u32) -> RawCalendarEvent {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        RawCalendarEvent {
            id: id.to_string(),
            summary: summary.to_string(),
            description: None,
            location: None,
            start: day.and_hms_opt(hour, 0, 0).unwrap(),
            end: day.and_hms_opt(hour, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_keyword_categories() {
        assert_eq!(categorize("Weekly Meeting", None), EventCategory::Meeting);
        assert_eq!(categorize("Call with Bob", None), EventCategory::Meeting);
        assert_eq!(categorize("Interview", None), EventCategory::Meeting);
        assert_eq!(categorize("Project deadline", None), EventCategory::Work);
        assert_eq!(categorize("Doctor", None), EventCategory::Personal);
        assert_eq!(categorize("Lunch with Sarah", None), EventCategory::Personal);
        assert_eq!(categorize("Yoga", None), EventCategory::Other);
    }

    #[test]
    fn test_meeting_checked_before_personal() {
        assert_eq!(categorize("Personal meeting", None), EventCategory::Meeting);
        assert_eq!(categorize("Work call", None), EventCategory::Meeting);
        assert_eq!(categorize("Family project", None), EventCategory::Work);
    }

    #[test]
    fn test_description_is_inspected() {
        assert_eq!(
            categorize("Sync", Some("Quarterly planning MEETING")),
            EventCategory::Meeting
        );
        assert_eq!(
            categorize("Errands", Some("family stuff")),
            EventCategory::Personal
        );
        assert_eq!(categorize("", None), EventCategory::Other);
    }

    #[test]
    fn test_normalize_orders_and_dedupes() {
        let events = normalize_events(vec![
            raw("b", "Lunch", 12),
            raw("a", "Standup call", 9),
            raw("b", "Duplicate lunch", 13),
        ]);

        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(events[0].category, EventCategory::Meeting);
        assert_eq!(events[1].summary, "Lunch");
    }
}
