use super::models::RawCalendarEvent;
use crate::error::{provider_error, DashResult};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate};
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

/// Calendar backend the session actor talks to
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Authorise access to the calendar
    async fn sign_in(&self) -> DashResult<()>;

    /// Revoke access
    async fn sign_out(&self) -> DashResult<()>;

    /// Events on the given day
    async fn list_events_for_day(&self, day: NaiveDate) -> DashResult<Vec<RawCalendarEvent>>;
}

/// How many of the template events the mock returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCount {
    /// A random prefix, possibly empty
    Random,
    /// Always this many (capped at the template count)
    Fixed(usize),
}

struct EventTemplate {
    id: &'static str,
    summary: &'static str,
    hour: u32,
    minute: u32,
    minutes: i64,
    description: &'static str,
    location: Option<&'static str>,
}

const TEMPLATES: [EventTemplate; 4] = [
    EventTemplate {
        id: "1",
        summary: "Team Standup",
        hour: 9,
        minute: 0,
        minutes: 30,
        description: "Daily sync call with the development team",
        location: Some("Conference Room A"),
    },
    EventTemplate {
        id: "2",
        summary: "Project Review",
        hour: 11,
        minute: 30,
        minutes: 60,
        description: "Review progress on Q1 deliverables",
        location: None,
    },
    EventTemplate {
        id: "3",
        summary: "Lunch with Sarah",
        hour: 12,
        minute: 30,
        minutes: 60,
        description: "Catch up at the new café downtown",
        location: None,
    },
    EventTemplate {
        id: "4",
        summary: "Client Presentation",
        hour: 15,
        minute: 0,
        minutes: 45,
        description: "Present the MVP demo to stakeholders in the review meeting",
        location: None,
    },
];

/// In-memory calendar with artificial latency.
///
/// Failure switches let callers exercise the error paths of the session.
pub struct MockCalendarProvider {
    sign_in_latency: Duration,
    fetch_latency: Duration,
    event_count: EventCount,
    fail_sign_in: AtomicBool,
    fail_fetch: AtomicBool,
    sign_in_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockCalendarProvider {
    pub const DEFAULT_SIGN_IN_LATENCY_MS: u64 = 1500;
    pub const DEFAULT_FETCH_LATENCY_MS: u64 = 1000;

    pub fn new(sign_in_latency: Duration, fetch_latency: Duration) -> Self {
        Self {
            sign_in_latency,
            fetch_latency,
            event_count: EventCount::Random,
            fail_sign_in: AtomicBool::new(false),
            fail_fetch: AtomicBool::new(false),
            sign_in_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Return a fixed number of events instead of a random prefix
    pub fn with_event_count(mut self, count: usize) -> Self {
        self.event_count = EventCount::Fixed(count);
        self
    }

    pub fn set_fail_sign_in(&self, fail: bool) {
        self.fail_sign_in.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn events_for(day: NaiveDate, count: usize) -> Vec<RawCalendarEvent> {
        TEMPLATES
            .iter()
            .take(count)
            .filter_map(|template| {
                let start = day.and_hms_opt(template.hour, template.minute, 0)?;
                Some(RawCalendarEvent {
                    id: template.id.to_string(),
                    summary: template.summary.to_string(),
                    description: Some(template.description.to_string()),
                    location: template.location.map(str::to_string),
                    start,
                    end: start + ChronoDuration::minutes(template.minutes),
                })
            })
            .collect()
    }
}

impl Default for MockCalendarProvider {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(Self::DEFAULT_SIGN_IN_LATENCY_MS),
            Duration::from_millis(Self::DEFAULT_FETCH_LATENCY_MS),
        )
    }
}

#[async_trait]
impl CalendarProvider for MockCalendarProvider {
    async fn sign_in(&self) -> DashResult<()> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        sleep(self.sign_in_latency).await;

        if self.fail_sign_in.load(Ordering::SeqCst) {
            return Err(provider_error("Failed to sign in with Google"));
        }
        Ok(())
    }

    async fn sign_out(&self) -> DashResult<()> {
        Ok(())
    }

    async fn list_events_for_day(&self, day: NaiveDate) -> DashResult<Vec<RawCalendarEvent>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        sleep(self.fetch_latency).await;

        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(provider_error("Failed to fetch calendar events"));
        }

        let count = match self.event_count {
            EventCount::Random => rand::rng().random_range(0..=TEMPLATES.len()),
            EventCount::Fixed(count) => count.min(TEMPLATES.len()),
        };
        debug!("Mock calendar returning {} events for {}", count, day);

        Ok(Self::events_for(day, count))
    }
}
