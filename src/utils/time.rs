use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Part of the day used to pick the greeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    /// Morning before noon, afternoon before 17:00, evening otherwise
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            DayPeriod::Morning
        } else if hour < 17 {
            DayPeriod::Afternoon
        } else {
            DayPeriod::Evening
        }
    }

    pub fn greeting(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Good Morning",
            DayPeriod::Afternoon => "Good Afternoon",
            DayPeriod::Evening => "Good Evening",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "🌅",
            DayPeriod::Afternoon => "☀️",
            DayPeriod::Evening => "🌆",
        }
    }
}

/// Period for a wall-clock time
pub fn day_period(now: &NaiveDateTime) -> DayPeriod {
    DayPeriod::from_hour(now.hour())
}

/// "Monday, October 19, 2026"
pub fn long_date(date: &NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// "10/19/2026"
pub fn short_date(date: &NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// "09:05 AM"
pub fn clock_12h(now: &NaiveDateTime) -> String {
    now.format("%I:%M %p").to_string()
}

/// Truncate a message to at most `max_chars` characters
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}
