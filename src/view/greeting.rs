use super::Palette;
use crate::settings::DEFAULT_DISPLAY_NAME;
use crate::utils::time::{clock_12h, day_period, long_date};
use chrono::NaiveDateTime;

/// Header line greeting the user, e.g. "🌅 Good Morning, Ada!"
pub fn greeting_line(name: &str, now: &NaiveDateTime) -> String {
    let name = name.trim();
    let name = if name.is_empty() { DEFAULT_DISPLAY_NAME } else { name };
    let period = day_period(now);
    format!("{} {}, {}!", period.emoji(), period.greeting(), name)
}

/// Greeting header with the date and the current time
pub fn render_greeting(name: &str, now: &NaiveDateTime, palette: &Palette) -> Vec<String> {
    vec![
        palette.heading(&greeting_line(name, now)),
        palette.muted(&format!("{} · {}", long_date(&now.date()), clock_12h(now))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_greeting_by_period() {
        assert_eq!(greeting_line("Ada", &at(8)), "🌅 Good Morning, Ada!");
        assert_eq!(greeting_line("Ada", &at(13)), "☀️ Good Afternoon, Ada!");
        assert_eq!(greeting_line("Ada", &at(20)), "🌆 Good Evening, Ada!");
    }

    #[test]
    fn test_blank_name_falls_back() {
        assert_eq!(greeting_line("  ", &at(8)), "🌅 Good Morning, Friend!");
    }

    #[test]
    fn test_header_has_date_and_time() {
        let lines = render_greeting("Ada", &at(13), &Palette::plain());
        assert_eq!(lines[1], "Monday, October 19, 2026 · 01:15 PM");
    }
}
