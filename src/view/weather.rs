use super::animation::MorphingIcon;
use super::{Palette, ViewState};
use crate::components::weather::WeatherSnapshot;

pub const CITY_PROMPT: &str = "What's your city? 🌍";

/// Weather card for the current widget state
pub fn render_weather(state: &ViewState<WeatherSnapshot>, palette: &Palette, tick: u64) -> Vec<String> {
    let mut lines = vec![palette.heading("Weather")];

    match state {
        ViewState::Loading => {
            lines.push(format!(
                "{} {}",
                MorphingIcon::WEATHER.frame(tick),
                palette.muted("░░░░░░ loading weather ░░░░░░")
            ));
        }
        ViewState::Empty => {
            lines.push(CITY_PROMPT.to_string());
            lines.push(palette.muted("Set WEATHER_LOCATION or share your coordinates"));
        }
        ViewState::Error(message) => {
            lines.push(palette.error(message));
        }
        ViewState::Populated(weather) => {
            lines.push(format!(
                "{} {}°C  {}",
                weather.icon(),
                weather.temperature_celsius,
                palette.accent(weather.condition.label())
            ));
            lines.push(format!("📍 {}", weather.location));
            if !weather.description.is_empty() {
                lines.push(palette.muted(&weather.description));
            }
            lines.push(format!(
                "💧 {}% humidity  💨 {} km/h wind",
                weather.humidity_percent, weather.wind_speed_kph
            ));
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::weather::WeatherCondition;

    #[test]
    fn test_populated_card() {
        let state = ViewState::Populated(WeatherSnapshot {
            location: "Paris".to_string(),
            temperature_celsius: 21,
            condition: WeatherCondition::LightRain,
            description: String::new(),
            humidity_percent: 64,
            wind_speed_kph: 12,
        });
        let lines = render_weather(&state, &Palette::plain(), 0);
        assert_eq!(lines[1], "🌦️ 21°C  Light Rain");
        assert_eq!(lines[2], "📍 Paris");
        assert_eq!(lines[3], "💧 64% humidity  💨 12 km/h wind");
    }

    #[test]
    fn test_empty_prompts_for_city() {
        let lines = render_weather(&ViewState::Empty, &Palette::plain(), 0);
        assert_eq!(lines[1], CITY_PROMPT);
    }

    #[test]
    fn test_error_is_inline() {
        let state = ViewState::Error("weather service unavailable".to_string());
        let lines = render_weather(&state, &Palette::plain(), 0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "weather service unavailable");
    }
}
