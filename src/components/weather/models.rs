use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition labels the weather provider can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    LightRain,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 4] = [
        WeatherCondition::Sunny,
        WeatherCondition::PartlyCloudy,
        WeatherCondition::Cloudy,
        WeatherCondition::LightRain,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::LightRain => "Light Rain",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "☀️",
            WeatherCondition::PartlyCloudy => "⛅",
            WeatherCondition::Cloudy => "☁️",
            WeatherCondition::LightRain => "🌦️",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current conditions for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: String,
    pub temperature_celsius: u8,
    pub condition: WeatherCondition,
    pub description: String,
    pub humidity_percent: u8,
    pub wind_speed_kph: u8,
}

impl WeatherSnapshot {
    pub fn icon(&self) -> &'static str {
        self.condition.icon()
    }
}

/// A geolocation fix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Label used as the weather location for a fix
    pub fn label(&self) -> String {
        format!("{:.2}, {:.2}", self.latitude, self.longitude)
    }
}
