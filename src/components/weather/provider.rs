use super::models::{WeatherCondition, WeatherSnapshot};
use crate::error::{validation_error, DashResult};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

/// Source of current weather conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions for a city or location label
    async fn current(&self, location: &str) -> DashResult<WeatherSnapshot>;
}

/// Generates plausible weather after an artificial delay
#[derive(Debug, Clone)]
pub struct MockWeatherProvider {
    latency: Duration,
}

impl MockWeatherProvider {
    pub const DEFAULT_LATENCY_MS: u64 = 1000;

    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for MockWeatherProvider {
    fn default() -> Self {
        Self::new(Duration::from_millis(Self::DEFAULT_LATENCY_MS))
    }
}

#[async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn current(&self, location: &str) -> DashResult<WeatherSnapshot> {
        let location = location.trim();
        if location.is_empty() {
            return Err(validation_error("Please enter your city"));
        }

        sleep(self.latency).await;

        // ThreadRng is not Send, keep it out of the await above
        let mut rng = rand::rng();
        let condition = WeatherCondition::ALL[rng.random_range(0..WeatherCondition::ALL.len())];

        Ok(WeatherSnapshot {
            location: location.to_string(),
            temperature_celsius: rng.random_range(15..=30),
            condition,
            description: "Perfect weather for a productive day".to_string(),
            humidity_percent: rng.random_range(40..=70),
            wind_speed_kph: rng.random_range(5..=20),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_weather_within_ranges() {
        let provider = MockWeatherProvider::new(Duration::ZERO);

        for _ in 0..50 {
            let weather = provider.current("Paris").await.unwrap();
            assert_eq!(weather.location, "Paris");
            assert!((15..=30).contains(&weather.temperature_celsius));
            assert!((40..=70).contains(&weather.humidity_percent));
            assert!((5..=20).contains(&weather.wind_speed_kph));
        }
    }

    #[tokio::test]
    async fn test_blank_location_rejected() {
        let provider = MockWeatherProvider::new(Duration::ZERO);
        let result = provider.current("   ").await;
        assert!(matches!(result, Err(crate::error::Error::Validation(_))));
    }
}
