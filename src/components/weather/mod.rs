pub mod location;
pub mod models;
pub mod provider;

pub use location::{FixedGeolocator, Geolocator};
pub use models::{Coordinates, WeatherCondition, WeatherSnapshot};
pub use provider::{MockWeatherProvider, WeatherProvider};

use crate::config::Config;
use crate::error::{validation_error, DashResult};
use crate::utils::sequence::RequestSequence;
use crate::utils::time::truncate_message;
use crate::view::ViewState;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

/// Weather widget: owns its fetch lifecycle and display state
pub struct WeatherWidget {
    provider: Arc<dyn WeatherProvider>,
    geolocator: Arc<dyn Geolocator>,
    state: RwLock<ViewState<WeatherSnapshot>>,
    last_fetched: RwLock<Option<WeatherSnapshot>>,
    sequence: RequestSequence,
}

impl WeatherWidget {
    /// Create a new weather widget
    pub fn new(provider: Arc<dyn WeatherProvider>, geolocator: Arc<dyn Geolocator>) -> Self {
        Self {
            provider,
            geolocator,
            state: RwLock::new(ViewState::Loading),
            last_fetched: RwLock::new(None),
            sequence: RequestSequence::new(),
        }
    }

    /// Current display state
    pub async fn state(&self) -> ViewState<WeatherSnapshot> {
        self.state.read().await.clone()
    }

    /// Last successfully fetched snapshot
    pub async fn last_fetched(&self) -> Option<WeatherSnapshot> {
        self.last_fetched.read().await.clone()
    }

    /// Fetch weather for a location. A response that arrives after a newer
    /// request was issued is dropped.
    pub async fn refresh(&self, location: &str) -> DashResult<()> {
        let token = self.sequence.issue();
        *self.state.write().await = ViewState::Loading;

        let result = self.provider.current(location).await;

        let mut state = self.state.write().await;
        if !self.sequence.is_current(token) {
            debug!("Discarding stale weather response for {}", location);
            return Ok(());
        }

        match result {
            Ok(snapshot) => {
                info!(
                    "Weather for {}: {}°C, {}",
                    snapshot.location, snapshot.temperature_celsius, snapshot.condition
                );
                *self.last_fetched.write().await = Some(snapshot.clone());
                *state = ViewState::Populated(snapshot);
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch weather: {}", e);
                *state = ViewState::Error(truncate_message(&e.to_string(), 100));
                Err(e)
            }
        }
    }

    /// Manual city entry. Blank input is rejected without a fetch.
    pub async fn submit_city(&self, city: &str) -> DashResult<()> {
        let city = city.trim();
        if city.is_empty() {
            return Err(validation_error("Please enter your city"));
        }
        self.refresh(city).await
    }

    /// Ask for a location: geolocation first, manual city second, otherwise
    /// show the city prompt.
    pub async fn locate_and_refresh(&self, manual_city: Option<&str>) -> DashResult<()> {
        match location::resolve_location(self.geolocator.as_ref(), manual_city).await {
            Some(location) => self.refresh(&location).await,
            None => {
                info!("No location available, prompting for a city");
                self.sequence.invalidate();
                *self.state.write().await = ViewState::Empty;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl super::Component for WeatherWidget {
    fn name(&self) -> &'static str {
        "weather"
    }

    async fn init(&self, config: Arc<RwLock<Config>>) -> DashResult<()> {
        let manual_city = {
            let config_read = config.read().await;
            config_read.weather_location.clone()
        };

        self.locate_and_refresh(manual_city.as_deref()).await
    }

    async fn shutdown(&self) -> DashResult<()> {
        // Nothing is scheduled; just make any in-flight response stale
        self.sequence.invalidate();
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{provider_error, Error};
    use std::time::Duration;

    /// Provider whose latency depends on the requested location
    struct DelayedProvider;

    #[async_trait]
    impl WeatherProvider for DelayedProvider {
        async fn current(&self, location: &str) -> DashResult<WeatherSnapshot> {
            let delay = if location == "Slow" { 200 } else { 10 };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if location == "Broken" {
                return Err(provider_error("weather service unavailable"));
            }
            Ok(WeatherSnapshot {
                location: location.to_string(),
                temperature_celsius: 20,
                condition: WeatherCondition::Sunny,
                description: String::new(),
                humidity_percent: 50,
                wind_speed_kph: 10,
            })
        }
    }

    fn widget() -> WeatherWidget {
        WeatherWidget::new(Arc::new(DelayedProvider), Arc::new(FixedGeolocator::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_does_not_overwrite_newer() {
        let widget = widget();

        let slow = widget.refresh("Slow");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            widget.refresh("Fast").await
        };
        let (slow_result, fast_result) = tokio::join!(slow, fast);
        assert!(slow_result.is_ok());
        assert!(fast_result.is_ok());

        let state = widget.state().await;
        assert_eq!(state.value().map(|w| w.location.as_str()), Some("Fast"));
        assert_eq!(
            widget.last_fetched().await.map(|w| w.location),
            Some("Fast".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_state_keeps_last_fetched() {
        let widget = widget();
        widget.refresh("Paris").await.unwrap();

        let result = widget.refresh("Broken").await;
        assert!(matches!(result, Err(Error::Provider(_))));
        assert!(matches!(widget.state().await, ViewState::Error(_)));
        assert_eq!(
            widget.last_fetched().await.map(|w| w.location),
            Some("Paris".to_string())
        );
    }

    #[tokio::test]
    async fn test_blank_city_is_rejected() {
        let widget = widget();
        let result = widget.submit_city("  ").await;
        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(widget.state().await.is_loading());
    }

    #[tokio::test]
    async fn test_no_location_prompts_for_city() {
        let widget = widget();
        widget.locate_and_refresh(None).await.unwrap();
        assert_eq!(widget.state().await, ViewState::Empty);
    }
}
