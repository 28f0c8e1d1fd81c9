use super::models::Coordinates;
use crate::config::Config;
use crate::error::{DashResult, Error};
use async_trait::async_trait;
use tracing::{info, warn};

/// Source of the user's position
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn locate(&self) -> DashResult<Coordinates>;
}

/// Geolocator backed by configured coordinates. Without coordinates it
/// behaves like a denied permission prompt.
#[derive(Debug, Clone, Default)]
pub struct FixedGeolocator {
    position: Option<Coordinates>,
}

impl FixedGeolocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    pub fn from_config(config: &Config) -> Self {
        let position = match (config.geo_latitude, config.geo_longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates {
                latitude,
                longitude,
            }),
            _ => None,
        };
        Self::new(position)
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> DashResult<Coordinates> {
        self.position
            .ok_or_else(|| Error::Permission("Geolocation not available".to_string()))
    }
}

/// Pick the weather location: a geolocation fix first, then the manually
/// entered city. `None` means the user still has to enter a city.
pub async fn resolve_location(
    geolocator: &dyn Geolocator,
    manual_city: Option<&str>,
) -> Option<String> {
    match geolocator.locate().await {
        Ok(coordinates) => {
            info!("Using geolocation {}", coordinates.label());
            return Some(coordinates.label());
        }
        Err(e) => warn!("Geolocation unavailable, falling back to manual city: {}", e),
    }

    manual_city
        .map(str::trim)
        .filter(|city| !city.is_empty())
        .map(str::to_string)
}
