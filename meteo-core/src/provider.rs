use crate::{
    Config,
    error::ForecastError,
    model::{CityName, ForecastResult, GeoCoordinate},
    provider::open_meteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Upstream source for geocoding and forecasts.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// `Ok(None)` when the query matches no location.
    async fn geocode(&self, city: &CityName) -> Result<Option<GeoCoordinate>, ForecastError>;

    async fn fetch_forecast(&self, coord: GeoCoordinate) -> Result<ForecastResult, ForecastError>;
}

/// Construct the Open-Meteo provider from config.
pub fn provider_from_config(config: &Config) -> Box<dyn ForecastProvider> {
    Box::new(OpenMeteoProvider::new(config))
}

/// City -> coordinates -> forecast. Every call goes to the network; nothing
/// is cached or retried.
///
/// The plain methods never fail: errors are logged and become `None`, so a
/// shell keeps whatever it was showing. Use [`ForecastService::try_lookup`]
/// to see why a lookup failed.
#[derive(Debug)]
pub struct ForecastService {
    provider: Box<dyn ForecastProvider>,
}

impl ForecastService {
    pub fn new(provider: Box<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(provider_from_config(config))
    }

    pub async fn geocode(&self, city: &CityName) -> Option<GeoCoordinate> {
        match self.provider.geocode(city).await {
            Ok(coord) => coord,
            Err(e) => {
                tracing::warn!(city = %city, "Geocoding failed: {}", e);
                None
            }
        }
    }

    pub async fn fetch_forecast(&self, coord: GeoCoordinate) -> Option<ForecastResult> {
        match self.provider.fetch_forecast(coord).await {
            Ok(forecast) => Some(forecast),
            Err(e) => {
                tracing::warn!(
                    latitude = coord.latitude,
                    longitude = coord.longitude,
                    "Forecast request failed: {}",
                    e
                );
                None
            }
        }
    }

    pub async fn lookup(&self, city: &CityName) -> Option<ForecastResult> {
        match self.try_lookup(city).await {
            Ok(forecast) => forecast,
            Err(e) => {
                tracing::warn!(city = %city, "Lookup failed: {}", e);
                None
            }
        }
    }

    /// Like [`ForecastService::lookup`], but keeps the error.
    /// `Ok(None)` means the city did not geocode.
    pub async fn try_lookup(
        &self,
        city: &CityName,
    ) -> Result<Option<ForecastResult>, ForecastError> {
        let Some(coord) = self.provider.geocode(city).await? else {
            tracing::info!(city = %city, "No location found");
            return Ok(None);
        };

        let forecast = self.provider.fetch_forecast(coord).await?;
        Ok(Some(forecast))
    }
}
