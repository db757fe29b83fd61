use crate::{
    client::ApiClient,
    convert,
    error::{Result, SuiteError},
    model::TemperatureRequest,
    service::{forecast::ForecastService, weather::WeatherService},
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod forecast;
pub mod weather;

/// The API resources this suite knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Weather,
    Forecast,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Weather => "weather",
            ResourceKind::Forecast => "forecast",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ResourceKind::Weather => "/weather",
            ResourceKind::Forecast => "/forecast",
        }
    }

    pub const fn all() -> &'static [ResourceKind] {
        &[ResourceKind::Weather, ResourceKind::Forecast]
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ResourceKind {
    type Error = SuiteError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "weather" => Ok(ResourceKind::Weather),
            "forecast" => Ok(ResourceKind::Forecast),
            _ => Err(SuiteError::Unknown {
                kind: "resource",
                name: value.to_string(),
                supported: "weather, forecast".to_string(),
            }),
        }
    }
}

/// A resource that can report one representative temperature: the
/// current reading for `/weather`, the first slot for `/forecast`.
#[async_trait]
pub trait TemperatureSource: Send + Sync + Debug {
    fn kind(&self) -> ResourceKind;

    async fn fetch_primary_temperature(&self, request: &TemperatureRequest) -> Result<f64>;
}

/// Build the temperature source for `kind` on top of `client`.
pub fn temperature_source(kind: ResourceKind, client: ApiClient) -> Box<dyn TemperatureSource> {
    match kind {
        ResourceKind::Weather => Box::new(WeatherService::new(client)),
        ResourceKind::Forecast => Box::new(ForecastService::new(client)),
    }
}

pub async fn get_temperature_for_city(
    source: &dyn TemperatureSource,
    request: &TemperatureRequest,
) -> Result<f64> {
    source.fetch_primary_temperature(request).await
}

/// Fetch in Kelvin (no units) and convert locally.
pub async fn get_temperature_in_celsius(
    source: &dyn TemperatureSource,
    api_key: &str,
    city: &str,
) -> Result<f64> {
    let kelvin = source
        .fetch_primary_temperature(&TemperatureRequest::for_city(city, api_key))
        .await?;
    Ok(convert::kelvin_to_celsius(kelvin))
}

pub async fn get_temperature_in_fahrenheit(
    source: &dyn TemperatureSource,
    api_key: &str,
    city: &str,
) -> Result<f64> {
    let kelvin = source
        .fetch_primary_temperature(&TemperatureRequest::for_city(city, api_key))
        .await?;
    Ok(convert::kelvin_to_fahrenheit(kelvin))
}
