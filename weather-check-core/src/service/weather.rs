use async_trait::async_trait;
use tracing::instrument;

use crate::{
    assertions::{assert_number_at, assert_ok_object},
    client::{ApiClient, ApiResponse, ClientError},
    error::Result,
    model::{CoordinatesQuery, TemperatureRequest, WeatherQuery},
};

use super::{ResourceKind, TemperatureSource};

/// `/weather` (current conditions).
#[derive(Debug, Clone)]
pub struct WeatherService {
    client: ApiClient,
}

impl WeatherService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Send exactly the parameters present in `query`. Conflicting
    /// location parameters are left for the API to reject.
    #[instrument(skip_all, fields(city = ?query.city, city_id = ?query.city_id))]
    pub async fn get_weather(&self, query: &WeatherQuery) -> Result<ApiResponse, ClientError> {
        self.client.get(ResourceKind::Weather.endpoint(), query).await
    }

    /// Both axes are always sent; a `None` axis goes out empty instead of
    /// being dropped.
    #[instrument(skip(self, api_key))]
    pub async fn get_weather_by_coordinates(
        &self,
        lat: Option<f64>,
        lon: Option<f64>,
        api_key: Option<&str>,
    ) -> Result<ApiResponse, ClientError> {
        let query = CoordinatesQuery { lat, lon, api_key: api_key.map(str::to_owned) };
        self.client.get(ResourceKind::Weather.endpoint(), &query.to_pairs()).await
    }
}

#[async_trait]
impl TemperatureSource for WeatherService {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Weather
    }

    async fn fetch_primary_temperature(&self, request: &TemperatureRequest) -> Result<f64> {
        let response = self.get_weather(&request.weather_query()).await?;
        let data = assert_ok_object(&response)?;
        Ok(assert_number_at(&data, "/main/temp")?)
    }
}
