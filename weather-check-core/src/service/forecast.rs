use async_trait::async_trait;
use tracing::instrument;

use crate::{
    assertions::{assert_number_at, assert_ok_object},
    client::{ApiClient, ApiResponse, ClientError},
    error::Result,
    model::{ForecastQuery, TemperatureRequest},
};

use super::{ResourceKind, TemperatureSource};

/// `/forecast` (5 days in 3-hour slots).
#[derive(Debug, Clone)]
pub struct ForecastService {
    client: ApiClient,
}

impl ForecastService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[instrument(skip_all, fields(city = ?query.city))]
    pub async fn get_forecast(&self, query: &ForecastQuery) -> Result<ApiResponse, ClientError> {
        self.client.get(ResourceKind::Forecast.endpoint(), query).await
    }
}

#[async_trait]
impl TemperatureSource for ForecastService {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Forecast
    }

    async fn fetch_primary_temperature(&self, request: &TemperatureRequest) -> Result<f64> {
        let response = self.get_forecast(&request.forecast_query()).await?;
        let data = assert_ok_object(&response)?;
        Ok(assert_number_at(&data, "/list/0/main/temp")?)
    }
}
