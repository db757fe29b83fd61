use crate::{
    assertions::{assert_ok_object, assert_response_time, assert_within_tolerance},
    model::{TemperatureRequest, Units, WeatherQuery},
    service::{ResourceKind, get_temperature_for_city, temperature_source},
};

use super::{Context, StepResult};

/// Current temperature and the first forecast slot, same city and units,
/// must stay within the consistency tolerance.
pub(super) async fn weather_vs_forecast(ctx: &Context<'_>) -> StepResult {
    let request = TemperatureRequest::for_city(ctx.fixtures.default_city(), ctx.api_key())
        .units(Units::Metric);

    let current = temperature_source(ResourceKind::Weather, ctx.fixtures.client()?);
    let forecast = temperature_source(ResourceKind::Forecast, ctx.fixtures.client()?);

    let now = get_temperature_for_city(current.as_ref(), &request).await?;
    let first_slot = get_temperature_for_city(forecast.as_ref(), &request).await?;

    assert_within_tolerance(now, first_slot, ctx.fixtures.tolerances().consistency)?;
    Ok(())
}

pub(super) async fn response_time(ctx: &Context<'_>) -> StepResult {
    let query = WeatherQuery::for_city(ctx.fixtures.default_city()).api_key(ctx.api_key());
    let response = ctx.fixtures.weather()?.get_weather(&query).await?;

    assert_ok_object(&response)?;
    assert_response_time(&response, ctx.fixtures.tolerances().max_response_time())?;
    Ok(())
}
