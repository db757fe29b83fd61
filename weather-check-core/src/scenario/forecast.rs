use crate::{
    assertions::{
        JsonKind, assert_error_message_present, assert_forecast_city, assert_forecast_entries,
        assert_ok_object, assert_status_and_json, assert_within_tolerance,
    },
    model::{ForecastQuery, TemperatureRequest, Units},
    service::get_temperature_for_city,
};

use super::{Context, StepResult, UNKNOWN_CITY};

pub(super) async fn missing_city(ctx: &Context<'_>) -> StepResult {
    let query = ForecastQuery::default().api_key(ctx.api_key());
    let response = ctx.fixtures.forecast()?.get_forecast(&query).await?;

    let data = assert_status_and_json(&response, 400, JsonKind::Object)?;
    assert_error_message_present(&data)?;
    Ok(())
}

pub(super) async fn five_day(ctx: &Context<'_>) -> StepResult {
    let city = ctx.fixtures.default_city();
    let query = ForecastQuery::for_city(city).api_key(ctx.api_key());
    let response = ctx.fixtures.forecast()?.get_forecast(&query).await?;

    let data = assert_ok_object(&response)?;
    assert_forecast_entries(&data, ctx.fixtures.tolerances().min_forecast_entries)?;
    assert_forecast_city(&data, city)?;
    Ok(())
}

pub(super) async fn matches_schema(ctx: &Context<'_>) -> StepResult {
    let query = ForecastQuery::for_city(ctx.fixtures.default_city()).api_key(ctx.api_key());
    let response = ctx.fixtures.forecast()?.get_forecast(&query).await?;

    let data = assert_ok_object(&response)?;
    ctx.fixtures.forecast_schema().validate(&data)?;
    Ok(())
}

pub(super) async fn unknown_city(ctx: &Context<'_>) -> StepResult {
    let query = ForecastQuery::for_city(UNKNOWN_CITY).api_key(ctx.api_key());
    let response = ctx.fixtures.forecast()?.get_forecast(&query).await?;

    let data = assert_status_and_json(&response, 404, JsonKind::Object)?;
    assert_error_message_present(&data)?;
    Ok(())
}

pub(super) async fn metric_units(ctx: &Context<'_>) -> StepResult {
    let forecast = ctx.fixtures.forecast()?;
    let request = TemperatureRequest::for_city(ctx.fixtures.default_city(), ctx.api_key());

    let kelvin = get_temperature_for_city(&forecast, &request).await?;
    let celsius = get_temperature_for_city(&forecast, &request.clone().units(Units::Metric)).await?;

    assert_within_tolerance(
        celsius,
        Units::Metric.from_kelvin(kelvin),
        ctx.fixtures.tolerances().temperature_conversion,
    )?;
    Ok(())
}
