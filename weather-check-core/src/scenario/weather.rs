use crate::{
    assertions::{
        AssertionError, JsonKind, assert_city_name, assert_coordinates_match, assert_error_message,
        assert_error_message_present, assert_field, assert_number_at, assert_ok_object,
        assert_status_and_json, assert_within_tolerance,
    },
    model::{TemperatureRequest, Units, WeatherQuery},
    service::get_temperature_for_city,
};

use super::{Context, StepResult, UNKNOWN_CITY, WARSAW};

async fn expect_city(ctx: &Context<'_>, city: &str) -> StepResult {
    let query = WeatherQuery::for_city(city).api_key(ctx.api_key());
    let response = ctx.fixtures.weather()?.get_weather(&query).await?;

    let data = assert_ok_object(&response)?;
    assert_city_name(&data, city)?;
    Ok(())
}

pub(super) async fn single_city(ctx: &Context<'_>) -> StepResult {
    expect_city(ctx, ctx.fixtures.default_city()).await
}

pub(super) async fn supported_cities(ctx: &Context<'_>) -> StepResult {
    for city in ctx.fixtures.cities() {
        expect_city(ctx, city).await?;
    }
    Ok(())
}

pub(super) async fn missing_city(ctx: &Context<'_>) -> StepResult {
    let query = WeatherQuery::default().api_key(ctx.api_key());
    let response = ctx.fixtures.weather()?.get_weather(&query).await?;

    let data = assert_status_and_json(&response, 400, JsonKind::Object)?;
    assert_error_message(&data, &["geocode"])?;
    Ok(())
}

pub(super) async fn unknown_city(ctx: &Context<'_>) -> StepResult {
    let query = WeatherQuery::for_city(UNKNOWN_CITY).api_key(ctx.api_key());
    let response = ctx.fixtures.weather()?.get_weather(&query).await?;

    let data = assert_status_and_json(&response, 404, JsonKind::Object)?;
    assert_error_message(&data, &["city", "not found"])?;
    Ok(())
}

pub(super) async fn by_city_id(ctx: &Context<'_>) -> StepResult {
    let query = WeatherQuery::for_city_id(WARSAW.id).api_key(ctx.api_key());
    let response = ctx.fixtures.weather()?.get_weather(&query).await?;

    let data = assert_ok_object(&response)?;
    assert_city_name(&data, WARSAW.name)?;
    Ok(())
}

pub(super) async fn by_coordinates(ctx: &Context<'_>) -> StepResult {
    let response = ctx
        .fixtures
        .weather()?
        .get_weather_by_coordinates(Some(WARSAW.lat), Some(WARSAW.lon), Some(ctx.api_key()))
        .await?;

    let data = assert_ok_object(&response)?;
    let lat = assert_number_at(&data, "/coord/lat")?;
    let lon = assert_number_at(&data, "/coord/lon")?;
    assert_coordinates_match(WARSAW.lat, WARSAW.lon, lat, lon, ctx.fixtures.tolerances().coordinates)?;
    Ok(())
}

pub(super) async fn invalid_coordinates(ctx: &Context<'_>) -> StepResult {
    let response = ctx
        .fixtures
        .weather()?
        .get_weather_by_coordinates(None, Some(WARSAW.lon), Some(ctx.api_key()))
        .await?;

    let data = assert_status_and_json(&response, 400, JsonKind::Object)?;
    assert_error_message_present(&data)?;
    Ok(())
}

pub(super) async fn language(ctx: &Context<'_>) -> StepResult {
    let query = WeatherQuery::for_city(ctx.fixtures.default_city())
        .api_key(ctx.api_key())
        .lang("pl");
    let response = ctx.fixtures.weather()?.get_weather(&query).await?;

    let data = assert_ok_object(&response)?;
    let description = assert_field(&data, "/weather/0/description")?;
    if description.as_str().is_none_or(|d| d.trim().is_empty()) {
        return Err(AssertionError::Mismatch {
            field: "weather.0.description".into(),
            expected: "non-empty text".into(),
            actual: description.to_string(),
        }
        .into());
    }
    Ok(())
}

async fn units_agree(ctx: &Context<'_>, units: Units) -> StepResult {
    let weather = ctx.fixtures.weather()?;
    let request = TemperatureRequest::for_city(ctx.fixtures.default_city(), ctx.api_key());

    let kelvin = get_temperature_for_city(&weather, &request).await?;
    let converted = get_temperature_for_city(&weather, &request.clone().units(units)).await?;

    assert_within_tolerance(
        converted,
        units.from_kelvin(kelvin),
        ctx.fixtures.tolerances().temperature_conversion,
    )?;
    Ok(())
}

pub(super) async fn metric_units(ctx: &Context<'_>) -> StepResult {
    units_agree(ctx, Units::Metric).await
}

pub(super) async fn imperial_units(ctx: &Context<'_>) -> StepResult {
    units_agree(ctx, Units::Imperial).await
}

pub(super) async fn matches_schema(ctx: &Context<'_>) -> StepResult {
    let query = WeatherQuery::for_city(ctx.fixtures.default_city()).api_key(ctx.api_key());
    let response = ctx.fixtures.weather()?.get_weather(&query).await?;

    let data = assert_ok_object(&response)?;
    ctx.fixtures.weather_schema().validate(&data)?;
    Ok(())
}
