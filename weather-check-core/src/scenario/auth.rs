use crate::{
    assertions::{
        JsonKind, assert_city_name, assert_error_message, assert_field, assert_ok_object,
        assert_status_and_json,
    },
    model::WeatherQuery,
};

use super::{Context, INVALID_API_KEY, StepResult};

const AUTH_CITY: &str = "London";

async fn expect_rejected(ctx: &Context<'_>, query: WeatherQuery) -> StepResult {
    let response = ctx.fixtures.weather()?.get_weather(&query).await?;
    let data = assert_status_and_json(&response, 401, JsonKind::Object)?;
    assert_error_message(&data, &["Invalid API key"])?;
    Ok(())
}

pub(super) async fn valid_key(ctx: &Context<'_>) -> StepResult {
    let query = WeatherQuery::for_city(AUTH_CITY).api_key(ctx.api_key());
    let response = ctx.fixtures.weather()?.get_weather(&query).await?;

    let data = assert_ok_object(&response)?;
    assert_field(&data, "/weather")?;
    assert_field(&data, "/main")?;
    assert_city_name(&data, AUTH_CITY)?;
    Ok(())
}

pub(super) async fn invalid_key(ctx: &Context<'_>) -> StepResult {
    expect_rejected(ctx, WeatherQuery::for_city(AUTH_CITY).api_key(INVALID_API_KEY)).await
}

pub(super) async fn missing_key(ctx: &Context<'_>) -> StepResult {
    expect_rejected(ctx, WeatherQuery::for_city(AUTH_CITY)).await
}

pub(super) async fn key_with_whitespace(ctx: &Context<'_>) -> StepResult {
    let padded = format!(" {}", ctx.api_key());
    expect_rejected(ctx, WeatherQuery::for_city(AUTH_CITY).api_key(padded)).await
}
