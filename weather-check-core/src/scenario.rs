//! Named contract scenarios against the live API.
//!
//! Each scenario is a sequence of requests and assertions. Running one
//! yields an [`Outcome`]: passed, failed with the first assertion message,
//! or skipped when it needs a credential that isn't configured.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::{error::SuiteError, fixtures::Fixtures};

mod auth;
mod forecast;
mod integration;
mod weather;

/// City used where a scenario needs fixed, known-good reference values.
pub struct ReferenceCity {
    pub name: &'static str,
    pub id: u64,
    pub lat: f64,
    pub lon: f64,
}

pub const WARSAW: ReferenceCity = ReferenceCity {
    name: "Warsaw",
    id: 756135,
    lat: 52.2297,
    lon: 21.0122,
};

pub const UNKNOWN_CITY: &str = "NON_EXISTING_CITY";
pub const INVALID_API_KEY: &str = "11111";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Positive,
    Negative,
    Schema,
    Integration,
    Performance,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Positive => "positive",
            Tag::Negative => "negative",
            Tag::Schema => "schema",
            Tag::Integration => "integration",
            Tag::Performance => "performance",
        }
    }

    pub const fn all() -> &'static [Tag] {
        &[Tag::Positive, Tag::Negative, Tag::Schema, Tag::Integration, Tag::Performance]
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Tag {
    type Error = SuiteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Tag::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| SuiteError::Unknown {
                kind: "tag",
                name: value.to_string(),
                supported: Tag::all().iter().map(Tag::as_str).collect::<Vec<_>>().join(", "),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioId {
    AuthValidKey,
    AuthInvalidKey,
    AuthMissingKey,
    AuthKeyWithWhitespace,
    WeatherSingleCity,
    WeatherSupportedCities,
    WeatherMissingCity,
    WeatherUnknownCity,
    WeatherByCityId,
    WeatherByCoordinates,
    WeatherInvalidCoordinates,
    WeatherLanguage,
    WeatherMetricUnits,
    WeatherImperialUnits,
    WeatherMatchesSchema,
    ForecastMissingCity,
    ForecastFiveDay,
    ForecastMatchesSchema,
    ForecastUnknownCity,
    ForecastMetricUnits,
    WeatherVsForecastConsistency,
    WeatherResponseTime,
}

impl ScenarioId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioId::AuthValidKey => "auth_valid_key",
            ScenarioId::AuthInvalidKey => "auth_invalid_key",
            ScenarioId::AuthMissingKey => "auth_missing_key",
            ScenarioId::AuthKeyWithWhitespace => "auth_key_with_whitespace",
            ScenarioId::WeatherSingleCity => "weather_single_city",
            ScenarioId::WeatherSupportedCities => "weather_supported_cities",
            ScenarioId::WeatherMissingCity => "weather_missing_city",
            ScenarioId::WeatherUnknownCity => "weather_unknown_city",
            ScenarioId::WeatherByCityId => "weather_by_city_id",
            ScenarioId::WeatherByCoordinates => "weather_by_coordinates",
            ScenarioId::WeatherInvalidCoordinates => "weather_invalid_coordinates",
            ScenarioId::WeatherLanguage => "weather_language",
            ScenarioId::WeatherMetricUnits => "weather_metric_units",
            ScenarioId::WeatherImperialUnits => "weather_imperial_units",
            ScenarioId::WeatherMatchesSchema => "weather_matches_schema",
            ScenarioId::ForecastMissingCity => "forecast_missing_city",
            ScenarioId::ForecastFiveDay => "forecast_five_day",
            ScenarioId::ForecastMatchesSchema => "forecast_matches_schema",
            ScenarioId::ForecastUnknownCity => "forecast_unknown_city",
            ScenarioId::ForecastMetricUnits => "forecast_metric_units",
            ScenarioId::WeatherVsForecastConsistency => "weather_vs_forecast_consistency",
            ScenarioId::WeatherResponseTime => "weather_response_time",
        }
    }

    pub const fn all() -> &'static [ScenarioId] {
        &[
            ScenarioId::AuthValidKey,
            ScenarioId::AuthInvalidKey,
            ScenarioId::AuthMissingKey,
            ScenarioId::AuthKeyWithWhitespace,
            ScenarioId::WeatherSingleCity,
            ScenarioId::WeatherSupportedCities,
            ScenarioId::WeatherMissingCity,
            ScenarioId::WeatherUnknownCity,
            ScenarioId::WeatherByCityId,
            ScenarioId::WeatherByCoordinates,
            ScenarioId::WeatherInvalidCoordinates,
            ScenarioId::WeatherLanguage,
            ScenarioId::WeatherMetricUnits,
            ScenarioId::WeatherImperialUnits,
            ScenarioId::WeatherMatchesSchema,
            ScenarioId::ForecastMissingCity,
            ScenarioId::ForecastFiveDay,
            ScenarioId::ForecastMatchesSchema,
            ScenarioId::ForecastUnknownCity,
            ScenarioId::ForecastMetricUnits,
            ScenarioId::WeatherVsForecastConsistency,
            ScenarioId::WeatherResponseTime,
        ]
    }

    /// Scenarios that exercise rejection of bad credentials run without one.
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ScenarioId::AuthInvalidKey | ScenarioId::AuthMissingKey)
    }

    pub fn tags(&self) -> &'static [Tag] {
        match self {
            ScenarioId::AuthValidKey
            | ScenarioId::WeatherSingleCity
            | ScenarioId::WeatherSupportedCities
            | ScenarioId::WeatherByCityId
            | ScenarioId::WeatherByCoordinates
            | ScenarioId::WeatherLanguage
            | ScenarioId::WeatherMetricUnits
            | ScenarioId::WeatherImperialUnits
            | ScenarioId::ForecastFiveDay
            | ScenarioId::ForecastMetricUnits => &[Tag::Positive],
            ScenarioId::AuthInvalidKey
            | ScenarioId::AuthMissingKey
            | ScenarioId::AuthKeyWithWhitespace
            | ScenarioId::WeatherMissingCity
            | ScenarioId::WeatherUnknownCity
            | ScenarioId::WeatherInvalidCoordinates
            | ScenarioId::ForecastMissingCity
            | ScenarioId::ForecastUnknownCity => &[Tag::Negative],
            ScenarioId::WeatherMatchesSchema | ScenarioId::ForecastMatchesSchema => {
                &[Tag::Positive, Tag::Schema]
            }
            ScenarioId::WeatherVsForecastConsistency => &[Tag::Positive, Tag::Integration],
            ScenarioId::WeatherResponseTime => &[Tag::Positive, Tag::Performance],
        }
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags().contains(&tag)
    }
}

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ScenarioId {
    type Error = SuiteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ScenarioId::all()
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| SuiteError::Unknown {
                kind: "scenario",
                name: value.to_string(),
                supported: "see `weather-check list`".to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed(String),
    Skipped(String),
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Passed => "PASS",
            Outcome::Failed(_) => "FAIL",
            Outcome::Skipped(_) => "SKIP",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub id: ScenarioId,
    pub outcome: Outcome,
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// What a scenario body gets to work with.
pub(crate) struct Context<'a> {
    pub fixtures: &'a Fixtures,
    api_key: Option<String>,
}

impl Context<'_> {
    /// The configured key; empty for scenarios that run without one.
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

type StepResult = Result<(), SuiteError>;

async fn dispatch(id: ScenarioId, ctx: &Context<'_>) -> StepResult {
    match id {
        ScenarioId::AuthValidKey => auth::valid_key(ctx).await,
        ScenarioId::AuthInvalidKey => auth::invalid_key(ctx).await,
        ScenarioId::AuthMissingKey => auth::missing_key(ctx).await,
        ScenarioId::AuthKeyWithWhitespace => auth::key_with_whitespace(ctx).await,
        ScenarioId::WeatherSingleCity => weather::single_city(ctx).await,
        ScenarioId::WeatherSupportedCities => weather::supported_cities(ctx).await,
        ScenarioId::WeatherMissingCity => weather::missing_city(ctx).await,
        ScenarioId::WeatherUnknownCity => weather::unknown_city(ctx).await,
        ScenarioId::WeatherByCityId => weather::by_city_id(ctx).await,
        ScenarioId::WeatherByCoordinates => weather::by_coordinates(ctx).await,
        ScenarioId::WeatherInvalidCoordinates => weather::invalid_coordinates(ctx).await,
        ScenarioId::WeatherLanguage => weather::language(ctx).await,
        ScenarioId::WeatherMetricUnits => weather::metric_units(ctx).await,
        ScenarioId::WeatherImperialUnits => weather::imperial_units(ctx).await,
        ScenarioId::WeatherMatchesSchema => weather::matches_schema(ctx).await,
        ScenarioId::ForecastMissingCity => forecast::missing_city(ctx).await,
        ScenarioId::ForecastFiveDay => forecast::five_day(ctx).await,
        ScenarioId::ForecastMatchesSchema => forecast::matches_schema(ctx).await,
        ScenarioId::ForecastUnknownCity => forecast::unknown_city(ctx).await,
        ScenarioId::ForecastMetricUnits => forecast::metric_units(ctx).await,
        ScenarioId::WeatherVsForecastConsistency => integration::weather_vs_forecast(ctx).await,
        ScenarioId::WeatherResponseTime => integration::response_time(ctx).await,
    }
}

/// Run one scenario to completion.
pub async fn run_scenario(id: ScenarioId, fixtures: &Fixtures) -> ScenarioResult {
    let started = Instant::now();

    let api_key = match fixtures.require_api_key() {
        Ok(key) => Some(key),
        Err(skip) if id.requires_api_key() => {
            info!(scenario = %id, "skipped: {skip}");
            return ScenarioResult { id, outcome: Outcome::Skipped(skip.0), duration: started.elapsed() };
        }
        Err(_) => None,
    };

    let ctx = Context { fixtures, api_key };
    let outcome = match dispatch(id, &ctx).await {
        Ok(()) => {
            info!(scenario = %id, "passed");
            Outcome::Passed
        }
        Err(e) => {
            warn!(scenario = %id, error = %e, "failed");
            Outcome::Failed(e.to_string())
        }
    };

    ScenarioResult { id, outcome, duration: started.elapsed() }
}

/// Run scenarios one after another, in the given order.
pub async fn run_scenarios(ids: &[ScenarioId], fixtures: &Fixtures) -> Vec<ScenarioResult> {
    let mut results = Vec::with_capacity(ids.len());
    for id in ids {
        results.push(run_scenario(*id, fixtures).await);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SuiteConfig;

    #[test]
    fn scenario_id_as_str_roundtrip() {
        for id in ScenarioId::all() {
            let parsed = ScenarioId::try_from(id.as_str()).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn scenario_names_are_unique() {
        let mut names: Vec<_> = ScenarioId::all().iter().map(ScenarioId::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ScenarioId::all().len());
    }

    #[test]
    fn unknown_scenario_error() {
        let err = ScenarioId::try_from("weather_on_mars").unwrap_err();
        assert!(err.to_string().contains("Unknown scenario 'weather_on_mars'"));
    }

    #[test]
    fn tag_parse() {
        assert_eq!(Tag::try_from("Performance").expect("tag"), Tag::Performance);
        assert!(Tag::try_from("flaky").is_err());
    }

    #[test]
    fn every_scenario_has_a_tag() {
        for id in ScenarioId::all() {
            assert!(!id.tags().is_empty(), "{id} has no tags");
        }
        assert!(ScenarioId::WeatherResponseTime.has_tag(Tag::Performance));
        assert!(ScenarioId::WeatherVsForecastConsistency.has_tag(Tag::Integration));
    }

    #[test]
    fn credential_free_scenarios() {
        let free: Vec<_> = ScenarioId::all().iter().filter(|id| !id.requires_api_key()).collect();
        assert_eq!(free, [&ScenarioId::AuthInvalidKey, &ScenarioId::AuthMissingKey]);
    }

    #[test]
    fn outcome_serializes_with_status() {
        let json = serde_json::to_value(Outcome::Skipped("no key".into())).expect("serialize");
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "no key");
        assert_eq!(serde_json::to_value(Outcome::Passed).expect("serialize")["status"], "passed");
    }

    #[tokio::test]
    async fn missing_key_skips_instead_of_failing() {
        let fixtures = Fixtures::from_config(SuiteConfig::default()).expect("fixtures");

        let result = run_scenario(ScenarioId::WeatherSingleCity, &fixtures).await;
        assert!(matches!(result.outcome, Outcome::Skipped(ref reason) if reason.contains("API_KEY")));
    }
}
