//! Shared, read-only test dependencies.
//!
//! `Fixtures` loads the schemas and city list once and hands out fresh
//! client/service instances on every call, so no two scenarios share
//! mutable state.

use std::sync::Arc;

use crate::{
    client::{ApiClient, ClientError},
    config::{SuiteConfig, Tolerances},
    error::Result,
    resources::{Schema, bundled_cities, load_cities},
    service::{forecast::ForecastService, weather::WeatherService},
};

/// Why a scenario could not run at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skip(pub String);

impl std::fmt::Display for Skip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Fixtures {
    config: SuiteConfig,
    cities: Arc<[String]>,
    weather_schema: Arc<Schema>,
    forecast_schema: Arc<Schema>,
}

impl Fixtures {
    pub fn from_config(config: SuiteConfig) -> Result<Self> {
        let (cities, weather_schema, forecast_schema) = match &config.resources_dir {
            Some(dir) => (
                load_cities(dir)?,
                Schema::load(dir, "weather")?,
                Schema::load(dir, "forecast")?,
            ),
            None => (bundled_cities()?, Schema::bundled("weather")?, Schema::bundled("forecast")?),
        };

        Ok(Self {
            cities: cities.into(),
            weather_schema: Arc::new(weather_schema),
            forecast_schema: Arc::new(forecast_schema),
            config,
        })
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.config.tolerances
    }

    pub fn default_city(&self) -> &str {
        &self.config.default_city
    }

    /// The credential, or a `Skip` explaining how to provide one.
    pub fn require_api_key(&self) -> Result<String, Skip> {
        self.config.api_key().map(str::to_owned).ok_or_else(|| {
            Skip(format!(
                "No API key available. Set {} (or a .env file) or run `weather-check configure`.",
                crate::config::API_KEY_ENV
            ))
        })
    }

    pub fn client(&self) -> Result<ApiClient, ClientError> {
        ApiClient::new(self.config.base_url.as_str(), self.config.timeout())
    }

    pub fn weather(&self) -> Result<WeatherService, ClientError> {
        Ok(WeatherService::new(self.client()?))
    }

    pub fn forecast(&self) -> Result<ForecastService, ClientError> {
        Ok(ForecastService::new(self.client()?))
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    pub fn weather_schema(&self) -> &Schema {
        &self.weather_schema
    }

    pub fn forecast_schema(&self) -> &Schema {
        &self.forecast_schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_default_config() {
        let fixtures = Fixtures::from_config(SuiteConfig::default()).expect("fixtures");
        assert!(!fixtures.cities().is_empty());
        assert_eq!(fixtures.weather_schema().name(), "weather");
        assert_eq!(fixtures.forecast_schema().name(), "forecast");
        assert_eq!(fixtures.default_city(), "Warsaw");
    }

    #[test]
    fn missing_key_is_a_skip() {
        let fixtures = Fixtures::from_config(SuiteConfig::default()).expect("fixtures");
        let skip = fixtures.require_api_key().unwrap_err();
        assert!(skip.to_string().contains("API_KEY"));
    }

    #[test]
    fn configured_key_is_returned() {
        let mut cfg = SuiteConfig::default();
        cfg.set_api_key("KEY".into());
        let fixtures = Fixtures::from_config(cfg).expect("fixtures");
        assert_eq!(fixtures.require_api_key(), Ok("KEY".to_string()));
    }

    #[test]
    fn missing_resources_dir_fails() {
        let cfg = SuiteConfig {
            resources_dir: Some("/definitely/not/here".into()),
            ..SuiteConfig::default()
        };
        assert!(Fixtures::from_config(cfg).is_err());
    }

    #[test]
    fn resources_dir_overrides_bundled_data() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        std::fs::create_dir_all(root.join("data")).expect("mkdir data");
        std::fs::create_dir_all(root.join("schemas")).expect("mkdir schemas");
        std::fs::write(root.join("data/cities.json"), r#"["Gdansk", "Lodz"]"#).expect("write cities");
        for name in ["weather", "forecast"] {
            std::fs::write(root.join(format!("schemas/{name}.json")), r#"{ "type": "object" }"#)
                .expect("write schema");
        }

        let cfg = SuiteConfig { resources_dir: Some(root.to_path_buf()), ..SuiteConfig::default() };
        let fixtures = Fixtures::from_config(cfg).expect("fixtures");
        assert_eq!(fixtures.cities(), ["Gdansk", "Lodz"]);
        assert!(fixtures.weather_schema().is_valid(&serde_json::json!({})));
    }

    #[test]
    fn services_use_configured_base_url() {
        let cfg = SuiteConfig { base_url: "http://127.0.0.1:9/data/2.5".into(), ..SuiteConfig::default() };
        let fixtures = Fixtures::from_config(cfg).expect("fixtures");
        assert_eq!(fixtures.client().expect("client").base_url(), "http://127.0.0.1:9/data/2.5");
    }
}
