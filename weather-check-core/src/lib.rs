//! Core library for the `weather-check` contract suite.
//!
//! This crate defines:
//! - A thin HTTP client and the `/weather` and `/forecast` resource services
//! - Temperature conversions and response assertion helpers
//! - Fixtures: configuration, credentials, schemas and the city list
//! - The named scenarios and their report
//!
//! It is used by `weather-check-cli`, and its scenarios are also run by
//! this crate's own integration tests.

pub mod assertions;
pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod fixtures;
pub mod logging;
pub mod model;
pub mod report;
pub mod resources;
pub mod scenario;
pub mod service;

pub use assertions::{AssertionError, JsonKind};
pub use client::{ApiClient, ApiResponse, ClientError};
pub use config::{SuiteConfig, Tolerances};
pub use error::SuiteError;
pub use fixtures::{Fixtures, Skip};
pub use model::{ForecastQuery, TemperatureRequest, Units, WeatherQuery};
pub use report::SuiteReport;
pub use resources::Schema;
pub use scenario::{Outcome, ScenarioId, ScenarioResult, Tag, run_scenario, run_scenarios};
pub use service::{
    ResourceKind, TemperatureSource, forecast::ForecastService, get_temperature_for_city,
    weather::WeatherService,
};
