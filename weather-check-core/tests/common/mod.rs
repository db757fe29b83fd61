//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::{Value, json};
use weather_check_core::{Fixtures, SuiteConfig};
use wiremock::MockServer;

pub const TEST_KEY: &str = "TEST_KEY";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join(name)
}

/// Recorded API payload from `tests/fixtures`.
pub fn recorded(name: &str) -> Value {
    let raw = std::fs::read_to_string(fixture_path(name)).expect("fixture should be readable");
    serde_json::from_str(&raw).expect("fixture should be valid JSON")
}

pub fn config_for(server: &MockServer, api_key: Option<&str>) -> SuiteConfig {
    SuiteConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        api_key: api_key.map(str::to_owned),
        ..SuiteConfig::default()
    }
}

pub fn fixtures_for(server: &MockServer, api_key: Option<&str>) -> Fixtures {
    Fixtures::from_config(config_for(server, api_key)).expect("fixtures should build")
}

/// A forecast body with `count` slots three hours apart, all at `temp`.
pub fn forecast_body(city: &str, count: usize, temp: f64) -> Value {
    let list: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "dt": 1_760_882_400 + (i as i64) * 10_800,
                "main": { "temp": temp, "feels_like": temp, "temp_min": temp, "temp_max": temp, "pressure": 1016, "humidity": 70 },
                "weather": [{ "id": 800, "main": "Clear", "description": "clear sky" }],
                "dt_txt": "2025-10-19 14:00:00"
            })
        })
        .collect();

    json!({
        "cod": "200",
        "cnt": count,
        "list": list,
        "city": { "id": 756135, "name": city, "coord": { "lat": 52.2298, "lon": 21.0118 }, "country": "PL" }
    })
}

pub fn error_body(code: u16, message: &str) -> Value {
    json!({ "cod": code.to_string(), "message": message })
}
