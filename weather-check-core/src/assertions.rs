//! Response assertion helpers.
//!
//! Every helper returns `Err(AssertionError)` with a message carrying the
//! expected and actual values (and the raw body where there is one), so a
//! scenario can stay a flat list of `?`-chained checks.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::client::ApiResponse;

/// Large enough for any real `/weather` or `/forecast` payload, so failure
/// messages carry the raw body unabridged.
const MAX_BODY_IN_MESSAGE: usize = 64 * 1024;

#[derive(Debug, Error, PartialEq)]
pub enum AssertionError {
    #[error("Expected status {expected}, got {actual}. Response text: {body}")]
    Status { expected: u16, actual: u16, body: String },

    #[error("Request was throttled (429) while expecting status {expected}. Response text: {body}")]
    Throttled { expected: u16, body: String },

    #[error("Response body is not valid JSON ({reason}). Response text: {body}")]
    MalformedJson { reason: String, body: String },

    #[error("Expected response type {expected}, got {actual}. Response data: {body}")]
    Shape { expected: JsonKind, actual: &'static str, body: String },

    #[error("Response missing '{0}' key")]
    MissingField(String),

    #[error("Field '{field}': expected '{expected}', got '{actual}'")]
    Mismatch { field: String, expected: String, actual: String },

    #[error("Error message '{message}' does not contain '{fragment}'")]
    MessageFragment { message: String, fragment: String },

    #[error("|{actual} - {expected}| = {difference} is not below tolerance {tolerance}")]
    Tolerance { actual: f64, expected: f64, difference: f64, tolerance: f64 },

    #[error("Coordinates differ beyond {tolerance} on {axes}: expected ({expected_lat}, {expected_lon}), got ({actual_lat}, {actual_lon})")]
    Coordinates {
        axes: &'static str,
        expected_lat: f64,
        expected_lon: f64,
        actual_lat: f64,
        actual_lon: f64,
        tolerance: f64,
    },

    #[error("Expected at least {expected} forecast entries, got {actual}")]
    TooFewEntries { expected: usize, actual: usize },

    #[error("Forecast entries out of order at index {index}: {previous} is after {current}")]
    Unordered { index: usize, previous: String, current: String },

    #[error("Response took {elapsed:?}, expected under {max:?}")]
    TooSlow { elapsed: Duration, max: Duration },

    #[error("Response does not match schema '{schema}': {}", .errors.join("; "))]
    Schema { schema: String, errors: Vec<String> },
}

/// Top-level JSON shape expected from a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    Object,
    Array,
}

impl JsonKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            JsonKind::Object => value.is_object(),
            JsonKind::Array => value.is_array(),
        }
    }
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            JsonKind::Object => "object",
            JsonKind::Array => "array",
        })
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn truncate_body(body: &str) -> String {
    if body.len() > MAX_BODY_IN_MESSAGE {
        let mut end = MAX_BODY_IN_MESSAGE;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

/// Check the status, parse the body, and check its top-level shape.
/// Returns the parsed body so callers never parse twice.
pub fn assert_status_and_json(
    response: &ApiResponse,
    expected_status: u16,
    expected_kind: JsonKind,
) -> Result<Value, AssertionError> {
    if response.status != expected_status {
        if response.is_throttled() {
            return Err(AssertionError::Throttled {
                expected: expected_status,
                body: truncate_body(&response.body),
            });
        }
        return Err(AssertionError::Status {
            expected: expected_status,
            actual: response.status,
            body: truncate_body(&response.body),
        });
    }

    let data = response.json().map_err(|e| AssertionError::MalformedJson {
        reason: e.to_string(),
        body: truncate_body(&response.body),
    })?;

    if !expected_kind.matches(&data) {
        return Err(AssertionError::Shape {
            expected: expected_kind,
            actual: kind_name(&data),
            body: truncate_body(&data.to_string()),
        });
    }

    Ok(data)
}

/// `assert_status_and_json(response, 200, JsonKind::Object)`.
pub fn assert_ok_object(response: &ApiResponse) -> Result<Value, AssertionError> {
    assert_status_and_json(response, 200, JsonKind::Object)
}

/// Fetch a field by JSON pointer (`/main/temp`).
pub fn assert_field<'a>(data: &'a Value, pointer: &str) -> Result<&'a Value, AssertionError> {
    data.pointer(pointer)
        .ok_or_else(|| AssertionError::MissingField(pointer.trim_start_matches('/').replace('/', ".")))
}

pub fn assert_number_at(data: &Value, pointer: &str) -> Result<f64, AssertionError> {
    let value = assert_field(data, pointer)?;
    value.as_f64().ok_or_else(|| AssertionError::Mismatch {
        field: pointer.trim_start_matches('/').replace('/', "."),
        expected: "number".into(),
        actual: value.to_string(),
    })
}

fn assert_name_at(data: &Value, pointer: &str, expected_name: &str) -> Result<(), AssertionError> {
    let field = pointer.trim_start_matches('/').replace('/', ".");
    let name = assert_field(data, pointer)?
        .as_str()
        .ok_or_else(|| AssertionError::MissingField(field.clone()))?;

    if name.to_lowercase() != expected_name.to_lowercase() {
        return Err(AssertionError::Mismatch {
            field,
            expected: expected_name.to_string(),
            actual: name.to_string(),
        });
    }
    Ok(())
}

/// Case-insensitive check of `data.name`.
pub fn assert_city_name(data: &Value, expected_name: &str) -> Result<(), AssertionError> {
    assert_name_at(data, "/name", expected_name)
}

/// Case-insensitive check of `data.city.name` (forecast payloads).
pub fn assert_forecast_city(data: &Value, expected_name: &str) -> Result<(), AssertionError> {
    assert_name_at(data, "/city/name", expected_name)
}

fn error_message(data: &Value) -> Result<&str, AssertionError> {
    data.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AssertionError::MissingField("message".into()))
}

pub fn assert_error_message_present(data: &Value) -> Result<(), AssertionError> {
    error_message(data).map(|_| ())
}

/// Every fragment must appear in `data.message`, ignoring case.
pub fn assert_error_message(data: &Value, fragments: &[&str]) -> Result<(), AssertionError> {
    let message = error_message(data)?;
    let lowered = message.to_lowercase();

    for fragment in fragments {
        if !lowered.contains(&fragment.to_lowercase()) {
            return Err(AssertionError::MessageFragment {
                message: message.to_string(),
                fragment: fragment.to_string(),
            });
        }
    }
    Ok(())
}

/// Passes only when `|actual - expected| < tolerance`; a difference equal
/// to the tolerance fails.
pub fn assert_within_tolerance(
    actual: f64,
    expected: f64,
    tolerance: f64,
) -> Result<(), AssertionError> {
    let difference = (actual - expected).abs();
    if difference < tolerance {
        Ok(())
    } else {
        Err(AssertionError::Tolerance { actual, expected, difference, tolerance })
    }
}

/// Latitude and longitude are compared independently with `<=`.
pub fn assert_coordinates_match(
    expected_lat: f64,
    expected_lon: f64,
    actual_lat: f64,
    actual_lon: f64,
    tolerance: f64,
) -> Result<(), AssertionError> {
    let lat_ok = (expected_lat - actual_lat).abs() <= tolerance;
    let lon_ok = (expected_lon - actual_lon).abs() <= tolerance;

    let axes = match (lat_ok, lon_ok) {
        (true, true) => return Ok(()),
        (false, true) => "latitude",
        (true, false) => "longitude",
        (false, false) => "latitude and longitude",
    };

    Err(AssertionError::Coordinates {
        axes,
        expected_lat,
        expected_lon,
        actual_lat,
        actual_lon,
        tolerance,
    })
}

fn format_timestamp(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| ts.to_string())
}

/// Validate `data.list`: enough entries, non-decreasing `dt`, and each
/// entry carrying a numeric `main.temp` and a non-empty `weather` array.
pub fn assert_forecast_entries(
    data: &Value,
    min_entries: usize,
) -> Result<&[Value], AssertionError> {
    let entries = assert_field(data, "/list")?
        .as_array()
        .ok_or_else(|| AssertionError::Mismatch {
            field: "list".into(),
            expected: "array".into(),
            actual: kind_name(&data["list"]).into(),
        })?;

    if entries.is_empty() || entries.len() < min_entries {
        return Err(AssertionError::TooFewEntries { expected: min_entries.max(1), actual: entries.len() });
    }

    let mut previous: Option<i64> = None;
    for (index, entry) in entries.iter().enumerate() {
        let dt = assert_field(entry, "/dt")?
            .as_i64()
            .ok_or_else(|| AssertionError::Mismatch {
                field: format!("list[{index}].dt"),
                expected: "integer timestamp".into(),
                actual: entry["dt"].to_string(),
            })?;

        if let Some(prev) = previous.filter(|&prev| dt < prev) {
            return Err(AssertionError::Unordered {
                index,
                previous: format_timestamp(prev),
                current: format_timestamp(dt),
            });
        }
        previous = Some(dt);

        assert_number_at(entry, "/main/temp")?;

        let weather_ok = entry
            .get("weather")
            .and_then(Value::as_array)
            .is_some_and(|w| !w.is_empty());
        if !weather_ok {
            return Err(AssertionError::Mismatch {
                field: format!("list[{index}].weather"),
                expected: "non-empty array".into(),
                actual: entry.get("weather").map(Value::to_string).unwrap_or_else(|| "missing".into()),
            });
        }
    }

    Ok(entries.as_slice())
}

pub fn assert_response_time(response: &ApiResponse, max: Duration) -> Result<(), AssertionError> {
    if response.elapsed < max {
        Ok(())
    } else {
        Err(AssertionError::TooSlow { elapsed: response.elapsed, max })
    }
}
