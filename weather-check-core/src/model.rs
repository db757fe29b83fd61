use serde::{Serialize, Serializer};

use crate::{convert, error::SuiteError};

/// Unit system requested from the API. `Standard` (Kelvin) is the API
/// default and is never sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    #[default]
    Standard,
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Standard => "standard",
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Convert a Kelvin reading into this unit system.
    pub fn from_kelvin(&self, kelvin: f64) -> f64 {
        match self {
            Units::Standard => kelvin,
            Units::Metric => convert::kelvin_to_celsius(kelvin),
            Units::Imperial => convert::kelvin_to_fahrenheit(kelvin),
        }
    }

    fn is_wire_default(units: &Option<Units>) -> bool {
        matches!(units, None | Some(Units::Standard))
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = SuiteError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "standard" | "kelvin" => Ok(Units::Standard),
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(SuiteError::Unknown {
                kind: "units",
                name: value.to_string(),
                supported: "standard, metric, imperial".to_string(),
            }),
        }
    }
}

impl Serialize for Units {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Query for `/weather`. Every field is optional and only present fields
/// end up in the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeatherQuery {
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Units::is_wire_default")]
    pub units: Option<Units>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub city_id: Option<u64>,
}

impl WeatherQuery {
    pub fn for_city(city: impl Into<String>) -> Self {
        Self { city: Some(city.into()), ..Self::default() }
    }

    pub fn for_city_id(city_id: u64) -> Self {
        Self { city_id: Some(city_id), ..Self::default() }
    }

    pub fn for_coordinates(lat: f64, lon: f64) -> Self {
        Self { lat: Some(lat), lon: Some(lon), ..Self::default() }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}

/// Query for `/forecast`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ForecastQuery {
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(rename = "appid", skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Units::is_wire_default")]
    pub units: Option<Units>,
}

impl ForecastQuery {
    pub fn for_city(city: impl Into<String>) -> Self {
        Self { city: Some(city.into()), ..Self::default() }
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }
}

/// Coordinates query where both axes are always sent. An absent axis
/// goes out as an empty value so the API performs its own validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatesQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub api_key: Option<String>,
}

impl CoordinatesQuery {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let axis = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();

        let mut pairs = vec![("lat", axis(self.lat)), ("lon", axis(self.lon))];
        if let Some(key) = &self.api_key {
            pairs.push(("appid", key.clone()));
        }
        pairs
    }
}

/// Parameters for fetching a single "primary" temperature from either
/// resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemperatureRequest {
    pub api_key: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub units: Option<Units>,
}

impl TemperatureRequest {
    pub fn for_city(city: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            city: Some(city.into()),
            ..Self::default()
        }
    }

    pub fn units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    pub fn weather_query(&self) -> WeatherQuery {
        WeatherQuery {
            city: self.city.clone(),
            lat: self.lat,
            lon: self.lon,
            api_key: self.api_key.clone(),
            units: self.units,
            ..WeatherQuery::default()
        }
    }

    pub fn forecast_query(&self) -> ForecastQuery {
        ForecastQuery {
            city: self.city.clone(),
            lat: self.lat,
            lon: self.lon,
            api_key: self.api_key.clone(),
            units: self.units,
        }
    }
}
