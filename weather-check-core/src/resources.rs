//! Static reference data: JSON schemas and the city list.
//!
//! Both ship inside the binary; a resources directory on disk can replace
//! them.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::assertions::AssertionError;

pub const SCHEMA_DIR: &str = "schemas";
pub const CITIES_FILE: &str = "data/cities.json";

const BUNDLED_SCHEMAS: &[(&str, &str)] = &[
    ("weather", include_str!("../schemas/weather.json")),
    ("forecast", include_str!("../schemas/forecast.json")),
];

const BUNDLED_CITIES: &str = include_str!("../data/cities.json");

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path} as JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Bundled resource '{name}' is not valid: {source}")]
    Bundled {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No bundled schema named '{0}'")]
    UnknownSchema(String),

    #[error("Schema '{name}' does not compile: {reason}")]
    InvalidSchema { name: String, reason: String },
}

pub fn load_json(path: &Path) -> Result<Value, ResourceError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| ResourceError::Read { path: path.to_path_buf(), source })?;

    serde_json::from_str(&contents)
        .map_err(|source| ResourceError::Parse { path: path.to_path_buf(), source })
}

/// A compiled JSON Schema plus the name it was loaded under.
pub struct Schema {
    name: String,
    validator: Validator,
}

impl Schema {
    pub fn compile(name: impl Into<String>, document: &Value) -> Result<Self, ResourceError> {
        let name = name.into();
        let validator = jsonschema::validator_for(document).map_err(|e| {
            ResourceError::InvalidSchema { name: name.clone(), reason: e.to_string() }
        })?;

        Ok(Self { name, validator })
    }

    /// Load `schemas/{name}.json` below `resources_dir`.
    pub fn load(resources_dir: &Path, name: &str) -> Result<Self, ResourceError> {
        let path = resources_dir.join(SCHEMA_DIR).join(format!("{name}.json"));
        debug!(path = %path.display(), "loading schema");
        Self::compile(name, &load_json(&path)?)
    }

    /// The copy of `schemas/{name}.json` compiled into the crate.
    pub fn bundled(name: &str) -> Result<Self, ResourceError> {
        let (_, raw) = BUNDLED_SCHEMAS
            .iter()
            .find(|(n, _)| *n == name)
            .ok_or_else(|| ResourceError::UnknownSchema(name.to_string()))?;

        let document: Value = serde_json::from_str(raw)
            .map_err(|source| ResourceError::Bundled { name: format!("{name}.json"), source })?;
        Self::compile(name, &document)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate and collect every violation into one assertion failure.
    pub fn validate(&self, instance: &Value) -> Result<(), AssertionError> {
        let errors: Vec<String> = self.validator.iter_errors(instance).map(|e| e.to_string()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AssertionError::Schema { schema: self.name.clone(), errors })
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Load the ordered city list (`data/cities.json`, a JSON array of names).
pub fn load_cities(resources_dir: &Path) -> Result<Vec<String>, ResourceError> {
    let path = resources_dir.join(CITIES_FILE);
    serde_json::from_value(load_json(&path)?).map_err(|source| ResourceError::Parse { path, source })
}

pub fn bundled_cities() -> Result<Vec<String>, ResourceError> {
    serde_json::from_str(BUNDLED_CITIES)
        .map_err(|source| ResourceError::Bundled { name: CITIES_FILE.to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bundled() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn bundled_schemas_compile() {
        for name in ["weather", "forecast"] {
            let schema = Schema::load(&bundled(), name).expect("bundled schema should load");
            assert_eq!(schema.name(), name);
        }
    }

    #[test]
    fn bundled_city_list_is_not_empty() {
        let cities = load_cities(&bundled()).expect("bundled cities should load");
        assert!(!cities.is_empty());
        assert!(cities.iter().any(|c| c == "Warsaw"));
    }

    #[test]
    fn embedded_resources_match_the_files_on_disk() {
        assert_eq!(bundled_cities().expect("bundled cities"), load_cities(&bundled()).expect("cities on disk"));

        for name in ["weather", "forecast"] {
            let schema = Schema::bundled(name).expect("bundled schema should compile");
            assert_eq!(schema.name(), name);
        }
    }

    #[test]
    fn unknown_bundled_schema_is_rejected() {
        let err = Schema::bundled("onecall").unwrap_err();
        assert!(matches!(err, ResourceError::UnknownSchema(name) if name == "onecall"));
    }

    #[test]
    fn city_list_of_wrong_shape_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("data")).expect("mkdir");
        fs::write(dir.path().join(CITIES_FILE), r#"{ "city": "Warsaw" }"#).expect("write");

        let err = load_cities(dir.path()).unwrap_err();
        assert!(matches!(err, ResourceError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_json(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ResourceError::Read { .. }));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("write");

        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, ResourceError::Parse { .. }));
    }

    #[test]
    fn invalid_schema_is_rejected() {
        let err = Schema::compile("bad", &json!({ "type": 12 })).unwrap_err();
        assert!(err.to_string().contains("Schema 'bad' does not compile"));
    }

    #[test]
    fn validate_lists_violations() {
        let schema = Schema::compile(
            "point",
            &json!({
                "type": "object",
                "required": ["lat", "lon"],
                "properties": { "lat": { "type": "number" }, "lon": { "type": "number" } }
            }),
        )
        .expect("schema should compile");

        assert!(schema.validate(&json!({ "lat": 1.0, "lon": 2.0 })).is_ok());

        let err = schema.validate(&json!({ "lat": "north" })).unwrap_err();
        match err {
            AssertionError::Schema { schema, errors } => {
                assert_eq!(schema, "point");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
