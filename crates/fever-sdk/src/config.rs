//! Configuration types for ConditionEngine

use crate::error::{Result, SdkError};
use anyhow::Context;
use chrono::FixedOffset;
use fever_runtime::clock::parse_offset;
use fever_runtime::{Backend, RelationalDialect};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file, any format the `config` crate recognises
const CONFIG_FILE: &str = "config/fever";

/// Environment variable prefix (`FEVER_TIME_ZONE`, `FEVER_BACKEND`, ...)
const ENV_PREFIX: &str = "FEVER";

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Backend used by `ConditionEngine::render`
    pub backend: Backend,

    /// SQL dialect of relational fragments
    pub dialect: RelationalDialect,

    /// Fixed offset in which relative dates are read (`UTC`, `+08:00`, ...)
    pub time_zone: String,

    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            backend: Backend::default(),
            dialect: RelationalDialect::default(),
            time_zone: "UTC".to_string(),
            log_level: "info".to_string(),
        }
    }

    /// Load from `config/fever.*` (optional) overlaid by `FEVER_*` variables.
    ///
    /// A `.env` file in the working directory is honoured.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::read(config::File::with_name(CONFIG_FILE).required(false))
    }

    /// Load from an explicit file overlaid by `FEVER_*` variables
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::read(config::File::from(path.as_ref()))
    }

    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| SdkError::ConfigError(format!("Invalid YAML configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn read<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Self::build(file).map_err(|e| SdkError::ConfigError(format!("{:#}", e)))?;
        config.validate()?;
        tracing::debug!("Loaded engine configuration: {:?}", config);
        Ok(config)
    }

    fn build<S>(file: S) -> anyhow::Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        self.zone().map(|_| ())
    }

    /// Parsed `time_zone`
    pub fn zone(&self) -> Result<FixedOffset> {
        parse_offset(&self.time_zone).ok_or_else(|| {
            SdkError::ConfigError(format!("Invalid time zone '{}'", self.time_zone))
        })
    }

    /// Set the default backend
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set the SQL dialect
    pub fn with_dialect(mut self, dialect: RelationalDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the time zone
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = time_zone.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();

        assert_eq!(config.backend, Backend::Relational);
        assert_eq!(config.dialect, RelationalDialect::MySql);
        assert_eq!(config.time_zone, "UTC");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.zone().unwrap(), FixedOffset::east_opt(0).unwrap());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = EngineConfig::from_yaml_str(
            r#"
backend: search
time_zone: "+08:00"
"#,
        )
        .unwrap();

        assert_eq!(config.backend, Backend::Search);
        assert_eq!(config.dialect, RelationalDialect::MySql);
        assert_eq!(config.zone().unwrap(), FixedOffset::east_opt(8 * 3600).unwrap());
    }

    #[test]
    fn test_from_yaml_rejects_bad_zone() {
        let err = EngineConfig::from_yaml_str("time_zone: Mars/Olympus").unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn test_from_yaml_rejects_unknown_dialect() {
        let err = EngineConfig::from_yaml_str("dialect: oracle").unwrap_err();
        assert!(err.to_string().contains("Invalid YAML configuration"));
    }

    #[test]
    fn test_from_yaml_accepts_tag_aliases() {
        let config = EngineConfig::from_yaml_str("dialect: postgres\nbackend: elasticsearch").unwrap();
        assert_eq!(config.dialect, RelationalDialect::PostgreSql);
        assert_eq!(config.backend, Backend::Search);

        let config = EngineConfig::from_yaml_str("dialect: MySQL\nbackend: sql").unwrap();
        assert_eq!(config.dialect, RelationalDialect::MySql);
        assert_eq!(config.backend, Backend::Relational);
    }

    #[test]
    fn test_non_ascii_zone_is_config_error() {
        let err = EngineConfig::new().with_time_zone("+1é1").zone().unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
        assert!(EngineConfig::new().with_time_zone("+1é1").validate().is_err());
    }

    #[test]
    fn test_builder_methods() {
        let config = EngineConfig::new()
            .with_backend(Backend::Search)
            .with_dialect(RelationalDialect::Sqlite)
            .with_time_zone("-05:00");

        assert_eq!(config.backend, Backend::Search);
        assert_eq!(config.dialect, RelationalDialect::Sqlite);
        assert_eq!(config.zone().unwrap(), FixedOffset::west_opt(5 * 3600).unwrap());
    }
}
