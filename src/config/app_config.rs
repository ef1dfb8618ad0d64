use serde::Deserialize;

use crate::domain::DomainError;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub repository: RepositoryConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where model documents are kept
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// JSON file holding an array of model documents
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: "data/models.json".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `config/default`, `config/local` and `MODEL_SHARE__*` environment variables
    pub fn load() -> Result<Self, DomainError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("MODEL_SHARE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error_to_domain)?;

        Self::from_config(config)
    }

    /// Deserialize an already assembled configuration
    pub fn from_config(config: config::Config) -> Result<Self, DomainError> {
        config.try_deserialize().map_err(config_error_to_domain)
    }
}

fn config_error_to_domain(error: config::ConfigError) -> DomainError {
    DomainError::configuration(error.to_string())
}
