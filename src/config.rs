use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetConfig {
    /// Recipe dataset to load when the CLI is not given `--dataset`
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> String {
    "recipe_dataset.csv".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlannerConfig {
    /// Fixed seed for reproducible weekly plans. Unset means a fresh plan
    /// on every run.
    #[serde(default)]
    pub default_seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Emit logs as JSON instead of human-readable lines
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (WEEKPLATE__DATASET__PATH, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("dataset.path", default_dataset_path())?
            .set_default("observability.log_level", default_log_level())?
            .set_default("observability.json_logs", false)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "weekplate.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("WEEKPLATE")
                .separator("__")
                .try_parsing(true),
        );

        // Also support the plain dataset variable without section prefix
        if let Ok(dataset_path) = env::var("WEEKPLATE_DATASET") {
            builder = builder.set_override("dataset.path", dataset_path)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.dataset.path.trim().is_empty() {
            return Err("Dataset path must not be empty".to_string());
        }
        if self.observability.log_level.trim().is_empty() {
            return Err("Log level must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dataset.path, "recipe_dataset.csv");
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.json_logs);
        assert_eq!(config.planner.default_seed, None);
    }

    #[test]
    fn test_validation_empty_dataset_path() {
        let config = Config {
            dataset: DatasetConfig {
                path: "   ".to_string(),
            },
            planner: PlannerConfig::default(),
            observability: ObservabilityConfig::default(),
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_log_level() {
        let config = Config {
            dataset: DatasetConfig::default(),
            planner: PlannerConfig::default(),
            observability: ObservabilityConfig {
                log_level: String::new(),
                json_logs: true,
            },
        };

        assert!(config.validate().is_err());
    }
}
