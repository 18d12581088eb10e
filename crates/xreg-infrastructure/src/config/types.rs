//! Configuration types

use crate::constants::DEFAULT_LOG_LEVEL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use xreg_registry::{FeatureSet, RegistryOptions};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub registry: RegistryConfig,
    pub logging: LoggingConfig,
}

/// How manifests are resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Feature names defined for conditional blocks
    pub features: Vec<String>,

    /// Treat version tag regressions as errors
    pub strict_versions: bool,
}

impl RegistryConfig {
    pub fn to_options(&self) -> RegistryOptions {
        RegistryOptions {
            strict_versions: self.strict_versions,
        }
    }

    pub fn feature_set(&self) -> FeatureSet {
        self.features.iter().map(String::as_str).collect()
    }

    /// Add features not already configured, keeping declaration order
    pub fn add_features<I, S>(&mut self, features: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for feature in features {
            let feature = feature.into();
            if !self.features.contains(&feature) {
                self.features.push(feature);
            }
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to a daily-rolling file in addition to stderr
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
        }
    }
}
