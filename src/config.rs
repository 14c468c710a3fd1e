use serde::Deserialize;
use thiserror::Error;

use crate::classify::{Classifier, FixedLabel, RuleSet};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("no classifier configured: set `profile` or `rules`")]
    NoClassifier,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Fixed profile for every sample; takes precedence over `rules`.
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub rules: Option<RuleSet>,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Strip legacy track ids from written records.
    #[serde(default)]
    pub upgrade_legacy: bool,
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn classifier(&self) -> Result<Box<dyn Classifier>, ConfigError> {
        if let Some(profile) = &self.profile {
            return Ok(Box::new(FixedLabel(profile.clone())));
        }
        match &self.rules {
            Some(rules) => Ok(Box::new(rules.clone())),
            None => Err(ConfigError::NoClassifier),
        }
    }
}
