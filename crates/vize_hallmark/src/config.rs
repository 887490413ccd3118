//! Lint configuration.
//!
//! Rule settings are read from TOML or JSON:
//!
//! ```toml
//! [rules]
//! "vue/require-emit-validator" = "error"
//! ```
//!
//! ```json
//! { "rules": { "vue/require-emit-validator": "off" } }
//! ```
//!
//! Rules without an entry run at their default severity.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::diagnostic::Severity;
use crate::rule::{RuleMeta, RuleRegistry};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured rule is not registered.
    #[error("unknown rule: {0}")]
    UnknownRule(String),
}

/// Setting for a single rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSetting {
    Off,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl RuleSetting {
    /// Severity to report with, `None` when the rule is disabled
    #[inline]
    pub fn severity(self) -> Option<Severity> {
        match self {
            Self::Off => None,
            Self::Warn => Some(Severity::Warning),
            Self::Error => Some(Severity::Error),
        }
    }
}

/// Top-level lint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Per-rule settings keyed by rule name.
    #[serde(default)]
    pub rules: FxHashMap<String, RuleSetting>,
}

impl LintConfig {
    /// Parse a TOML config
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse a JSON config
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a config file; `.json` files are read as JSON, anything else as TOML
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            rules = config.rules.len(),
            "loaded lint config"
        );
        Ok(config)
    }

    /// Override the setting of one rule
    pub fn set(&mut self, rule: impl Into<String>, setting: RuleSetting) -> &mut Self {
        self.rules.insert(rule.into(), setting);
        self
    }

    /// Effective severity for a rule, `None` when it is turned off
    #[inline]
    pub fn severity_for(&self, meta: &RuleMeta) -> Option<Severity> {
        match self.rules.get(meta.name) {
            Some(setting) => setting.severity(),
            None => Some(meta.default_severity),
        }
    }

    /// Check that every configured rule exists in the registry
    pub fn validate(&self, registry: &RuleRegistry) -> Result<(), ConfigError> {
        let mut unknown: Vec<&str> = self
            .rules
            .keys()
            .map(String::as_str)
            .filter(|name| registry.get(name).is_none())
            .collect();
        unknown.sort_unstable();

        match unknown.first() {
            Some(name) => Err(ConfigError::UnknownRule((*name).to_string())),
            None => Ok(()),
        }
    }
}
