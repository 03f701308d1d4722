//! Factory configuration.
//!
//! Each adapter instance carries a [`FactoryConfig`]. It can be built in code
//! or loaded from a TOML file:
//!
//! ```toml
//! label = "classpath"
//! log_unresolved = true
//! implicit_java_lang = true
//! max_array_dimensions = 255
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// JVM limit on array dimensions (JVMS §4.3.2)
pub const MAX_JVM_ARRAY_DIMENSIONS: usize = 255;

/// Configuration of one symbol factory instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FactoryConfig {
    /// Context label used in log messages (e.g. `classpath`, `source`).
    #[serde(default = "default_label")]
    pub label: String,

    /// Emit a debug record every time a reference degrades to an
    /// unresolved symbol.
    #[serde(default = "default_true")]
    pub log_unresolved: bool,

    /// Resolve simple names against `java.lang` when nothing else matches.
    #[serde(default = "default_true")]
    pub implicit_java_lang: bool,

    /// Upper bound on dimensions accepted by `resolve_type_ref`.
    #[serde(default = "default_max_array_dimensions")]
    pub max_array_dimensions: usize,
}

fn default_label() -> String {
    "symbols".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_array_dimensions() -> usize {
    MAX_JVM_ARRAY_DIMENSIONS
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            log_unresolved: true,
            implicit_java_lang: true,
            max_array_dimensions: default_max_array_dimensions(),
        }
    }
}

impl FactoryConfig {
    /// Default configuration with the given label
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: FactoryConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.label.trim().is_empty() {
            return Err(ConfigError::Invalid("label must not be empty".to_string()));
        }
        if !(1..=MAX_JVM_ARRAY_DIMENSIONS).contains(&self.max_array_dimensions) {
            return Err(ConfigError::Invalid(format!(
                "max_array_dimensions must be within 1..={}, got {}",
                MAX_JVM_ARRAY_DIMENSIONS, self.max_array_dimensions
            )));
        }
        Ok(())
    }
}
