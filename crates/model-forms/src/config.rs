// File: src/config.rs
// Purpose: Configuration parsing from model-forms.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Form engine configuration, loaded from `model-forms.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FormsConfig {
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub fields: FieldsConfig,
}

/// Property analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Property names treated as required, compared case-insensitively
    #[serde(default = "default_required_fields")]
    pub required_fields: Vec<String>,
}

/// Bounds for the rules derived per semantic type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_string_min_length")]
    pub string_min_length: usize,

    #[serde(default = "default_string_max_length")]
    pub string_max_length: usize,

    /// Integers must lie in `[-integer_bound, integer_bound]`
    #[serde(default = "default_integer_bound")]
    pub integer_bound: f64,

    /// Reals must lie in `[-real_bound, real_bound]`
    #[serde(default = "default_real_bound")]
    pub real_bound: f64,
}

/// Field widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldsConfig {
    #[serde(default = "default_integer_step")]
    pub integer_step: i64,

    #[serde(default = "default_real_step")]
    pub real_step: f64,
}

// Default values
fn default_required_fields() -> Vec<String> {
    ["id", "date", "title", "name"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_string_min_length() -> usize {
    1
}

fn default_string_max_length() -> usize {
    500
}

fn default_integer_bound() -> f64 {
    999_999.0
}

fn default_real_bound() -> f64 {
    999_999.99
}

fn default_integer_step() -> i64 {
    1
}

fn default_real_step() -> f64 {
    0.1
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            required_fields: default_required_fields(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            string_min_length: default_string_min_length(),
            string_max_length: default_string_max_length(),
            integer_bound: default_integer_bound(),
            real_bound: default_real_bound(),
        }
    }
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            integer_step: default_integer_step(),
            real_step: default_real_step(),
        }
    }
}

impl FormsConfig {
    /// Load from `model-forms.toml` in the current directory.
    /// Returns default config if the file doesn't exist or fails to parse.
    pub fn load() -> Self {
        Self::load_from("model-forms.toml")
    }

    /// Load from a specific path.
    /// Returns default config if the file doesn't exist or fails to parse.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load form config, using defaults");
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse model-forms config")
    }
}
