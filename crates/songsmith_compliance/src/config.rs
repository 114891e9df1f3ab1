//! Compliance engine configuration
//!
//! Loaded from TOML, e.g.:
//!
//! ```toml
//! enabled_categories = ["copyright", "privacy"]
//! strict_mode = true
//!
//! [[custom_rules]]
//! id = "label-name"
//! name = "Label name"
//! category = "trademark"
//! severity = "caution"
//! matcher = { keywords = ["acme records"] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::rules::ComplianceRule;
use crate::types::RuleCategory;

#[derive(Error, Debug)]
pub enum ComplianceConfigError {
    #[error("failed to read or write config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Engine-scoped settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Categories whose rules run
    #[serde(default = "default_enabled_categories")]
    pub enabled_categories: Vec<RuleCategory>,

    /// Extra per-issue deduction
    #[serde(default)]
    pub strict_mode: bool,

    /// Rules appended to the built-in set
    #[serde(default)]
    pub custom_rules: Vec<ComplianceRule>,
}

fn default_enabled_categories() -> Vec<RuleCategory> {
    RuleCategory::ALL.to_vec()
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            enabled_categories: default_enabled_categories(),
            strict_mode: false,
            custom_rules: Vec::new(),
        }
    }
}

impl ComplianceConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ComplianceConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ComplianceConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ComplianceConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ComplianceConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn is_category_enabled(&self, category: RuleCategory) -> bool {
        self.enabled_categories.contains(&category)
    }

    /// Merge the fields present in `update`.
    pub fn apply(&mut self, update: ComplianceConfigUpdate) {
        if let Some(categories) = update.enabled_categories {
            self.enabled_categories = categories;
        }
        if let Some(strict_mode) = update.strict_mode {
            self.strict_mode = strict_mode;
        }
        if let Some(rules) = update.custom_rules {
            self.custom_rules = rules;
        }
    }
}

/// Partial settings for [`ComplianceConfig::apply`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceConfigUpdate {
    #[serde(default)]
    pub enabled_categories: Option<Vec<RuleCategory>>,
    #[serde(default)]
    pub strict_mode: Option<bool>,
    #[serde(default)]
    pub custom_rules: Option<Vec<ComplianceRule>>,
}
