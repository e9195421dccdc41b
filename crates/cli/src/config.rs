//! Optional TOML configuration.
//!
//! ```toml
//! language = "en"
//! currency = "DA"
//! [engine]
//! duplicate_entries = "merge"
//! daughters_without_son = "residue"
//! balance_tolerance = "0.000001"
//! ```

use std::path::Path;

use mirath_core::{DaughterShare, DuplicatePolicy, EngineOptions, Language, ValidationPolicy};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub language: Language,
    pub currency: String,
    pub engine: EngineSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EngineSection {
    pub duplicate_entries: DuplicatePolicy,
    pub daughters_without_son: DaughterShare,
    pub balance_tolerance: Decimal,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: Language::English,
            currency: "DA".to_string(),
            engine: EngineSection::default(),
        }
    }
}

impl Default for EngineSection {
    fn default() -> Self {
        let options = EngineOptions::default();
        EngineSection {
            duplicate_entries: DuplicatePolicy::default(),
            daughters_without_son: options.daughters_without_son,
            balance_tolerance: options.balance_tolerance,
        }
    }
}

impl Config {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Config, String> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("error reading config '{}': {}", path.display(), e))?;
        Config::parse(&text).map_err(|e| format!("error parsing config '{}': {}", path.display(), e))
    }

    pub fn parse(text: &str) -> Result<Config, String> {
        let config: Config = toml::from_str(text).map_err(|e| e.to_string())?;
        if config.engine.balance_tolerance < Decimal::ZERO {
            return Err("engine.balance_tolerance must not be negative".to_string());
        }
        Ok(config)
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            duplicates: self.engine.duplicate_entries,
        }
    }

    pub fn options(&self) -> EngineOptions {
        EngineOptions {
            language: self.language,
            daughters_without_son: self.engine.daughters_without_son,
            balance_tolerance: self.engine.balance_tolerance,
        }
    }
}
