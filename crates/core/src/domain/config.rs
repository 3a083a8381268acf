//! Extraction configuration
//!
//! This module provides:
//! - The document locations read by the metadata parser and device discoverer
//! - A built-in profile covering VENUE 4.x and D-Show 3.x exports, in both
//!   the Patch List and System Info layouts
//! - TOML overrides for report variants the built-in profile does not know
//!
//! Every location is a list of candidate path expressions tried in order;
//! the first one that matches something wins.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Where the show metadata lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataQueries {
    /// Console identification; may already carry the version (D-Show)
    pub console: Vec<String>,

    /// Version cell, when the generation puts it next to the console name
    pub version: Vec<String>,

    /// Show path
    pub show: Vec<String>,

    /// Labels stripped from the front of the show text
    pub show_labels: Vec<String>,
}

impl Default for MetadataQueries {
    fn default() -> Self {
        Self {
            console: strings(&[
                "//table[@class='header']//td[@class='console']",
                "//h1[@class='console']",
            ]),
            version: strings(&["//table[@class='header']//td[@class='version']"]),
            show: strings(&[
                "//table[@class='header']//td[@class='show']",
                "//p[@class='show']",
            ]),
            show_labels: strings(&["Show:", "Show Name:"]),
        }
    }
}

/// Where the device blocks and their channel tables live
///
/// Everything except `blocks` is evaluated relative to a block; `rows` is
/// relative to a channel table and the cell expressions to a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceQueries {
    pub blocks: Vec<String>,
    pub name: Vec<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub rows: String,
    pub index_cell: String,
    pub name_cell: String,
}

impl Default for DeviceQueries {
    fn default() -> Self {
        Self {
            blocks: strings(&["//div[@class='device']", "//table[@id='device']"]),
            name: strings(&["h2", "tr[1]/th"]),
            inputs: strings(&["table[@class='inputs']", ".//table[@id='inputs']"]),
            outputs: strings(&["table[@class='outputs']", ".//table[@id='outputs']"]),
            rows: "tr[td]".to_string(),
            index_cell: "td[1]".to_string(),
            name_cell: "td[2]".to_string(),
        }
    }
}

/// Complete extraction configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub metadata: MetadataQueries,
    pub devices: DeviceQueries,
}

impl ExtractorConfig {
    /// Parse a TOML override; missing tables and keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        debug!("Extractor configuration parsed");
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject locations that can never match
    pub fn validate(&self) -> Result<()> {
        let lists = [
            ("metadata.console", &self.metadata.console),
            ("metadata.show", &self.metadata.show),
            ("devices.blocks", &self.devices.blocks),
            ("devices.name", &self.devices.name),
        ];
        for (key, candidates) in lists {
            if candidates.iter().all(|c| c.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!("{key} has no expressions")));
            }
        }

        let single = [
            ("devices.rows", &self.devices.rows),
            ("devices.index_cell", &self.devices.index_cell),
            ("devices.name_cell", &self.devices.name_cell),
        ];
        for (key, expression) in single {
            if expression.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{key} is empty")));
            }
        }

        Ok(())
    }
}
