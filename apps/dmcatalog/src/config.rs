//! # Configuration
//!
//! Optional `dmcatalog.toml`:
//!
//! ```toml
//! [catalog]
//! path = "catalog.json"
//!
//! [output]
//! json = false
//!
//! [search]
//! default_sort = "cost:asc"
//!
//! [[rarity]]
//! code = "C"
//! order = 1
//! ```
//!
//! Command-line flags override file values.

use dmcatalog_core::{RarityCode, RarityTable, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "dmcatalog.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
    pub search: SearchConfig,
    #[serde(rename = "rarity")]
    pub rarities: Vec<RarityEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Catalog snapshot (JSON).
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub default_sort: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_sort: "id:asc".to_string(),
        }
    }
}

/// One row of the rarity ordinal table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RarityEntry {
    pub code: String,
    pub order: i32,
}

impl AppConfig {
    /// The rarity ordinal table described by the `[[rarity]]` entries.
    #[must_use]
    pub fn rarity_table(&self) -> RarityTable {
        RarityTable::from_entries(
            self.rarities
                .iter()
                .map(|entry| (RarityCode::new(entry.code.clone()), entry.order)),
        )
    }
}

// =============================================================================
// LOADING
// =============================================================================

/// Load configuration from a file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
    load_config_from_str(&text)
}

/// Load configuration from a TOML string.
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Resolve the configuration for a run.
///
/// An explicit path must exist. Without one, `dmcatalog.toml` in the working
/// directory is used when present, and defaults otherwise.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match explicit {
        Some(path) => load_config(path)?,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                load_config(fallback)?
            } else {
                tracing::debug!("No configuration file, using defaults");
                AppConfig::default()
            }
        }
    };
    validate_config(&config)?;
    Ok(config)
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate configuration:
/// - rarity codes are unique and non-blank
/// - every part of the default sort is a known `field:direction` pair
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let mut seen = BTreeSet::new();
    for entry in &config.rarities {
        if entry.code.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "rarity.code cannot be blank".to_string(),
            ));
        }
        if !seen.insert(entry.code.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate rarity code {:?}",
                entry.code
            )));
        }
    }

    for part in config.search.default_sort.split(',') {
        part.parse::<SortSpec>()
            .map_err(|e| ConfigError::ValidationError(format!("search.default_sort: {e}")))?;
    }

    Ok(())
}
