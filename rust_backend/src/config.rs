//! Explorer configuration file support.
//!
//! Settings are read from `explorer.toml`. Every section is optional; command
//! line flags override what the file says.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExplorerError, ExplorerResult};
use crate::transformations::{QueryEngine, RoutePair};

/// Explorer configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub explorer: ExplorerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the flight table lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSettings {
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Single-character field separator; inferred from the extension when unset.
    #[serde(default)]
    pub separator: Option<String>,
}

/// Session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerSettings {
    #[serde(default = "default_source")]
    pub default_source: String,
    #[serde(default = "default_destination")]
    pub default_destination: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_source() -> String {
    "Delhi".to_string()
}

fn default_destination() -> String {
    "Mumbai".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            default_source: default_source(),
            default_destination: default_destination(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ExplorerResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ExplorerError::ConfigurationError(format!("Failed to read config file: {}", e))
        })?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ExplorerResult<Self> {
        let config: ExplorerConfig = toml::from_str(content).map_err(|e| {
            ExplorerError::ConfigurationError(format!("Failed to parse config file: {}", e))
        })?;
        config.dataset_separator()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `explorer.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> ExplorerResult<Self> {
        let search_paths = [
            PathBuf::from("explorer.toml"),
            PathBuf::from("rust_backend/explorer.toml"),
            PathBuf::from("../explorer.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ExplorerError::ConfigurationError(
            "No explorer.toml found in standard locations".to_string(),
        ))
    }

    /// The configured separator as a byte, if any.
    pub fn dataset_separator(&self) -> ExplorerResult<Option<u8>> {
        let Some(separator) = &self.dataset.separator else {
            return Ok(None);
        };
        let separator = match separator.as_str() {
            "\\t" | "tab" => "\t",
            other => other,
        };
        match separator.as_bytes() {
            [byte] => Ok(Some(*byte)),
            _ => Err(ExplorerError::ConfigurationError(format!(
                "dataset.separator must be a single ASCII character, got {:?}",
                separator
            ))),
        }
    }
}

impl ExplorerSettings {
    /// The configured pair when the data has it, otherwise the first pair
    /// the data offers.
    pub fn resolve_pair(&self, engine: &QueryEngine) -> Option<RoutePair> {
        let configured = engine
            .destinations_from(&self.default_source)
            .iter()
            .any(|d| *d == self.default_destination);
        if configured {
            return Some(RoutePair::new(
                self.default_source.as_str(),
                self.default_destination.as_str(),
            ));
        }

        engine.airport_names().into_iter().find_map(|source| {
            let destination = engine.destinations_from(&source).into_iter().next()?;
            Some(RoutePair::new(source, destination))
        })
    }
}
