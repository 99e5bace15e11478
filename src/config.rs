//! Search limits for the shape and voicing searches.
//!
//! ```
//! use banjo_chords::SearchConfig;
//!
//! let config = SearchConfig::from_yaml("max_reach: 4").unwrap();
//! assert_eq!(config.max_reach, 4);
//! assert_eq!(config.max_fret, 15);
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::BanjoError;

/// Search limits, loaded from an optional YAML file.
/// Every field has a default, so the file may set any subset of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Highest fret scanned by the shape search.
    pub max_fret: u8,
    /// Largest fretted span allowed inside a full shape.
    pub max_reach: u8,
    /// Fewest adjacent strings in a full shape (capped by the active string count).
    pub min_strings: usize,
    /// Highest fret scanned by the single diagram voicing search.
    pub voicing_max_fret: u8,
    /// Largest fretted span allowed in a diagram voicing.
    pub voicing_max_reach: u8,
    /// Most fretting fingers a diagram voicing may use.
    pub max_fingers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_fret: 15,
            max_reach: 5,
            min_strings: 3,
            voicing_max_fret: 12,
            voicing_max_reach: 4,
            max_fingers: 4,
        }
    }
}

impl SearchConfig {
    /// Parse a config from YAML text.
    pub fn from_yaml(source: &str) -> Result<Self, BanjoError> {
        serde_yaml::from_str(source).map_err(|e| BanjoError::ConfigError(e.to_string()))
    }

    /// Load a config file.
    /// Returns defaults when the file doesn't exist or can't be read or parsed,
    /// logging a warning in the latter cases.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_yaml(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }
}
