// crates/townsdb-core/src/config.rs
use crate::error::{Result, TownsDbError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default score for immediate, tier-level acceptance.
pub const DEFAULT_THRESHOLD: f64 = 0.95;
/// Default last-resort score applied to the best candidate of all tiers.
pub const DEFAULT_LOWEST_ALLOWED_THRESHOLD: f64 = 0.65;

/// Acceptance thresholds of the resolvers.
///
/// A tier whose best score is `>= accept` wins immediately. When no tier
/// does, the best candidate seen anywhere is accepted only if its score is
/// strictly `> last_resort`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub accept: f64,
    pub last_resort: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            accept: DEFAULT_THRESHOLD,
            last_resort: DEFAULT_LOWEST_ALLOWED_THRESHOLD,
        }
    }
}

impl Thresholds {
    pub fn new(accept: f64, last_resort: f64) -> Self {
        Self {
            accept,
            last_resort,
        }
    }
}

/// Everything needed to load a gazetteer and resolve against it.
///
/// Built by the caller (for example from CLI flags or a JSON file) and passed
/// explicitly to the loader; nothing in this crate reads global settings.
///
/// ```json
/// {
///   "data_dir": "./DataBaseLocal/CountryInfo",
///   "countries": ["IE", "GB"],
///   "use_cache": true,
///   "thresholds": { "accept": 0.95, "last_resort": 0.65 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GazetteerConfig {
    /// Directory holding `CountriesDB.json`, `CountryAliasDB.json`,
    /// `ProvinceDB.json` and one `XX.json` per country.
    pub data_dir: PathBuf,
    /// Optional ISO2 filter; `None` keeps every country.
    pub countries: Option<Vec<String>>,
    /// Read and refresh the binary cache next to the tables.
    pub use_cache: bool,
    pub thresholds: Thresholds,
}

impl Default for GazetteerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./DataBaseLocal/CountryInfo"),
            countries: None,
            use_cache: true,
            thresholds: Thresholds::default(),
        }
    }
}

impl GazetteerConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            TownsDbError::NotFound(format!("config file {}: {e}", path.display()))
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The country filter as borrowed slices, the shape the loaders take.
    pub fn country_filter(&self) -> Option<Vec<&str>> {
        self.countries
            .as_ref()
            .map(|v| v.iter().map(|s| s.trim()).filter(|s| !s.is_empty()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let t = Thresholds::default();
        assert_eq!(t.accept, 0.95);
        assert_eq!(t.last_resort, 0.65);
        assert!(GazetteerConfig::default().use_cache);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: GazetteerConfig =
            serde_json::from_str(r#"{ "data_dir": "/data", "thresholds": { "accept": 0.9 } }"#)
                .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/data"));
        assert_eq!(cfg.thresholds.accept, 0.9);
        assert_eq!(cfg.thresholds.last_resort, 0.65);
        assert_eq!(cfg.countries, None);
    }

    #[test]
    fn country_filter_trims_and_drops_blanks() {
        let cfg = GazetteerConfig {
            countries: Some(vec![" IE".into(), "".into(), "gb ".into()]),
            ..GazetteerConfig::default()
        };
        assert_eq!(cfg.country_filter(), Some(vec!["IE", "gb"]));
    }

    #[test]
    fn missing_config_file_is_not_found() {
        let err = GazetteerConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, TownsDbError::NotFound(_)));
    }
}
