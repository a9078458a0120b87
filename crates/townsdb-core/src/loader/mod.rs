// crates/townsdb-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (directory layout, I/O, decompression) and
//! hands the parsed tables to [`crate::model::convert`]. The dataset itself
//! is produced by an external acquisition pipeline; this module only reads
//! a finished one.

pub mod cache;
pub mod common_io;

use crate::common::raw::{CountriesRaw, CountryAliasesRaw, ProvincesRaw, TownsRaw};
use crate::config::GazetteerConfig;
use crate::error::{Result, TownsDbError};
use crate::model::convert;
use crate::model::{CountryTowns, Gazetteer};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

pub const COUNTRIES_TABLE: &str = "CountriesDB.json";
pub const ALIASES_TABLE: &str = "CountryAliasDB.json";
pub const PROVINCES_TABLE: &str = "ProvinceDB.json";

/// Load the dataset tables in `path` without touching any cache.
pub fn load(path: impl AsRef<Path>) -> Result<Gazetteer> {
    Gazetteer::load(path)
}

impl Gazetteer {
    /// **Standard Loader:** parse and validate the JSON tables in `path`.
    ///
    /// Fails with a load error (see [`TownsDbError::is_load_error`]) when a
    /// required table is missing or any table breaks the schema.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_tables(path, None)
    }

    /// Like [`Gazetteer::load`], keeping only the listed ISO2 countries.
    /// Town tables of other countries are not parsed at all.
    pub fn load_tables(path: impl AsRef<Path>, filter: Option<&[&str]>) -> Result<Self> {
        let dir = path.as_ref();
        if !dir.is_dir() {
            return Err(TownsDbError::NotFound(format!(
                "dataset directory {} does not exist",
                dir.display()
            )));
        }

        let countries_raw: CountriesRaw =
            common_io::read_json(&common_io::find_table(dir, COUNTRIES_TABLE)?)?;
        let aliases_raw: CountryAliasesRaw =
            common_io::read_json(&common_io::find_table(dir, ALIASES_TABLE)?)?;
        let provinces_raw: ProvincesRaw =
            common_io::read_json(&common_io::find_table(dir, PROVINCES_TABLE)?)?;

        let countries = convert::countries_from_raw(countries_raw)?;
        let aliases = convert::aliases_from_raw(aliases_raw)?;
        let provinces = convert::provinces_from_raw(provinces_raw)?;

        let wanted = |code: &str| {
            filter.map_or(true, |f| f.is_empty() || f.iter().any(|k| k.eq_ignore_ascii_case(code)))
        };

        let mut towns = BTreeMap::new();
        for (stem, table_path) in common_io::town_tables(dir)? {
            let code = countries
                .iter()
                .find(|c| c.code.eq_ignore_ascii_case(&stem))
                .map(|c| c.code.clone())
                .ok_or_else(|| {
                    TownsDbError::InvalidData(format!(
                        "town table {} does not belong to a known country",
                        table_path.display()
                    ))
                })?;
            if !wanted(&code) {
                continue;
            }
            if towns.contains_key(&code) {
                return Err(TownsDbError::InvalidData(format!(
                    "more than one town table for {code}"
                )));
            }
            let raw: TownsRaw = common_io::read_json(&table_path)?;
            let table: CountryTowns = convert::towns_from_raw(&code, raw)?;
            debug!(country = %code, towns = table.towns().len(), "loaded town table");
            towns.insert(code, table);
        }

        let db = Gazetteer::new(countries, aliases, provinces, towns)?;
        let db = match filter {
            Some(f) if !f.is_empty() => db.retain_countries(f),
            _ => db,
        };

        let stats = db.stats();
        info!(
            path = %dir.display(),
            countries = stats.countries,
            towns = stats.towns,
            "gazetteer loaded"
        );
        Ok(db)
    }

    /// Load following a [`GazetteerConfig`]: country filter, and the binary
    /// cache when `use_cache` is set (read if fresh, rebuilt otherwise).
    pub fn load_with(config: &GazetteerConfig) -> Result<Self> {
        let filter = config.country_filter();
        let filter = filter.as_deref();
        if config.use_cache {
            Self::load_via_cache(&config.data_dir, filter)
        } else {
            Self::load_tables(&config.data_dir, filter)
        }
    }
}
