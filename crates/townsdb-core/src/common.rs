// crates/townsdb-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the gazetteer.
///
/// Returned by [`crate::Gazetteer::stats`], these counts reflect the
/// materialized in-memory dataset after any country filter applied at load
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub countries: usize,
    pub aliases: usize,
    pub provinces: usize,
    pub towns: usize,
    pub town_aliases: usize,
}

/// Shared Raw Input: the column-oriented tables exactly as the acquisition
/// pipeline writes them. Every table is an object of parallel arrays.
///
/// NOTE: these types mirror the external dataset; they are converted and
/// validated by [`crate::model::convert`] and are not part of the public API.
#[doc(hidden)]
pub mod raw {
    use serde::Deserialize;

    /// `CountriesDB.json`
    #[derive(Debug, Default, Deserialize)]
    pub struct CountriesRaw {
        #[serde(rename = "id2c")]
        pub code: Vec<Option<String>>,
        #[serde(rename = "id3c", default)]
        pub code3: Vec<Option<String>>,
        #[serde(rename = "id3n", default)]
        pub numeric: Vec<Option<String>>,
        #[serde(rename = "idFips", default)]
        pub fips: Vec<Option<String>>,
        #[serde(rename = "country")]
        pub name: Vec<Option<String>>,
        #[serde(default)]
        pub capital: Vec<Option<String>>,
        #[serde(default)]
        pub area: Vec<Option<f64>>,
        #[serde(default)]
        pub population: Vec<Option<u64>>,
        #[serde(rename = "id_continent", default)]
        pub continent: Vec<Option<String>>,
    }

    /// `CountryAliasDB.json`
    #[derive(Debug, Default, Deserialize)]
    pub struct CountryAliasesRaw {
        #[serde(rename = "countryAlias")]
        pub alias: Vec<Option<String>>,
        #[serde(rename = "countryID")]
        pub country: Vec<Option<String>>,
    }

    /// `ProvinceDB.json`
    #[derive(Debug, Default, Deserialize)]
    pub struct ProvincesRaw {
        pub province: Vec<Option<String>>,
        #[serde(rename = "countryID")]
        pub country: Vec<Option<String>>,
    }

    /// `XX.json`: the towns of one country plus its alias table.
    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "PascalCase")]
    pub struct TownsRaw {
        #[serde(default)]
        pub town_index: Vec<Option<i64>>,
        pub town_name: Vec<Option<String>>,
        #[serde(default)]
        pub latitude: Vec<Option<f64>>,
        #[serde(default)]
        pub longitude: Vec<Option<f64>>,
        #[serde(default)]
        pub province: Vec<Option<String>>,
        #[serde(default)]
        pub county: Vec<Option<String>>,
        #[serde(rename = "Address2", default)]
        pub sub_address: Vec<Option<String>>,
        #[serde(default)]
        pub town_class: Vec<Option<String>>,
        #[serde(default)]
        pub population: Vec<Option<u64>>,
        #[serde(default)]
        pub aliases: Vec<Option<String>>,
        #[serde(default)]
        pub alias_index: Vec<Option<i64>>,
    }
}
