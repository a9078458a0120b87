// crates/townsdb-core/src/model/domain.rs
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// The master gazetteer.
///
/// Built once (by the loader or [`Gazetteer::new`]) and never mutated
/// afterwards, so a single instance can be shared by reference across any
/// number of threads resolving queries concurrently.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "GazetteerTables")]
pub struct Gazetteer {
    /// Master list of countries, in dataset order. Unique by `code`.
    pub(crate) countries: Vec<CountryRecord>,
    /// Country aliases (nicknames, language variants, abbreviations).
    pub(crate) aliases: Vec<AliasRecord>,
    /// Provinces of every country. Names may repeat across countries.
    pub(crate) provinces: Vec<ProvinceRecord>,
    /// Per-country town tables keyed by ISO2 code.
    /// A `BTreeMap` so that iteration is lexicographic by code.
    pub(crate) towns: BTreeMap<String, CountryTowns>,

    /// Upper-cased ISO2 -> position in `countries`.
    /// Derived state: not cached on disk, rebuilt on first use.
    #[serde(skip)]
    pub(crate) code_index: OnceCell<HashMap<String, usize>>,
}

/// A country entry (ISO-3166 conventions).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// ISO-3166 alpha-2, e.g. "IE". Primary key.
    pub code: String,
    /// ISO-3166 alpha-3, e.g. "IRL".
    pub code3: Option<String>,
    /// ISO-3166 numeric, e.g. "372".
    pub numeric: Option<String>,
    pub fips: Option<String>,
    pub name: String,
    pub capital: Option<String>,
    pub area_km2: Option<f64>,
    pub population: Option<u64>,
    /// Two-letter continent code, e.g. "EU".
    pub continent: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub alias: String,
    pub country_code: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceRecord {
    pub name: String,
    pub country_code: String,
}

/// A town entry. `index` is the town's position inside its country's table
/// and is only unique within that country.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TownRecord {
    pub index: usize,
    /// Row number reported by the upstream source, if any.
    pub source_row: Option<i64>,
    pub name: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub population: Option<u64>,
    pub province: Option<String>,
    pub county: Option<String>,
    pub sub_address: Option<String>,
    /// Feature class as reported by the source (e.g. "populated place").
    pub class_code: Option<String>,
}

/// All town data of a single country.
///
/// `aliases[i]` resolves to the town at position `alias_index[i]`; the two
/// vectors always have the same length.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TownTable")]
pub struct CountryTowns {
    pub(crate) towns: Vec<TownRecord>,
    pub(crate) aliases: Vec<String>,
    pub(crate) alias_index: Vec<usize>,
}

impl CountryTowns {
    /// Build a town table, checking alias alignment.
    ///
    /// Town `index` fields are reassigned to their positions.
    pub fn new(
        mut towns: Vec<TownRecord>,
        aliases: Vec<String>,
        alias_index: Vec<usize>,
    ) -> crate::Result<Self> {
        for (i, town) in towns.iter_mut().enumerate() {
            town.index = i;
        }
        let table = Self {
            towns,
            aliases,
            alias_index,
        };
        table.validate("?")?;
        Ok(table)
    }

    pub fn towns(&self) -> &[TownRecord] {
        &self.towns
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn alias_index(&self) -> &[usize] {
        &self.alias_index
    }

    /// Iterator of `(alias, town)` pairs.
    pub fn alias_pairs(&self) -> impl Iterator<Item = (&str, &TownRecord)> + '_ {
        self.aliases
            .iter()
            .zip(&self.alias_index)
            .map(move |(a, &i)| (a.as_str(), &self.towns[i]))
    }

    pub(crate) fn validate(&self, code: &str) -> crate::Result<()> {
        if self.aliases.len() != self.alias_index.len() {
            return Err(crate::TownsDbError::InvalidData(format!(
                "{code}: {} aliases but {} alias indices",
                self.aliases.len(),
                self.alias_index.len()
            )));
        }
        if let Some(bad) = self.alias_index.iter().find(|&&i| i >= self.towns.len()) {
            return Err(crate::TownsDbError::InvalidData(format!(
                "{code}: alias index {bad} out of range ({} towns)",
                self.towns.len()
            )));
        }
        Ok(())
    }
}

/// Serialized shape of a [`Gazetteer`], checked by [`Gazetteer::new`] before
/// it becomes one.
#[derive(Deserialize)]
struct GazetteerTables {
    countries: Vec<CountryRecord>,
    aliases: Vec<AliasRecord>,
    provinces: Vec<ProvinceRecord>,
    towns: BTreeMap<String, CountryTowns>,
}

impl TryFrom<GazetteerTables> for Gazetteer {
    type Error = crate::TownsDbError;

    fn try_from(t: GazetteerTables) -> crate::Result<Self> {
        Gazetteer::new(t.countries, t.aliases, t.provinces, t.towns)
    }
}

#[derive(Deserialize)]
struct TownTable {
    towns: Vec<TownRecord>,
    aliases: Vec<String>,
    alias_index: Vec<usize>,
}

impl TryFrom<TownTable> for CountryTowns {
    type Error = crate::TownsDbError;

    fn try_from(t: TownTable) -> crate::Result<Self> {
        CountryTowns::new(t.towns, t.aliases, t.alias_index)
    }
}
