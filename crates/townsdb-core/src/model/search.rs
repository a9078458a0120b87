// crates/townsdb-core/src/model/search.rs
use super::domain::{AliasRecord, CountryRecord, CountryTowns, Gazetteer, ProvinceRecord, TownRecord};
use crate::common::DbStats;
use std::collections::HashMap;

impl Gazetteer {
    pub fn stats(&self) -> DbStats {
        DbStats {
            countries: self.countries.len(),
            aliases: self.aliases.len(),
            provinces: self.provinces.len(),
            towns: self.towns.values().map(|t| t.towns.len()).sum(),
            town_aliases: self.towns.values().map(|t| t.aliases.len()).sum(),
        }
    }

    /// All countries, in dataset order.
    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    pub fn aliases(&self) -> &[AliasRecord] {
        &self.aliases
    }

    pub fn provinces(&self) -> &[ProvinceRecord] {
        &self.provinces
    }

    /// Position of a country in [`Gazetteer::countries`], by ISO2 code
    /// (case-insensitive).
    pub fn country_position(&self, iso2: &str) -> Option<usize> {
        let index = self.code_index.get_or_init(|| {
            self.countries
                .iter()
                .enumerate()
                .map(|(i, c)| (c.code.to_ascii_uppercase(), i))
                .collect::<HashMap<_, _>>()
        });
        index.get(&iso2.trim().to_ascii_uppercase()).copied()
    }

    /// Find a country by ISO2 code, case-insensitive (e.g. "IE", "ie").
    pub fn country(&self, iso2: &str) -> Option<&CountryRecord> {
        self.country_position(iso2).map(|i| &self.countries[i])
    }

    /// Town data of one country, if the dataset has any.
    pub fn towns_for(&self, iso2: &str) -> Option<&CountryTowns> {
        let code = &self.country(iso2)?.code;
        self.towns.get(code)
    }

    /// Look up the town a resolver returned, to read its coordinates,
    /// population and address fields.
    pub fn town(&self, iso2: &str, index: usize) -> Option<&TownRecord> {
        self.towns_for(iso2)?.towns.get(index)
    }

    /// Codes of every country that has a town table, in lexicographic order.
    /// This is the order the unscoped town scan visits them in.
    pub fn country_codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.towns.keys().map(String::as_str)
    }

    pub(crate) fn town_tables(&self) -> impl Iterator<Item = (&str, &CountryTowns)> + '_ {
        self.towns.iter().map(|(k, v)| (k.as_str(), v))
    }
}
