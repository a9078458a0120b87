// crates/townsdb-core/src/model/mod.rs
pub mod convert;
pub mod domain;
pub mod load;
pub mod search;

pub use domain::{AliasRecord, CountryRecord, CountryTowns, Gazetteer, ProvinceRecord, TownRecord};

use crate::error::{Result, TownsDbError};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Size limit applied when decoding a binary gazetteer.
pub const MAX_BINARY_SIZE: u64 = 256 * 1024 * 1024;

impl Gazetteer {
    /// Assemble a gazetteer from typed records, enforcing the dataset
    /// invariants:
    ///
    /// - country codes are exactly two characters and unique,
    /// - every alias, province and town table references a known country,
    /// - an alias string belongs to one country only,
    /// - each town table's alias list and alias index list are aligned and
    ///   every alias index points at an existing town.
    ///
    /// Any violation is reported as [`TownsDbError::InvalidData`].
    pub fn new(
        countries: Vec<CountryRecord>,
        aliases: Vec<AliasRecord>,
        provinces: Vec<ProvinceRecord>,
        towns: BTreeMap<String, CountryTowns>,
    ) -> Result<Self> {
        let db = Self {
            countries,
            aliases,
            provinces,
            towns,
            code_index: Default::default(),
        };
        db.validate()?;
        Ok(db)
    }

    /// Check every invariant of the dataset. Called by [`Gazetteer::new`],
    /// which every deserialized gazetteer also goes through.
    pub(crate) fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.countries.len());
        for c in &self.countries {
            if c.code.chars().count() != 2 {
                return Err(TownsDbError::InvalidData(format!(
                    "country code {:?} ({}) is not two characters",
                    c.code, c.name
                )));
            }
            if !seen.insert(c.code.as_str()) {
                return Err(TownsDbError::InvalidData(format!(
                    "duplicate country code {}",
                    c.code
                )));
            }
        }

        let unknown = |code: &str, what: &str| {
            TownsDbError::InvalidData(format!("{what} references unknown country {code:?}"))
        };
        let mut owners: HashMap<&str, &str> = HashMap::with_capacity(self.aliases.len());
        for a in &self.aliases {
            if !seen.contains(a.country_code.as_str()) {
                return Err(unknown(&a.country_code, &format!("alias {:?}", a.alias)));
            }
            match owners.insert(a.alias.as_str(), a.country_code.as_str()) {
                Some(other) if other != a.country_code => {
                    return Err(TownsDbError::InvalidData(format!(
                        "alias {:?} maps to both {other} and {}",
                        a.alias, a.country_code
                    )));
                }
                _ => {}
            }
        }
        for p in &self.provinces {
            if !seen.contains(p.country_code.as_str()) {
                return Err(unknown(&p.country_code, &format!("province {:?}", p.name)));
            }
        }
        for (code, table) in &self.towns {
            if !seen.contains(code.as_str()) {
                return Err(unknown(code, "town table"));
            }
            table.validate(code)?;
        }
        Ok(())
    }

    /// Keep only the listed countries (ISO2, case-insensitive) and the data
    /// that belongs to them.
    pub fn retain_countries(mut self, iso2: &[&str]) -> Self {
        let keep = |code: &str| iso2.iter().any(|k| k.trim().eq_ignore_ascii_case(code));
        self.countries.retain(|c| keep(&c.code));
        self.aliases.retain(|a| keep(&a.country_code));
        self.provinces.retain(|p| keep(&p.country_code));
        self.towns.retain(|code, _| keep(code));
        self.code_index = Default::default();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn country(code: &str, name: &str) -> CountryRecord {
        CountryRecord {
            code: code.into(),
            code3: None,
            numeric: None,
            fips: None,
            name: name.into(),
            capital: None,
            area_km2: None,
            population: None,
            continent: None,
        }
    }

    fn alias(alias: &str, code: &str) -> AliasRecord {
        AliasRecord {
            alias: alias.into(),
            country_code: code.into(),
        }
    }

    fn town(name: &str) -> TownRecord {
        TownRecord {
            index: 0,
            source_row: None,
            name: name.into(),
            lat: None,
            lon: None,
            population: None,
            province: None,
            county: None,
            sub_address: None,
            class_code: None,
        }
    }

    fn congos() -> Vec<CountryRecord> {
        vec![
            country("CG", "Congo Republic"),
            country("CD", "Democratic Republic of the Congo"),
        ]
    }

    #[test]
    fn alias_shared_by_two_countries_is_rejected() {
        let aliases = vec![alias("Congo", "CG"), alias("Congo", "CD")];
        let err = Gazetteer::new(congos(), aliases, vec![], BTreeMap::new()).unwrap_err();
        assert!(matches!(err, TownsDbError::InvalidData(_)), "{err}");
    }

    #[test]
    fn repeated_alias_of_one_country_is_fine() {
        let aliases = vec![alias("Congo", "CG"), alias("Congo", "CG"), alias("DRC", "CD")];
        assert!(Gazetteer::new(congos(), aliases, vec![], BTreeMap::new()).is_ok());
    }

    fn sample() -> Gazetteer {
        let mut towns = BTreeMap::new();
        let table = CountryTowns::new(
            vec![town("Brazzaville"), town("Pointe-Noire")],
            vec!["Brazza".into()],
            vec![0],
        )
        .unwrap();
        towns.insert("CG".to_string(), table);
        Gazetteer::new(congos(), vec![alias("DRC", "CD")], vec![], towns).unwrap()
    }

    #[test]
    fn deserializing_goes_through_validation() {
        let value = serde_json::to_value(sample()).unwrap();
        let back: Gazetteer = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(back.stats(), sample().stats());

        let mut dangling = value.clone();
        dangling["towns"]["CG"]["alias_index"] = json!([7]);
        assert!(serde_json::from_value::<Gazetteer>(dangling).is_err());

        let mut orphan = value.clone();
        orphan["aliases"][0]["country_code"] = json!("ZZ");
        assert!(serde_json::from_value::<Gazetteer>(orphan).is_err());
    }

    #[test]
    fn binary_decode_rejects_invalid_tables() {
        let mut db = sample();
        db.aliases.push(alias("DRC", "CG"));
        let bytes = db.to_bytes().unwrap();
        let err = Gazetteer::from_bytes(&bytes, None).unwrap_err();
        assert!(err.is_load_error());
    }
}
