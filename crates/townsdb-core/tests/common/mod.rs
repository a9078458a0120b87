// Shared fixture: a small dataset written into a temp directory.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;

pub fn write_table(dir: &Path, name: &str, value: &Value) {
    std::fs::write(dir.join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

pub fn countries() -> Value {
    json!({
        "id2c": ["IE", "GB", "FR", "US", "AQ"],
        "id3c": ["IRL", "GBR", "FRA", "USA", "ATA"],
        "id3n": ["372", "826", "250", "840", "010"],
        "idFips": ["EI", "UK", "FR", "US", "AY"],
        "country": ["Ireland", "United Kingdom", "France", "United States", "Antarctica"],
        "capital": ["Dublin", "London", "Paris", "Washington", null],
        "area": [70273.0, 244820.0, 547030.0, 9629091.0, 14000000.0],
        "population": [4977400, 66488991, 66987244, 327167434, null],
        "id_continent": ["EU", "EU", "EU", "NA", "AN"]
    })
}

pub fn aliases(with_britain: bool) -> Value {
    let mut alias = vec!["Eire", "Great Britain", "UK", "Republic of Ireland", "USA"];
    let mut country = vec!["IE", "GB", "GB", "IE", "US"];
    if with_britain {
        alias.push("Britain");
        country.push("GB");
    }
    json!({ "countryAlias": alias, "countryID": country })
}

pub fn provinces() -> Value {
    json!({
        "province": ["Munster", "Leinster", "Scotland", "Wales", "Normandy", "Texas"],
        "countryID": ["IE", "IE", "GB", "GB", "FR", "US"]
    })
}

pub fn ie_towns() -> Value {
    json!({
        "TownIndex": [10, 11, 12, 13],
        "TownName": ["Dublin", "Cork", "Galway", "Limerick"],
        "Latitude": [53.35, 51.9, 53.27, 52.66],
        "Longitude": [-6.26, -8.47, -9.05, -8.63],
        "Province": ["Leinster", "Munster", "Connacht", "Munster"],
        "County": ["Dublin", "Cork", "Galway", "Limerick"],
        "Address2": [null, null, null, null],
        "TownClass": ["city", "city", "city", "city"],
        "Population": [1173179, 208669, 79934, 94192],
        "Aliases": ["Baile Atha Cliath", "Gaillimh", "Luimneach"],
        "AliasIndex": [0, 2, 3]
    })
}

pub fn gb_towns() -> Value {
    json!({
        "TownName": ["London", "Manchester", "Edinburgh"],
        "Latitude": [51.5, 53.48, 55.95],
        "Longitude": [-0.12, -2.24, -3.19],
        "Aliases": ["Londinium", "Auld Reekie"],
        "AliasIndex": [0, 2]
    })
}

pub fn fr_towns() -> Value {
    json!({
        "TownName": ["Paris", "Lyon", "Marseille"],
        "Aliases": ["Lutetia"],
        "AliasIndex": [0]
    })
}

pub fn us_towns() -> Value {
    json!({
        "TownName": ["New York City", "Dublin", "Paris", "Springfield"],
        "Population": [8336817, 49328, 24847, null],
        "Aliases": ["Big Apple"],
        "AliasIndex": [0]
    })
}

/// Writes the full fixture and returns the directory holding it.
pub fn dataset(with_britain: bool) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path();
    write_table(p, "CountriesDB.json", &countries());
    write_table(p, "CountryAliasDB.json", &aliases(with_britain));
    write_table(p, "ProvinceDB.json", &provinces());
    write_table(p, "IE.json", &ie_towns());
    write_table(p, "GB.json", &gb_towns());
    write_table(p, "FR.json", &fr_towns());
    write_table(p, "US.json", &us_towns());
    dir
}
