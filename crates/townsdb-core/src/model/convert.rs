// crates/townsdb-core/src/model/convert.rs
use crate::common::raw::{CountriesRaw, CountryAliasesRaw, ProvincesRaw, TownsRaw};
use crate::error::{Result, TownsDbError};
use crate::model::domain::{AliasRecord, CountryRecord, CountryTowns, ProvinceRecord, TownRecord};

/// Checks that an optional column is either absent (empty) or as long as the
/// table's key column.
fn check_column<T>(table: &str, column: &str, values: &[T], rows: usize) -> Result<()> {
    if values.is_empty() || values.len() == rows {
        Ok(())
    } else {
        Err(TownsDbError::InvalidData(format!(
            "{table}: column {column} has {} rows, expected {rows}",
            values.len()
        )))
    }
}

/// Required columns must be present and exactly `rows` long.
fn check_required<T>(table: &str, column: &str, values: &[T], rows: usize) -> Result<()> {
    if values.len() == rows {
        Ok(())
    } else {
        Err(TownsDbError::InvalidData(format!(
            "{table}: column {column} has {} rows, expected {rows}",
            values.len()
        )))
    }
}

fn cell<T: Clone>(values: &[Option<T>], i: usize) -> Option<T> {
    values.get(i).cloned().flatten()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// **Countries:** columns -> records. Codes are trimmed; a missing code or
/// name is a schema error.
pub fn countries_from_raw(raw: CountriesRaw) -> Result<Vec<CountryRecord>> {
    const T: &str = "CountriesDB";
    let rows = raw.code.len();
    check_required(T, "country", &raw.name, rows)?;
    check_column(T, "id3c", &raw.code3, rows)?;
    check_column(T, "id3n", &raw.numeric, rows)?;
    check_column(T, "idFips", &raw.fips, rows)?;
    check_column(T, "capital", &raw.capital, rows)?;
    check_column(T, "area", &raw.area, rows)?;
    check_column(T, "population", &raw.population, rows)?;
    check_column(T, "id_continent", &raw.continent, rows)?;

    (0..rows)
        .map(|i| {
            let code = non_empty(cell(&raw.code, i))
                .ok_or_else(|| TownsDbError::InvalidData(format!("{T}: row {i} has no id2c")))?;
            let name = non_empty(cell(&raw.name, i)).ok_or_else(|| {
                TownsDbError::InvalidData(format!("{T}: row {i} ({code}) has no country name"))
            })?;
            Ok(CountryRecord {
                code,
                code3: non_empty(cell(&raw.code3, i)),
                numeric: non_empty(cell(&raw.numeric, i)),
                fips: non_empty(cell(&raw.fips, i)),
                name,
                capital: non_empty(cell(&raw.capital, i)),
                area_km2: cell(&raw.area, i),
                population: cell(&raw.population, i),
                continent: non_empty(cell(&raw.continent, i)),
            })
        })
        .collect()
}

/// **Country aliases:** a `None` alias row is dropped, a `None` country is
/// a schema error (every alias must map to exactly one country).
pub fn aliases_from_raw(raw: CountryAliasesRaw) -> Result<Vec<AliasRecord>> {
    const T: &str = "CountryAliasDB";
    let rows = raw.alias.len();
    check_required(T, "countryID", &raw.country, rows)?;

    let mut out = Vec::with_capacity(rows);
    for (i, (alias, country)) in raw.alias.into_iter().zip(raw.country).enumerate() {
        let country_code = non_empty(country)
            .ok_or_else(|| TownsDbError::InvalidData(format!("{T}: row {i} has no countryID")))?;
        if let Some(alias) = non_empty(alias) {
            out.push(AliasRecord {
                alias,
                country_code,
            });
        }
    }
    Ok(out)
}

pub fn provinces_from_raw(raw: ProvincesRaw) -> Result<Vec<ProvinceRecord>> {
    const T: &str = "ProvinceDB";
    let rows = raw.province.len();
    check_required(T, "countryID", &raw.country, rows)?;

    let mut out = Vec::with_capacity(rows);
    for (i, (name, country)) in raw.province.into_iter().zip(raw.country).enumerate() {
        let country_code = non_empty(country)
            .ok_or_else(|| TownsDbError::InvalidData(format!("{T}: row {i} has no countryID")))?;
        if let Some(name) = non_empty(name) {
            out.push(ProvinceRecord { name, country_code });
        }
    }
    Ok(out)
}

/// **Towns:** columns -> [`CountryTowns`].
///
/// Unlike the other tables, rows with a missing town name or alias are kept
/// (as empty strings) because alias indices refer to positions.
pub fn towns_from_raw(code: &str, raw: TownsRaw) -> Result<CountryTowns> {
    let rows = raw.town_name.len();
    check_column(code, "TownIndex", &raw.town_index, rows)?;
    check_column(code, "Latitude", &raw.latitude, rows)?;
    check_column(code, "Longitude", &raw.longitude, rows)?;
    check_column(code, "Province", &raw.province, rows)?;
    check_column(code, "County", &raw.county, rows)?;
    check_column(code, "Address2", &raw.sub_address, rows)?;
    check_column(code, "TownClass", &raw.town_class, rows)?;
    check_column(code, "Population", &raw.population, rows)?;
    check_required(code, "AliasIndex", &raw.alias_index, raw.aliases.len())?;

    let towns = (0..rows)
        .map(|i| TownRecord {
            index: i,
            source_row: cell(&raw.town_index, i),
            name: cell(&raw.town_name, i).unwrap_or_default(),
            lat: cell(&raw.latitude, i),
            lon: cell(&raw.longitude, i),
            population: cell(&raw.population, i),
            province: non_empty(cell(&raw.province, i)),
            county: non_empty(cell(&raw.county, i)),
            sub_address: non_empty(cell(&raw.sub_address, i)),
            class_code: non_empty(cell(&raw.town_class, i)),
        })
        .collect::<Vec<_>>();

    let alias_index = raw
        .alias_index
        .iter()
        .enumerate()
        .map(|(i, idx)| match idx {
            Some(v) if *v >= 0 && (*v as usize) < rows => Ok(*v as usize),
            other => Err(TownsDbError::InvalidData(format!(
                "{code}: alias {i} points at town {other:?}, table has {rows} towns"
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    let aliases = raw
        .aliases
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();

    let table = CountryTowns {
        towns,
        aliases,
        alias_index,
    };
    table.validate(code)?;
    Ok(table)
}
