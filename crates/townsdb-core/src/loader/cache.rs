// crates/townsdb-core/src/loader/cache.rs
//! Binary cache of a validated gazetteer (bincode, gzip-wrapped when the
//! `compact` feature is on), stored next to the JSON tables.

use super::common_io;
use super::{ALIASES_TABLE, COUNTRIES_TABLE, PROVINCES_TABLE};
use crate::error::{Result, TownsDbError};
use crate::model::{Gazetteer, MAX_BINARY_SIZE};
use bincode::Options;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[cfg(feature = "compact")]
use flate2::{write::GzEncoder, Compression};

#[cfg(not(feature = "compact"))]
pub const CACHE_FILE: &str = "townsdb.bin";
#[cfg(feature = "compact")]
pub const CACHE_FILE: &str = "townsdb.bin.gz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    fn for_path(path: &Path) -> Self {
        if common_io::is_gzip(path) {
            CompressionMode::Gzip
        } else {
            CompressionMode::None
        }
    }
}

impl Gazetteer {
    /// Where the binary cache of the tables in `data_dir` lives.
    pub fn cache_path(data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(CACHE_FILE)
    }

    /// **Smart Load:** use the cache when it is newer than every table,
    /// otherwise parse the tables and rewrite the cache.
    pub fn load_via_cache(data_dir: impl AsRef<Path>, filter: Option<&[&str]>) -> Result<Self> {
        let dir = data_dir.as_ref();
        let cache_path = Self::cache_path(dir);

        // The cache always holds every country; the filter is applied after.
        let db = match Self::read_fresh_cache(dir, &cache_path) {
            Some(db) => db,
            None => {
                let db = Self::load_tables(dir, None)?;
                if let Err(e) = db.save_as(&cache_path) {
                    warn!(path = %cache_path.display(), error = %e, "could not write cache");
                }
                db
            }
        };

        match filter {
            Some(f) if !f.is_empty() => Ok(db.retain_countries(f)),
            _ => Ok(db),
        }
    }

    /// Decode a binary file written by [`Gazetteer::save_as`].
    pub fn load_binary_file(path: impl AsRef<Path>, filter: Option<&[&str]>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let mut data = Vec::new();
        reader.take(MAX_BINARY_SIZE + 1).read_to_end(&mut data)?;
        if data.len() as u64 > MAX_BINARY_SIZE {
            return Err(TownsDbError::InvalidData(format!(
                "{} exceeds the {MAX_BINARY_SIZE} byte limit",
                path.display()
            )));
        }
        Self::from_bytes(&data, filter)
    }

    /// Write the binary form; gzip-compressed when `path` ends in `.gz`.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_generic(path, self, CompressionMode::for_path(path))?;
        info!(path = %path.display(), "gazetteer cache written");
        Ok(())
    }

    /// The cached gazetteer, if the cache is at least as new as every table
    /// and holds exactly the town tables present in `data_dir`.
    fn read_fresh_cache(data_dir: &Path, cache_path: &Path) -> Option<Self> {
        let town_stems = Self::is_cache_fresh(data_dir, cache_path)?;
        let db = match Self::load_binary_file(cache_path, None) {
            Ok(db) => db,
            Err(e) => {
                warn!(path = %cache_path.display(), error = %e, "ignoring unreadable cache");
                return None;
            }
        };

        let cached: BTreeSet<String> = db.towns.keys().map(|k| k.to_ascii_uppercase()).collect();
        if cached != town_stems {
            info!(path = %cache_path.display(), "town tables changed, rebuilding cache");
            return None;
        }
        info!(path = %cache_path.display(), "gazetteer loaded from cache");
        Some(db)
    }

    /// `Some(upper-cased town table stems)` when every required table exists
    /// and none is newer than the cache.
    fn is_cache_fresh(data_dir: &Path, cache_path: &Path) -> Option<BTreeSet<String>> {
        let cache_time = common_io::modified(cache_path)?;

        let mut tables: Vec<PathBuf> = Vec::new();
        for name in [COUNTRIES_TABLE, ALIASES_TABLE, PROVINCES_TABLE] {
            tables.push(common_io::find_table(data_dir, name).ok()?);
        }
        let towns = common_io::town_tables(data_dir).ok()?;
        let stems = towns.iter().map(|(stem, _)| stem.to_ascii_uppercase()).collect();
        tables.extend(towns.into_iter().map(|(_, p)| p));

        tables
            .iter()
            .all(|t| common_io::modified(t).is_some_and(|m| m <= cache_time))
            .then_some(stems)
    }
}

/// Writes any serializable value in the binary cache format.
fn write_generic<T: serde::Serialize>(
    path: &Path,
    value: &T,
    compression: CompressionMode,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                let mut encoder = GzEncoder::new(writer, Compression::default());
                serialize_into(&mut encoder, value)?;
                encoder.finish()?.flush()?;
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(TownsDbError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        }
        CompressionMode::None => {
            serialize_into(&mut writer, value)?;
            writer.flush()?;
        }
    }
    Ok(())
}

fn serialize_into<W: Write, T: serde::Serialize>(writer: W, value: &T) -> Result<()> {
    Ok(bincode::DefaultOptions::new()
        .with_limit(MAX_BINARY_SIZE)
        .allow_trailing_bytes()
        .serialize_into(writer, value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_lives_in_the_data_dir() {
        let p = Gazetteer::cache_path("/data/CountryInfo");
        assert_eq!(p, Path::new("/data/CountryInfo").join(CACHE_FILE));
    }

    #[test]
    fn compression_follows_extension() {
        assert_eq!(
            CompressionMode::for_path(Path::new("x.bin.gz")),
            CompressionMode::Gzip
        );
        assert_eq!(
            CompressionMode::for_path(Path::new("x.bin")),
            CompressionMode::None
        );
    }
}
