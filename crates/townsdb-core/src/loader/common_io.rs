// crates/townsdb-core/src/loader/common_io.rs
use crate::error::{Result, TownsDbError};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

pub const GZ_SUFFIX: &str = ".gz";

/// Opens a file, buffers it and, for `.gz` paths, wraps it in a Gzip decoder.
/// Returns a generic reader so callers don't care about the compression.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        TownsDbError::NotFound(format!("Dataset table not found at {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    if !is_gzip(path) {
        return Ok(Box::new(reader));
    }

    #[cfg(feature = "compact")]
    {
        Ok(Box::new(GzDecoder::new(reader)))
    }

    #[cfg(not(feature = "compact"))]
    {
        Err(TownsDbError::InvalidData(format!(
            "{} is gzip-compressed but the 'compact' feature is disabled",
            path.display()
        )))
    }
}

pub fn is_gzip(path: &Path) -> bool {
    path.to_string_lossy().ends_with(GZ_SUFFIX)
}

/// Parse one JSON table.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let reader = open_stream(path)?;
    serde_json::from_reader(reader).map_err(|e| {
        TownsDbError::InvalidData(format!("{}: {}", path.display(), e))
    })
}

/// Locate `name` (or `name.gz`) inside `dir`. Plain files win.
pub fn find_table(dir: &Path, name: &str) -> Result<PathBuf> {
    let plain = dir.join(name);
    if plain.is_file() {
        return Ok(plain);
    }
    let gz = dir.join(format!("{name}{GZ_SUFFIX}"));
    if gz.is_file() {
        return Ok(gz);
    }
    Err(TownsDbError::NotFound(format!(
        "required table {name} missing from {}",
        dir.display()
    )))
}

/// Per-country town tables in `dir`: every `XX.json` / `XX.json.gz` whose
/// stem is exactly two characters. Returned sorted by stem.
pub fn town_tables(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|f| f.to_str()) else {
            continue;
        };
        let Some(stem) = file_name
            .strip_suffix(".json")
            .or_else(|| file_name.strip_suffix(".json.gz"))
        else {
            continue;
        };
        if stem.chars().count() == 2 {
            out.push((stem.to_string(), path));
        }
    }
    out.sort();
    Ok(out)
}

pub fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
