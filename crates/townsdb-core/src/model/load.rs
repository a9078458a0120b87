// crates/townsdb-core/src/model/load.rs
use super::MAX_BINARY_SIZE;
use crate::error::Result;
use crate::model::domain::Gazetteer;
use bincode::Options;

impl Gazetteer {
    /// Reconstructs the gazetteer from its serialized binary form, optionally
    /// keeping only the countries whose ISO2 code is listed.
    ///
    /// The bytes are untrusted: decoding is size-limited and goes through
    /// [`Gazetteer::new`], so a value violating the dataset invariants is
    /// rejected.
    pub fn from_bytes(data: &[u8], filter_iso2: Option<&[&str]>) -> Result<Self> {
        let master: Gazetteer = bincode::DefaultOptions::new()
            .with_limit(MAX_BINARY_SIZE)
            .allow_trailing_bytes()
            .deserialize(data)?;

        // No filter: return the master directly (fast path)
        match filter_iso2 {
            Some(f) if !f.is_empty() => Ok(master.retain_countries(f)),
            _ => Ok(master),
        }
    }

    /// Serialize with the same options [`Gazetteer::from_bytes`] expects.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::DefaultOptions::new()
            .with_limit(MAX_BINARY_SIZE)
            .allow_trailing_bytes()
            .serialize(self)?)
    }
}
