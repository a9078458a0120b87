// crates/townsdb-core/src/lib.rs
//! Fuzzy resolution of free-form place names against a gazetteer.
//!
//! Load a [`Gazetteer`] once from the dataset directory, then resolve
//! country names to ISO2 codes and town names to canonical entries through
//! a [`Resolver`].
//!
//! ```rust,no_run
//! use townsdb_core::prelude::*;
//!
//! let db = Gazetteer::load_with(&GazetteerConfig::default())?;
//! let resolver = db.resolver();
//! println!("{:?}", resolver.resolve_country("Britain").to_tuple());
//! println!("{:?}", resolver.resolve_town("Cork", Some("IE"))?.to_tuple());
//! # Ok::<(), townsdb_core::TownsDbError>(())
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod loader; // tables, cache
pub mod model;
pub mod resolve;
pub mod scoring;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::common::DbStats;
pub use crate::config::{GazetteerConfig, Thresholds};
pub use crate::error::{Result, TownsDbError};
pub use crate::model::{
    AliasRecord, CountryRecord, CountryTowns, Gazetteer, ProvinceRecord, TownRecord,
};
pub use crate::resolve::{
    resolve_country, resolve_town, CountryMatch, MatchOutcome, MatchTier, Resolver, TownMatch,
};
pub use crate::scoring::{BestMatch, CandidateScorer};
pub use crate::traits::Scorer;

pub mod prelude {
    pub use crate::config::{GazetteerConfig, Thresholds};
    pub use crate::error::{Result, TownsDbError};
    pub use crate::model::Gazetteer;
    pub use crate::resolve::{CountryMatch, MatchOutcome, MatchTier, Resolver, TownMatch};
    pub use crate::traits::Scorer;
}
