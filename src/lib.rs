//! Umbrella crate of the workspace; re-exports [`townsdb_core`] so the demos
//! can `use townsdb_rs::prelude::*`.
pub use townsdb_core::*;
