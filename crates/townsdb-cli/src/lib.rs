//! townsdb-cli
//! ===========
//!
//! Command-line interface for the `townsdb-core` place-name resolver.
//!
//! This crate primarily provides a binary (`townsdb`). The library target
//! only carries this overview so that docs.rs renders a page for it.
//!
//! Quick start
//! -----------
//!
//! ```text
//! townsdb --help
//! townsdb --data-dir ./DataBaseLocal/CountryInfo stats
//! townsdb country eire
//! townsdb town galway --country IE
//! townsdb --json --threshold 0.9 town big apple
//! ```
//!
//! Options can also come from a JSON config file (`--config`), with the
//! same fields as `townsdb_core::GazetteerConfig`; flags override it.
//!
//! For programmatic access use the [`townsdb-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
