//! townsdb: command-line front end of townsdb-core
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ townsdb stats
//!
//! - Resolve a country (name, alias, capital or province)
//!   $ townsdb country republic of ireland
//!   $ townsdb --json country britin
//!
//! - Resolve a town, optionally scoped to a country
//!   $ townsdb town cork --country IE
//!   $ townsdb --filter=IE,GB town londinium
//!
//! - Rebuild the binary cache after updating the tables
//!   $ townsdb --data-dir ./DataBaseLocal/CountryInfo cache
//!
//! Logs go to stderr; `-v`/`-vv` or `RUST_LOG` control how much.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use serde_json::json;
use townsdb_core::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let config = build_config(&args)?;
    tracing::debug!(?config, "effective configuration");

    if let Commands::Cache = args.command {
        let db = Gazetteer::load(&config.data_dir)
            .with_context(|| format!("loading {}", config.data_dir.display()))?;
        let path = Gazetteer::cache_path(&config.data_dir);
        db.save_as(&path)?;
        println!("Cache written to {}", path.display());
        return Ok(());
    }

    let db = Gazetteer::load_with(&config)
        .with_context(|| format!("loading {}", config.data_dir.display()))?;
    let resolver = db.resolver().with_thresholds(config.thresholds);

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Database statistics:");
                println!("  Countries: {}", stats.countries);
                println!("  Country aliases: {}", stats.aliases);
                println!("  Provinces: {}", stats.provinces);
                println!("  Towns: {}", stats.towns);
                println!("  Town aliases: {}", stats.town_aliases);
            }
        }

        Commands::Country { query } => {
            let query = query.join(" ");
            let found = resolver.resolve_country(&query);
            if args.json {
                let country = found.and_then(|m| db.country(m.code));
                let out = json!({ "query": query, "match": found, "country": country });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                match found {
                    Some(m) => println!("{}  {:.3}  ({}: {})", m.code, m.score, m.tier, m.candidate),
                    None => println!("No country found for: {query}"),
                }
            }
        }

        Commands::Town { query, country } => {
            let query = query.join(" ");
            let found = resolver.resolve_town(&query, country.as_deref())?;
            let town = found.and_then(|m| db.town(m.country_code, m.town_index));
            if args.json {
                let out = json!({ "query": query, "match": found, "town": town });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                match (found, town) {
                    (Some(m), Some(t)) => {
                        println!(
                            "{} ({} #{})  {:.3}  [{}]",
                            m.name, m.country_code, m.town_index, m.score, m.tier
                        );
                        if let Some(alias) = m.alias {
                            println!("  via alias: {alias}");
                        }
                        if let (Some(lat), Some(lon)) = (t.lat, t.lon) {
                            println!("  location: {lat}, {lon}");
                        }
                        if let Some(p) = &t.province {
                            println!("  province: {p}");
                        }
                        if let Some(pop) = t.population {
                            println!("  population: {pop}");
                        }
                    }
                    _ => println!("No town found for: {query}"),
                }
            }
        }

        Commands::Cache => {}
    }

    Ok(())
}

/// Stderr logging; `RUST_LOG` overrides the `-v` level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config file (if any), then command-line overrides.
fn build_config(args: &CliArgs) -> anyhow::Result<GazetteerConfig> {
    let mut config = match &args.config {
        Some(path) => GazetteerConfig::from_json_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => GazetteerConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(filter) = args.country_filter() {
        config.countries = Some(filter);
    }
    if args.no_cache {
        config.use_cache = false;
    }
    if let Some(t) = args.threshold {
        config.thresholds.accept = t;
    }
    if let Some(t) = args.lowest_threshold {
        config.thresholds.last_resort = t;
    }
    Ok(config)
}
