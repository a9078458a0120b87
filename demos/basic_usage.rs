//! Basic usage example for townsdb-rs
//!
//! This example demonstrates how to:
//! - Load the gazetteer (through the binary cache)
//! - Resolve country names through every tier
//! - Resolve towns with and without a country scope
//! - Handle "no match" and scope errors
//!
//! Point it at a dataset directory:
//! `cargo run --example basic_usage -- ./DataBaseLocal/CountryInfo`

use townsdb_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== townsdb-rs Basic Usage Example ===\n");

    let data_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./DataBaseLocal/CountryInfo".to_string());

    println!("Loading gazetteer from {data_dir}...");
    let db = Gazetteer::load_with(&GazetteerConfig::new(&data_dir))?;
    let stats = db.stats();
    println!(
        "✓ {} countries, {} towns, {} town aliases\n",
        stats.countries, stats.towns, stats.town_aliases
    );

    let resolver = db.resolver();

    // Example 1: countries, from exact names to misspellings
    println!("--- Example 1: Resolve countries ---");
    for query in ["Ireland", "republic of ireland", "Britin", "Dublin", "nan", "Atlantis"] {
        match resolver.resolve_country(query) {
            Some(m) => println!("{query:>22} -> {} {:.3} via {} ({})", m.code, m.score, m.tier, m.candidate),
            None => println!("{query:>22} -> no match"),
        }
    }
    println!();

    // Example 2: towns inside one country
    println!("--- Example 2: Resolve towns in Ireland ---");
    for query in ["Galway", "gaillimh", "Corc"] {
        match resolver.resolve_town(query, Some("IE"))? {
            Some(m) => {
                let town = db.town(m.country_code, m.town_index);
                let coords = town.and_then(|t| t.lat.zip(t.lon));
                println!("{query:>12} -> {} #{} {:.3} {:?}", m.name, m.town_index, m.score, coords);
            }
            None => println!("{query:>12} -> no match"),
        }
    }
    println!();

    // Example 3: unscoped search scans countries in code order
    println!("--- Example 3: Resolve towns anywhere ---");
    for query in ["Paris", "Springfield"] {
        println!("{query:>12} -> {:?}", resolver.resolve_town(query, None)?.to_tuple());
    }
    println!();

    // Example 4: stricter thresholds
    println!("--- Example 4: Custom thresholds ---");
    let strict = db.resolver().with_thresholds(Thresholds::new(0.99, 0.9));
    println!("Britin (strict) -> {:?}", strict.resolve_country("Britin").to_tuple());
    println!();

    // Example 5: scope errors are reported, not swallowed
    println!("--- Example 5: Invalid scope ---");
    match resolver.resolve_town("Cork", Some("IRL")) {
        Ok(m) => println!("unexpected: {:?}", m.to_tuple()),
        Err(e) => println!("✓ rejected: {e}"),
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
