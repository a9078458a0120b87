use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for townsdb
#[derive(Debug, Parser)]
#[command(
    name = "townsdb",
    version,
    about = "Resolve free-form country and town names against a gazetteer dataset"
)]
pub struct CliArgs {
    /// JSON config file (data_dir, countries, use_cache, thresholds)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Dataset directory holding CountriesDB.json and the XX.json town tables
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Optional comma-separated list of ISO2 country codes to load (e.g. IE,GB)
    #[arg(short = 'f', long = "filter", global = true)]
    pub filter: Option<String>,

    /// Parse the JSON tables even when a fresh binary cache exists
    #[arg(long = "no-cache", global = true)]
    pub no_cache: bool,

    /// Score at which a tier's best candidate is accepted immediately
    #[arg(long = "threshold", global = true)]
    pub threshold: Option<f64>,

    /// Score the best candidate of all tiers must exceed
    #[arg(long = "lowest-threshold", global = true)]
    pub lowest_threshold: Option<f64>,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// More log output on stderr (-v debug, -vv trace); RUST_LOG wins when set
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded dataset
    Stats,

    /// Resolve a country name to its ISO2 code
    Country {
        /// Country name, alias, capital or province (words are joined)
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Resolve a town name, optionally within one country
    Town {
        /// Town name or alias (words are joined)
        #[arg(required = true)]
        query: Vec<String>,

        /// ISO2 code of the country to search in
        #[arg(short = 'C', long = "country")]
        country: Option<String>,
    },

    /// Rebuild the binary cache from the JSON tables
    Cache,
}

impl CliArgs {
    /// The `--filter` list, split on commas with blanks dropped.
    pub fn country_filter(&self) -> Option<Vec<String>> {
        self.filter.as_ref().map(|s| {
            s.split(',')
                .map(|x| x.trim())
                .filter(|x| !x.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_town_with_scope_and_globals() {
        let args = CliArgs::try_parse_from([
            "townsdb", "--json", "-f", "IE, GB,", "town", "new", "york", "-C", "us", "-vv",
        ])
        .unwrap();
        assert!(args.json);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.country_filter(), Some(vec!["IE".to_string(), "GB".to_string()]));
        match args.command {
            Commands::Town { query, country } => {
                assert_eq!(query, ["new", "york"]);
                assert_eq!(country.as_deref(), Some("us"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn country_needs_a_query() {
        assert!(CliArgs::try_parse_from(["townsdb", "country"]).is_err());
    }
}
