// crates/townsdb-core/src/resolve/mod.rs
//! Tiered resolution of free-form country and town names.
//!
//! Every resolver follows the same shape. The query is normalized with
//! [`crate::text::normalize`], then scored against an ordered list of
//! candidate pools ("tiers"). The first tier whose best score reaches
//! [`Thresholds::accept`] wins outright. If none does, the best candidate
//! seen in any tier is returned only when its score is above
//! [`Thresholds::last_resort`]; otherwise the outcome is "no match".
//!
//! Resolvers only read the [`Gazetteer`] and keep no state between calls,
//! so one gazetteer can serve any number of threads at once.

mod country;
mod town;

use crate::config::Thresholds;
use crate::error::Result;
use crate::model::Gazetteer;
use crate::scoring::CandidateScorer;
use crate::traits::Scorer;
use serde::Serialize;

/// The candidate pool a match came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    CountryName,
    CountryAlias,
    Capital,
    Province,
    TownName,
    TownAlias,
}

impl MatchTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::CountryName => "country_name",
            MatchTier::CountryAlias => "country_alias",
            MatchTier::Capital => "capital",
            MatchTier::Province => "province",
            MatchTier::TownName => "town_name",
            MatchTier::TownAlias => "town_alias",
        }
    }
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved country.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountryMatch<'g> {
    /// ISO2 code of the country.
    pub code: &'g str,
    pub score: f64,
    pub tier: MatchTier,
    /// The pool entry that scored best (a name, alias, capital or province).
    pub candidate: &'g str,
}

/// A resolved town.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TownMatch<'g> {
    /// Canonical town name, also when the match came through an alias.
    pub name: &'g str,
    pub score: f64,
    /// Position of `name` in the country's town table.
    pub town_index: usize,
    pub country_code: &'g str,
    pub tier: MatchTier,
    /// The alias that matched, for [`MatchTier::TownAlias`] matches.
    pub alias: Option<&'g str>,
}

/// Flat tuple view of a resolver outcome, with `(None, 0.0, ..)` standing
/// for "no match".
pub trait MatchOutcome {
    type Tuple;
    fn to_tuple(&self) -> Self::Tuple;
}

impl<'g> MatchOutcome for Option<CountryMatch<'g>> {
    type Tuple = (Option<&'g str>, f64);

    fn to_tuple(&self) -> Self::Tuple {
        match self {
            Some(m) => (Some(m.code), m.score),
            None => (None, 0.0),
        }
    }
}

impl<'g> MatchOutcome for Option<TownMatch<'g>> {
    type Tuple = (Option<&'g str>, f64, Option<usize>, Option<&'g str>);

    fn to_tuple(&self) -> Self::Tuple {
        match self {
            Some(m) => (Some(m.name), m.score, Some(m.town_index), Some(m.country_code)),
            None => (None, 0.0, None, None),
        }
    }
}

/// Resolves queries against one gazetteer.
///
/// # Examples
/// ```rust,no_run
/// use townsdb_core::{Gazetteer, Thresholds};
///
/// let db = Gazetteer::load("./DataBaseLocal/CountryInfo")?;
/// let resolver = db.resolver().with_thresholds(Thresholds::new(0.9, 0.6));
///
/// if let Some(m) = resolver.resolve_country("ireland") {
///     println!("{} ({:.2})", m.code, m.score);
/// }
/// if let Some(t) = resolver.resolve_town("galway", Some("IE"))? {
///     let town = db.town(t.country_code, t.town_index).unwrap();
///     println!("{} at {:?},{:?}", t.name, town.lat, town.lon);
/// }
/// # Ok::<(), townsdb_core::TownsDbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Resolver<'g, S = CandidateScorer> {
    db: &'g Gazetteer,
    scorer: S,
    thresholds: Thresholds,
}

impl<'g> Resolver<'g> {
    /// A resolver with the default scorer and thresholds.
    pub fn new(db: &'g Gazetteer) -> Self {
        Self {
            db,
            scorer: CandidateScorer::default(),
            thresholds: Thresholds::default(),
        }
    }
}

impl<'g, S: Scorer> Resolver<'g, S> {
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Swap the scoring primitive.
    pub fn with_scorer<T: Scorer>(self, scorer: T) -> Resolver<'g, T> {
        Resolver {
            db: self.db,
            scorer,
            thresholds: self.thresholds,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    pub fn gazetteer(&self) -> &'g Gazetteer {
        self.db
    }

    fn accepts(&self, score: f64) -> bool {
        score >= self.thresholds.accept
    }

    fn accepts_last_resort(&self, score: f64) -> bool {
        score > self.thresholds.last_resort
    }
}

impl Gazetteer {
    /// A [`Resolver`] over this gazetteer with default settings.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(self)
    }
}

/// Resolve a country name to its ISO2 code.
pub fn resolve_country<'g>(
    query: &str,
    db: &'g Gazetteer,
    thresholds: Thresholds,
) -> Option<CountryMatch<'g>> {
    Resolver::new(db)
        .with_thresholds(thresholds)
        .resolve_country(query)
}

/// Resolve a town name, optionally scoped to one country (ISO2).
pub fn resolve_town<'g>(
    query: &str,
    db: &'g Gazetteer,
    country: Option<&str>,
    thresholds: Thresholds,
) -> Result<Option<TownMatch<'g>>> {
    Resolver::new(db)
        .with_thresholds(thresholds)
        .resolve_town(query, country)
}

/// Keeps the better of the retained candidates; on equal scores the one
/// seen first stays.
fn keep_best<T: Copy>(slot: &mut Option<T>, candidate: T, score: impl Fn(&T) -> f64) {
    if slot.as_ref().map_or(true, |kept| score(&candidate) > score(kept)) {
        *slot = Some(candidate);
    }
}
