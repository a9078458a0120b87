// crates/townsdb-core/src/traits.rs
use crate::model::{AliasRecord, CountryRecord, ProvinceRecord, TownRecord};
use crate::scoring::BestMatch;

/// Ranks a query against a pool of candidate strings.
///
/// The resolvers are generic over this trait so alternative scorers (or
/// instrumented ones in tests) can be dropped in. Implementations must be
/// pure: the same query and pool always give the same answer.
///
/// # Examples
/// ```rust
/// use townsdb_core::scoring::CandidateScorer;
/// use townsdb_core::traits::Scorer;
///
/// let pool = ["France", "Ireland", "Iceland"];
/// let best = CandidateScorer::default()
///     .best_match("Ireland", pool.iter().copied())
///     .unwrap();
/// assert_eq!(best.candidate, "Ireland");
/// assert_eq!(best.index, 1);
/// assert_eq!(best.score, 1.0);
/// ```
pub trait Scorer {
    /// Best candidate of the pool with its score in `[0, 1]`, or `None` when
    /// the pool is empty. `index` is the candidate's position in iteration
    /// order.
    fn best_match<'a, I>(&self, query: &str, candidates: I) -> Option<BestMatch<'a>>
    where
        I: IntoIterator<Item = &'a str>;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn best_match<'a, I>(&self, query: &str, candidates: I) -> Option<BestMatch<'a>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        (**self).best_match(query, candidates)
    }
}

/// Records that expose the string they are matched by.
pub trait NameMatch {
    /// Returns the canonical display name used for matching.
    fn name_str(&self) -> &str;
}

impl NameMatch for CountryRecord {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for AliasRecord {
    fn name_str(&self) -> &str {
        &self.alias
    }
}

impl NameMatch for ProvinceRecord {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for TownRecord {
    fn name_str(&self) -> &str {
        &self.name
    }
}
