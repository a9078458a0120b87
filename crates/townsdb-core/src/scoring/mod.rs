// crates/townsdb-core/src/scoring/mod.rs
//! The similarity-scoring primitive shared by every resolver.
//!
//! Scoring is two-staged. A token-tolerant weighted ratio
//! ([`fuzz::weighted_ratio`]) is computed for every candidate of the pool and
//! only the best [`DEFAULT_SHORTLIST`] survive. Each survivor is then
//! re-scored with the stricter character-level [`char_similarity`] on the raw
//! strings, and the product of both decides the winner. The second stage
//! separates names that share tokens or letters but are different places,
//! while its quadratic cost is only paid for the shortlist.

pub mod fuzz;
pub mod lcs;

use crate::text::fold_for_scoring;
use crate::traits::Scorer;
use tracing::trace;

/// Size of the shortlist kept after the token-tolerant pass.
pub const DEFAULT_SHORTLIST: usize = 10;

/// The winner of a [`Scorer::best_match`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch<'a> {
    /// Position of the candidate in the pool.
    pub index: usize,
    pub candidate: &'a str,
    /// Combined score in `[0, 1]`.
    pub score: f64,
}

/// Character-level similarity of two raw strings, in `[0, 1]`.
///
/// Symmetric; `1.0` iff `a == b`, `0.0` iff the strings have no character in
/// common. Case and punctuation count.
///
/// # Examples
/// ```rust
/// use townsdb_core::scoring::char_similarity;
///
/// assert_eq!(char_similarity("Cork", "Cork"), 1.0);
/// assert_eq!(char_similarity("abc", "xyz"), 0.0);
/// assert_eq!(char_similarity("Britin", "Britain"), char_similarity("Britain", "Britin"));
/// ```
pub fn char_similarity(a: &str, b: &str) -> f64 {
    lcs::lcs_ratio(a, b)
}

/// Default [`Scorer`]: weighted-ratio shortlist, re-ranked by
/// [`char_similarity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateScorer {
    shortlist: usize,
}

impl Default for CandidateScorer {
    fn default() -> Self {
        Self {
            shortlist: DEFAULT_SHORTLIST,
        }
    }
}

impl CandidateScorer {
    /// A scorer keeping `k` candidates after the first pass (at least one).
    pub fn with_shortlist(k: usize) -> Self {
        Self { shortlist: k.max(1) }
    }

    pub fn shortlist(&self) -> usize {
        self.shortlist
    }
}

impl Scorer for CandidateScorer {
    fn best_match<'a, I>(&self, query: &str, candidates: I) -> Option<BestMatch<'a>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let folded = fold_for_scoring(query);

        let mut ranked: Vec<(usize, &'a str, f64)> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, c)| (i, c, fuzz::weighted_ratio(&folded, &fold_for_scoring(c))))
            .collect();
        if ranked.is_empty() {
            return None;
        }

        // stable: equal scores keep pool order
        ranked.sort_by(|a, b| b.2.total_cmp(&a.2));
        ranked.truncate(self.shortlist);

        let mut best: Option<BestMatch<'a>> = None;
        for (index, candidate, token_score) in ranked {
            let score = token_score / 100.0 * char_similarity(query, candidate);
            trace!(query, candidate, token_score, score, "shortlist candidate");
            if best.map_or(true, |b| score > b.score) {
                best = Some(BestMatch {
                    index,
                    candidate,
                    score,
                });
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best<'a>(query: &str, pool: &[&'a str]) -> Option<BestMatch<'a>> {
        CandidateScorer::default().best_match(query, pool.iter().copied())
    }

    #[test]
    fn empty_pool_has_no_match() {
        assert_eq!(best("Ireland", &[]), None);
    }

    #[test]
    fn exact_match_scores_one() {
        let m = best("Ireland", &["Iceland", "Ireland", "Poland"]).unwrap();
        assert_eq!(m.candidate, "Ireland");
        assert_eq!(m.index, 1);
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn combined_score_is_product_of_both_passes() {
        let m = best("Britin", &["Britain"]).unwrap();
        let expected = 0.92 * (12.0 / 13.0);
        assert!((m.score - expected).abs() < 1e-12, "{}", m.score);
    }

    #[test]
    fn character_pass_breaks_token_ties() {
        // Both fold to "cork"; only the raw spelling matches exactly.
        let m = best("Cork", &["CORK", "Cork"]).unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.score, 1.0);
    }

    #[test]
    fn ties_go_to_the_first_candidate() {
        let m = best("Newtown", &["Newtown", "Newtown"]).unwrap();
        assert_eq!(m.index, 0);
    }

    #[test]
    fn shortlist_limits_the_second_pass() {
        // With a shortlist of one, the token pass alone picks the winner.
        let scorer = CandidateScorer::with_shortlist(1);
        let pool = ["CORK", "Cork"];
        let m = scorer.best_match("Cork", pool.iter().copied()).unwrap();
        assert_eq!(m.index, 0);
        assert!(m.score < 1.0);
        assert_eq!(CandidateScorer::with_shortlist(0).shortlist(), 1);
    }

    #[test]
    fn unrelated_query_scores_low() {
        let m = best("Zzyzx", &["Ireland", "France"]).unwrap();
        assert!(m.score < 0.3, "{}", m.score);
    }

    #[test]
    fn char_similarity_contract() {
        assert_eq!(char_similarity("Galway", "Galway"), 1.0);
        assert_eq!(char_similarity("abc", "def"), 0.0);
        assert_eq!(
            char_similarity("Limerick", "Limerik"),
            char_similarity("Limerik", "Limerick")
        );
        assert!(char_similarity("Limerick", "Limerik") < 1.0);
    }
}
