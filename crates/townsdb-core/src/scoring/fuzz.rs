//! Token-tolerant ratios used for the cheap shortlist pass.
//!
//! All functions here expect inputs already folded with
//! [`crate::text::fold_for_scoring`] and return a similarity in `[0, 1]`,
//! except [`weighted_ratio`] which reports on a `0..=100` integer scale.
//!
//! - [`partial_ratio`]: best alignment of the shorter string inside the longer
//! - [`token_sort_ratio`]: order-insensitive comparison
//! - [`token_set_ratio`]: comparison over shared/unshared token sets
//! - [`weighted_ratio`]: picks the best of the above for the input shape

use super::lcs::{lcs_ratio, lcs_ratio_chars};
use std::collections::BTreeSet;

/// Weight applied to token-based ratios.
pub const TOKEN_WEIGHT: f64 = 0.95;
/// Weight applied to partial (substring) ratios.
pub const PARTIAL_WEIGHT: f64 = 0.9;
/// Partial weight once one string is more than 8x longer than the other.
pub const PARTIAL_WEIGHT_LONG: f64 = 0.6;

/// Plain similarity ratio.
pub fn ratio(a: &str, b: &str) -> f64 {
    lcs_ratio(a, b)
}

/// Best ratio of the shorter string against every equally long window of
/// the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if shorter.len() == longer.len() {
        return lcs_ratio_chars(&shorter, &longer);
    }

    let mut best = 0.0f64;
    for window in longer.windows(shorter.len()) {
        best = best.max(lcs_ratio_chars(&shorter, window));
        if best == 1.0 {
            break;
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Ratio after sorting both token lists, so word order does not matter.
pub fn token_sort_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let (a, b) = (sorted_tokens(a), sorted_tokens(b));
    if partial {
        partial_ratio(&a, &b)
    } else {
        ratio(&a, &b)
    }
}

/// Set-based comparison: the shared tokens are compared against each side's
/// shared-plus-unique tokens, and the two sides against each other. Returns
/// the best of those three.
pub fn token_set_ratio(a: &str, b: &str, partial: bool) -> f64 {
    let set_a: BTreeSet<&str> = a.split_whitespace().collect();
    let set_b: BTreeSet<&str> = b.split_whitespace().collect();
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let join = |tokens: Vec<&str>| tokens.join(" ");
    let sect = join(set_a.intersection(&set_b).copied().collect());
    let only_a = join(set_a.difference(&set_b).copied().collect());
    let only_b = join(set_b.difference(&set_a).copied().collect());

    let combined_a = format!("{sect} {only_a}").trim().to_string();
    let combined_b = format!("{sect} {only_b}").trim().to_string();

    let f = |x: &str, y: &str| if partial { partial_ratio(x, y) } else { ratio(x, y) };
    f(&sect, &combined_a)
        .max(f(&sect, &combined_b))
        .max(f(&combined_a, &combined_b))
}

/// Weighted ratio on a `0..=100` integer scale.
///
/// Strings of similar length (length ratio below 1.5) are compared whole:
/// the best of the plain ratio and the two token ratios weighted by
/// [`TOKEN_WEIGHT`]. Otherwise the partial ratio and the partial token ratios
/// also take part, weighted by [`PARTIAL_WEIGHT`] (or [`PARTIAL_WEIGHT_LONG`]
/// when one side is more than 8x longer).
pub fn weighted_ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    let base = ratio(a, b);

    let best = if len_ratio < 1.5 {
        let sort = token_sort_ratio(a, b, false) * TOKEN_WEIGHT;
        let set = token_set_ratio(a, b, false) * TOKEN_WEIGHT;
        base.max(sort).max(set)
    } else {
        let partial_weight = if len_ratio > 8.0 {
            PARTIAL_WEIGHT_LONG
        } else {
            PARTIAL_WEIGHT
        };
        let partial = partial_ratio(a, b) * partial_weight;
        let sort = token_sort_ratio(a, b, true) * TOKEN_WEIGHT * partial_weight;
        let set = token_set_ratio(a, b, true) * TOKEN_WEIGHT * partial_weight;
        base.max(partial).max(sort).max(set)
    };

    (best * 100.0).round()
}
