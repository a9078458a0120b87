//! Longest Common Subsequence over `char`s.
//!
//! # Complexity
//! - Time: O(m*n)
//! - Space: O(n), only two DP rows are kept

/// Length of the longest common subsequence of two char slices.
pub fn lcs_length_chars(a: &[char], b: &[char]) -> usize {
    let (m, n) = (a.len(), b.len());
    if m == 0 || n == 0 {
        return 0;
    }

    let mut prev: Vec<usize> = vec![0; n + 1];
    let mut curr: Vec<usize> = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = 0;
        for j in 1..=n {
            curr[j] = if a[i - 1] == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// `2 * LCS / (|a| + |b|)`, in `[0, 1]`.
///
/// Symmetric; `1.0` iff the inputs are identical (two empty inputs count as
/// identical) and `0.0` iff they share no character.
pub fn lcs_ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * lcs_length_chars(a, b) as f64 / total as f64
}

/// [`lcs_ratio_chars`] on `&str`.
pub fn lcs_ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    lcs_ratio_chars(&a, &b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn length_basic() {
        assert_eq!(lcs_length_chars(&chars("ABCBDAB"), &chars("BDCABA")), 4);
        assert_eq!(lcs_length_chars(&chars("Britin"), &chars("Britain")), 6);
        assert_eq!(lcs_length_chars(&chars(""), &chars("abc")), 0);
    }

    #[test]
    fn ratio_bounds() {
        assert_eq!(lcs_ratio("Ireland", "Ireland"), 1.0);
        assert_eq!(lcs_ratio("", ""), 1.0);
        assert_eq!(lcs_ratio("abc", "xyz"), 0.0);
        assert_eq!(lcs_ratio("abc", ""), 0.0);
    }

    #[test]
    fn ratio_is_symmetric() {
        let pairs = [("Britin", "Britain"), ("Cork", "York"), ("Galway", "Gallway")];
        for (a, b) in pairs {
            assert_eq!(lcs_ratio(a, b), lcs_ratio(b, a));
        }
    }

    #[test]
    fn ratio_value() {
        // 2 * 6 / 13
        assert!((lcs_ratio("Britin", "Britain") - 12.0 / 13.0).abs() < 1e-12);
    }
}
