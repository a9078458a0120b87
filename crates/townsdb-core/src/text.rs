// crates/townsdb-core/src/text.rs
//! Text helpers shared by the resolvers and the scorer.

/// Words left in lower case by [`normalize`].
pub const SMALL_WORDS: [&str; 2] = ["and", "of"];

/// Title-case a place name the way the gazetteer spells canonical names.
///
/// Splits on whitespace, upper-cases the first character of every token
/// except the small words `and`/`of` (matched case-sensitively), leaves the
/// rest of each token untouched and rejoins with single spaces. Input without
/// any token (empty or blank) is returned unchanged.
///
/// # Examples
/// ```rust
/// use townsdb_core::text::normalize;
///
/// assert_eq!(normalize("bosnia and herzegovina"), "Bosnia and Herzegovina");
/// assert_eq!(normalize("isle of  man"), "Isle of Man");
/// assert_eq!(normalize("mcAllen"), "McAllen");
/// ```
pub fn normalize(s: &str) -> String {
    if s.split_whitespace().next().is_none() {
        return s.to_string();
    }
    s.split_whitespace()
        .map(|token| {
            if SMALL_WORDS.contains(&token) {
                return token.to_string();
            }
            let mut chars = token.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pre-processing applied before the token-tolerant comparison: every
/// non-alphanumeric character becomes a space, the result is lower-cased and
/// trimmed. Inner runs of spaces are kept; tokenizers split on whitespace.
pub fn fold_for_scoring(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// `true` for queries that carry no information: empty, blank, or the
/// literal `nan` left behind by spreadsheet/dataframe exports.
pub fn is_missing(query: &str) -> bool {
    let q = query.trim();
    q.is_empty() || q == "nan"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_each_token() {
        assert_eq!(normalize("new york"), "New York");
        assert_eq!(normalize("united states of america"), "United States of America");
    }

    #[test]
    fn small_words_are_case_sensitive() {
        assert_eq!(normalize("trinidad And tobago"), "Trinidad And Tobago");
        assert_eq!(normalize("Of"), "Of");
        assert_eq!(normalize("of"), "of");
    }

    #[test]
    fn keeps_the_tail_of_each_token() {
        assert_eq!(normalize("dUBLIN"), "DUBLIN");
        assert_eq!(normalize("o'brien's town"), "O'brien's Town");
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  saint   lucia "), "Saint Lucia");
    }

    #[test]
    fn passes_through_inputs_without_tokens() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "   ");
    }

    #[test]
    fn non_ascii_first_letters() {
        assert_eq!(normalize("île de france"), "Île De France");
        assert_eq!(normalize("åland"), "Åland");
    }

    #[test]
    fn folding_strips_punctuation_and_case() {
        assert_eq!(fold_for_scoring("U.K."), "u k");
        assert_eq!(fold_for_scoring("  Guinea-Bissau "), "guinea bissau");
        assert_eq!(fold_for_scoring("!!!"), "");
    }

    #[test]
    fn missing_queries() {
        assert!(is_missing(""));
        assert!(is_missing("  \t"));
        assert!(is_missing("nan"));
        assert!(!is_missing("Nan"));
        assert!(!is_missing("Nantes"));
    }
}
