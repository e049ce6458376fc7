//! Keyword expansion table
//!
//! Static mapping from a canonical query term to related terms. Consulted
//! read-only by the ranker; expansion is one level deep, so synonyms of
//! synonyms are never added.

use std::collections::BTreeSet;

/// Canonical term → synonym set.
pub static KEYWORD_EXPANSIONS: &[(&str, &[&str])] = &[
    ("daisies", &["daisy", "bellis", "marguerite", "oxeye"]),
    ("grow", &["growing", "cultivate", "plant", "planting", "cultivation"]),
    ("best", &["optimal", "ideal", "perfect", "excellent", "suitable"]),
    ("where", &["location", "place", "region", "area", "country"]),
    ("bees", &["bee", "honeybee", "pollinator", "pollination"]),
    ("honey", &["nectar", "honey production", "honey yield"]),
    ("bloom", &["blooming", "flowering", "blossom", "blossoming"]),
    ("season", &["time", "period", "when", "timing"]),
];

/// Synonyms for a canonical term, if the term is in the table.
pub fn synonyms(term: &str) -> Option<&'static [&'static str]> {
    KEYWORD_EXPANSIONS
        .iter()
        .find(|(canonical, _)| *canonical == term)
        .map(|(_, synonyms)| *synonyms)
}

/// Lowercase the query, split on whitespace and union in the synonyms of every
/// token that is a canonical term.
///
/// Tokens are kept as-is (punctuation included), so `"grow?"` does not expand.
pub fn expand_query(query: &str) -> BTreeSet<String> {
    let lowered = query.to_lowercase();
    let mut keywords: BTreeSet<String> = lowered.split_whitespace().map(str::to_string).collect();

    for token in lowered.split_whitespace() {
        if let Some(extra) = synonyms(token) {
            keywords.extend(extra.iter().map(|s| (*s).to_string()));
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_keywords() {
        assert!(expand_query("").is_empty());
        assert!(expand_query("   \t\n").is_empty());
    }

    #[test]
    fn test_tokens_are_lowercased_and_deduplicated() {
        let keywords = expand_query("Clover CLOVER clover");
        assert_eq!(keywords.len(), 1);
        assert!(keywords.contains("clover"));
    }

    #[test]
    fn test_canonical_term_expands() {
        let keywords = expand_query("Bees");
        for term in ["bees", "bee", "honeybee", "pollinator", "pollination"] {
            assert!(keywords.contains(term), "missing {term}");
        }
        assert_eq!(keywords.len(), 5);
    }

    #[test]
    fn test_expansion_is_one_level_deep() {
        // "when" is a synonym of "season" but not itself a canonical term.
        let keywords = expand_query("season");
        assert!(keywords.contains("when"));
        assert!(synonyms("when").is_none());
        assert_eq!(keywords.len(), 5);
    }

    #[test]
    fn test_punctuated_token_does_not_expand() {
        let keywords = expand_query("grow?");
        assert_eq!(keywords.into_iter().collect::<Vec<_>>(), vec!["grow?"]);
    }

    #[test]
    fn test_multi_word_synonyms_are_kept_whole() {
        let keywords = expand_query("honey");
        assert!(keywords.contains("honey production"));
        assert!(keywords.contains("honey yield"));
    }
}
