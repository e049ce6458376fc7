//! Relevance Ranker - lexical scoring of corpus entries against a query
//!
//! For every expanded keyword an entry earns:
//!
//! | Match | Points |
//! |---|---|
//! | substring of the question | +3 |
//! | substring of the answer | +2 |
//! | substring of question + answer | +1 |
//! | per combined word in a substring relation with a keyword longer than 3 chars | +0.5 |
//!
//! The first three are cumulative, so a question hit is worth at least 4.
//! The partial-match bonus is counted once per qualifying word and may
//! overlap with the substring hits. Entries scoring zero are dropped, the rest
//! are sorted by descending score (stable, so ties keep file order) and
//! truncated to the result limit.

use std::collections::BTreeSet;

use super::expansion::expand_query;
use super::knowledge_store::{KnowledgeEntry, KnowledgeStore};
use crate::config::defaults::MAX_RESULTS;

const QUESTION_WEIGHT: f64 = 3.0;
const ANSWER_WEIGHT: f64 = 2.0;
const COMBINED_WEIGHT: f64 = 1.0;
const PARTIAL_WORD_WEIGHT: f64 = 0.5;

/// Keywords must be longer than this (in characters) to earn partial-word points.
const PARTIAL_MATCH_MIN_CHARS: usize = 3;

/// An entry paired with its score for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredEntry<'a> {
    pub entry: &'a KnowledgeEntry,
    pub score: f64,
}

/// Ranks store entries against free-text queries.
#[derive(Debug, Clone, Copy)]
pub struct RelevanceRanker {
    max_results: usize,
}

impl Default for RelevanceRanker {
    fn default() -> Self {
        Self::new(MAX_RESULTS)
    }
}

impl RelevanceRanker {
    pub const fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    pub const fn max_results(&self) -> usize {
        self.max_results
    }

    /// Top entries for `query`, best first, with their scores.
    ///
    /// An empty query or an empty store yields an empty result.
    pub fn rank_scored<'a>(&self, query: &str, store: &'a KnowledgeStore) -> Vec<ScoredEntry<'a>> {
        let keywords = expand_query(query);
        if keywords.is_empty() || store.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredEntry<'a>> = store
            .iter()
            .map(|entry| ScoredEntry {
                entry,
                score: score_entry(&keywords, entry),
            })
            .filter(|s| s.score > 0.0)
            .collect();

        // sort_by is stable: equal scores keep corpus order
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.max_results);
        scored
    }

    /// Top entries for `query`, best first.
    pub fn rank<'a>(&self, query: &str, store: &'a KnowledgeStore) -> Vec<&'a KnowledgeEntry> {
        self.rank_scored(query, store)
            .into_iter()
            .map(|s| s.entry)
            .collect()
    }
}

/// Score one entry against an already expanded keyword set.
pub fn score_entry(keywords: &BTreeSet<String>, entry: &KnowledgeEntry) -> f64 {
    let question = entry.question_lower();
    let answer = entry.answer_lower();
    let combined = entry.combined_lower();

    let mut score = 0.0;

    for keyword in keywords {
        if question.contains(keyword.as_str()) {
            score += QUESTION_WEIGHT;
        }
        if answer.contains(keyword.as_str()) {
            score += ANSWER_WEIGHT;
        }
        if combined.contains(keyword.as_str()) {
            score += COMBINED_WEIGHT;
        }
    }

    for keyword in keywords {
        if keyword.chars().count() <= PARTIAL_MATCH_MIN_CHARS {
            continue;
        }
        for word in combined.split_whitespace() {
            if word.contains(keyword.as_str()) || keyword.contains(word) {
                score += PARTIAL_WORD_WEIGHT;
            }
        }
    }

    score
}
