//! Knowledge Store - question/answer corpus loaded once at startup
//!
//! The corpus is newline-delimited JSON in chat fine-tuning shape:
//!
//! ```text
//! {"messages": [{"role": "user", "content": "<question>"}, {"role": "assistant", "content": "<answer>"}]}
//! ```
//!
//! Only `content` is read; any other keys are ignored. Blank lines are
//! skipped. A malformed line aborts the whole load, there is no
//! skip-and-continue mode.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// One question/answer pair from the corpus.
///
/// Identity is the position in the store. The lowercase forms used by the
/// ranker are computed once here since entries never change after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    question: String,
    answer: String,
    question_lower: String,
    answer_lower: String,
    combined_lower: String,
}

impl KnowledgeEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let question = question.into();
        let answer = answer.into();
        let question_lower = question.to_lowercase();
        let answer_lower = answer.to_lowercase();
        let combined_lower = format!("{question_lower} {answer_lower}");
        Self {
            question,
            answer,
            question_lower,
            answer_lower,
            combined_lower,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub(crate) fn question_lower(&self) -> &str {
        &self.question_lower
    }

    pub(crate) fn answer_lower(&self) -> &str {
        &self.answer_lower
    }

    /// Lowercase question and answer joined by a single space.
    pub(crate) fn combined_lower(&self) -> &str {
        &self.combined_lower
    }
}

/// Errors raised while loading the corpus. All of them are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum KnowledgeError {
    #[error("cannot read knowledge corpus {}: {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),
    #[error("line {line}: invalid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: {reason}")]
    Shape { line: usize, reason: String },
    #[error("knowledge corpus contains no entries")]
    Empty,
}

#[derive(Deserialize)]
struct CorpusRecord {
    messages: Vec<CorpusMessage>,
}

#[derive(Deserialize)]
struct CorpusMessage {
    content: String,
}

/// Ordered, immutable collection of knowledge entries (insertion order = file order).
///
/// Shared read-only between request handlers after startup.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeStore {
    /// Build a store from entries already in memory.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    /// Load the corpus file. Fails on unreadable files, malformed lines and
    /// corpora with no entries.
    pub fn load(path: &Path) -> Result<Self, KnowledgeError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| KnowledgeError::Io(path.to_path_buf(), e))?;
        let store = Self::parse_jsonl(&contents)?;
        if store.is_empty() {
            return Err(KnowledgeError::Empty);
        }
        info!(path = %path.display(), entries = store.len(), "Loaded knowledge entries");
        Ok(store)
    }

    /// Parse newline-delimited JSON records. Line numbers in errors are 1-based.
    pub fn parse_jsonl(contents: &str) -> Result<Self, KnowledgeError> {
        let mut entries = Vec::new();

        for (idx, raw) in contents.lines().enumerate() {
            let line = idx + 1;
            if raw.trim().is_empty() {
                continue;
            }

            let record: CorpusRecord = serde_json::from_str(raw)
                .map_err(|source| KnowledgeError::Parse { line, source })?;

            let [question, answer]: [CorpusMessage; 2] =
                record.messages.try_into().map_err(|messages: Vec<CorpusMessage>| {
                    KnowledgeError::Shape {
                        line,
                        reason: format!(
                            "expected exactly 2 messages (question, answer), found {}",
                            messages.len()
                        ),
                    }
                })?;

            entries.push(KnowledgeEntry::new(question.content, answer.content));
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KnowledgeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TWO_LINES: &str = concat!(
        r#"{"messages":[{"role":"user","content":"When does clover bloom in Sweden?"},{"role":"assistant","content":"Clover blooms from May through July in Sweden."}]}"#,
        "\n",
        "\n",
        r#"{"messages":[{"content":"Where do daisies grow best in Europe?"},{"content":"Daisies grow best in temperate European meadows."}]}"#,
        "\n",
    );

    #[test]
    fn test_parse_preserves_file_order_and_skips_blank_lines() {
        let store = KnowledgeStore::parse_jsonl(TWO_LINES).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.entries()[0].question(), "When does clover bloom in Sweden?");
        assert_eq!(
            store.entries()[1].answer(),
            "Daisies grow best in temperate European meadows."
        );
    }

    #[test]
    fn test_entry_lowercase_forms() {
        let entry = KnowledgeEntry::new("Where do DAISIES grow?", "In Meadows.");
        assert_eq!(entry.question_lower(), "where do daisies grow?");
        assert_eq!(entry.answer_lower(), "in meadows.");
        assert_eq!(entry.combined_lower(), "where do daisies grow? in meadows.");
    }

    #[test]
    fn test_malformed_json_reports_line() {
        let input = format!("{TWO_LINES}{{not json}}\n");
        match KnowledgeStore::parse_jsonl(&input) {
            Err(KnowledgeError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_message_count_is_rejected() {
        let input = r#"{"messages":[{"content":"only a question"}]}"#;
        match KnowledgeStore::parse_jsonl(input) {
            Err(KnowledgeError::Shape { line, reason }) => {
                assert_eq!(line, 1);
                assert!(reason.contains("found 1"));
            }
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_content_is_a_parse_error() {
        let input = r#"{"messages":[{"role":"user"},{"content":"a"}]}"#;
        assert!(matches!(
            KnowledgeStore::parse_jsonl(input),
            Err(KnowledgeError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_LINES.as_bytes()).unwrap();

        let store = KnowledgeStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_rejects_empty_corpus() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\n   \n").unwrap();

        assert!(matches!(
            KnowledgeStore::load(file.path()),
            Err(KnowledgeError::Empty)
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = KnowledgeStore::load(Path::new("/nonexistent/corpus.jsonl"));
        assert!(matches!(result, Err(KnowledgeError::Io(_, _))));
    }
}
