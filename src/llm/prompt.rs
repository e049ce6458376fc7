//! Prompt Assembler - grounding prompt for the answer model
//!
//! Layout: persona preamble, `Knowledge Base Context:` with one `Q:`/`A:`
//! block per ranked entry (in ranked order), the user's question verbatim,
//! the numbered response instructions, and the `Answer:` cue.

use std::fmt::Write;

use crate::context::KnowledgeEntry;

/// Persona, scope restriction and context header.
const SYSTEM_PREAMBLE: &str = r#"You are Bee AI, a friendly and helpful assistant specialized in bee behavior, plant phenology, and honey production.
You can answer questions about bees, plants, honey production, and general beekeeping topics.

IMPORTANT:
- For bee-related questions, use ONLY the provided knowledge base
- For general greetings and casual conversation, respond naturally and friendly
- If asked about topics not in your knowledge base, provide helpful information BUT ONLY about EUROPEAN countries and regions
- You are restricted to European knowledge only - do not provide information about other continents

Knowledge Base Context:
"#;

/// Response-style rules placed after the user question.
const INSTRUCTIONS: &str = r#"Instructions:
1. If this is a greeting (hello, hi, etc.), respond warmly and introduce yourself as Bee AI
2. If this is a bee-related question, answer ONLY based on the knowledge base provided above
3. If the question is about plants/flowers/animals/beekeeping NOT in the knowledge base, provide helpful information using your own knowledge BUT RESTRICT to EUROPEAN countries and regions only
4. If the question is not covered in the knowledge base, provide helpful information using your own knowledge but RESTRICT your knowledge to EUROPEAN countries and regions only
5. For general conversation, be friendly and helpful while steering toward bee topics when appropriate
6. Provide detailed, scientific answers with specific data when available from the knowledge base
7. Include relevant dates, locations, and scientific references when mentioned in the knowledge base
8. IMPORTANT: Never provide information about non-European countries or regions
9. CRITICAL: Keep your responses SHORT and CONCISE - maximum 2-3 sentences unless specifically asked for detailed information
10. DO NOT introduce yourself or mention "Bee AI" in responses unless it's a greeting - just answer the question directly
11. USE YOUR OWN KNOWLEDGE: For topics not in the knowledge base, use your general knowledge about European plants, animals, and beekeeping"#;

/// Final cue the prompt always ends with.
pub const ANSWER_CUE: &str = "Answer:";

/// Build the model prompt for `question` grounded on `ranked` entries.
///
/// An empty `ranked` slice leaves the context section empty.
pub fn assemble_prompt(question: &str, ranked: &[&KnowledgeEntry]) -> String {
    let context_len: usize = ranked
        .iter()
        .map(|e| e.question().len() + e.answer().len() + 8)
        .sum();
    let mut prompt = String::with_capacity(
        SYSTEM_PREAMBLE.len() + context_len + question.len() + INSTRUCTIONS.len() + 32,
    );

    prompt.push_str(SYSTEM_PREAMBLE);

    for entry in ranked {
        // Writing into a String cannot fail.
        let _ = write!(prompt, "\nQ: {}\nA: {}\n", entry.question(), entry.answer());
    }

    let _ = write!(prompt, "\n\nUser Question: {question}\n\n");
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str("\n\n");
    prompt.push_str(ANSWER_CUE);

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daisy() -> KnowledgeEntry {
        KnowledgeEntry::new(
            "Where do daisies grow best in Europe?",
            "Daisies grow best in temperate European meadows.",
        )
    }

    #[test]
    fn test_contains_question_and_ends_with_cue() {
        let question = "Where do daisies grow?";
        let prompt = assemble_prompt(question, &[]);
        assert!(prompt.contains("User Question: Where do daisies grow?"));
        assert!(prompt.ends_with("Answer:"));
    }

    #[test]
    fn test_empty_context_is_well_formed() {
        let prompt = assemble_prompt("hello", &[]);
        assert!(prompt.starts_with("You are Bee AI"));
        assert!(prompt.contains("Knowledge Base Context:\n\n\nUser Question: hello"));
        assert!(!prompt.contains("\nQ: "));
    }

    #[test]
    fn test_entry_embedded_before_question() {
        let entry = daisy();
        let prompt = assemble_prompt("Where do daisies grow?", &[&entry]);

        let block = "\nQ: Where do daisies grow best in Europe?\nA: Daisies grow best in temperate European meadows.\n";
        let block_at = prompt.find(block).expect("Q/A block present");
        let question_at = prompt.find("User Question:").expect("question present");
        assert!(block_at < question_at);
    }

    #[test]
    fn test_entries_keep_ranked_order() {
        let first = KnowledgeEntry::new("first q", "first a");
        let second = KnowledgeEntry::new("second q", "second a");
        let prompt = assemble_prompt("q", &[&second, &first]);
        assert!(prompt.find("Q: second q").unwrap() < prompt.find("Q: first q").unwrap());
    }

    #[test]
    fn test_question_inserted_verbatim() {
        let question = "  Does {honey} crystallise? 100% \"raw\"  ";
        let prompt = assemble_prompt(question, &[]);
        assert!(prompt.contains(question));
    }

    #[test]
    fn test_instructions_present() {
        let prompt = assemble_prompt("q", &[]);
        assert!(prompt.contains("1. If this is a greeting"));
        assert!(prompt.contains("9. CRITICAL: Keep your responses SHORT and CONCISE"));
        assert!(prompt.contains("11. USE YOUR OWN KNOWLEDGE"));
        assert!(prompt.contains("restricted to European knowledge only"));
    }
}
