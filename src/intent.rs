use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::Intent;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("word regex"));

/// Keyword-membership classifier.
///
/// Intents are tested in registration order and the first one with a keyword
/// present as a whole token wins.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    table: Vec<(Intent, Vec<String>)>,
}

impl IntentClassifier {
    pub fn new(table: Vec<(Intent, Vec<String>)>) -> Self {
        Self { table }
    }

    pub fn detect(&self, query: &str) -> Intent {
        let lowered = query.to_lowercase();
        let tokens: HashSet<&str> = WORD.find_iter(&lowered).map(|m| m.as_str()).collect();

        self.table
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| tokens.contains(k.as_str())))
            .map(|(intent, _)| *intent)
            .unwrap_or(Intent::General)
    }
}

impl Default for IntentClassifier {
    fn default() -> Self {
        let entry = |intent: Intent, words: &[&str]| -> (Intent, Vec<String>) {
            (intent, words.iter().map(|w| w.to_string()).collect())
        };
        Self::new(vec![
            entry(
                Intent::Exam,
                &["exam", "exams", "test", "tests", "paper", "papers", "date", "form", "forms"],
            ),
            entry(
                Intent::Scholarship,
                &["scholarship", "scholarships", "fee", "fees", "grant", "financial"],
            ),
            entry(Intent::Library, &["library", "libraries", "book", "books"]),
            entry(
                Intent::Notice,
                &["notice", "notices", "announcement", "announcements"],
            ),
        ])
    }
}
