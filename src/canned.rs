use crate::model::Intent;

pub const EMPTY_QUERY_ANSWER: &str = "Please type a valid question.";
pub const NOT_FOUND_ANSWER: &str = "Sorry, I couldn’t find that information.";

/// Fixed, authoritative answers keyed by intent.
#[derive(Debug, Clone)]
pub struct CannedResponses {
    entries: Vec<(Intent, String)>,
}

impl CannedResponses {
    pub fn new(entries: Vec<(Intent, String)>) -> Self {
        Self { entries }
    }

    pub fn get(&self, intent: Intent) -> Option<&str> {
        self.entries
            .iter()
            .find(|(i, _)| *i == intent)
            .map(|(_, answer)| answer.as_str())
    }
}

impl Default for CannedResponses {
    fn default() -> Self {
        Self::new(vec![
            (Intent::Exam, "Exam form deadline is 15th March.".to_string()),
            (Intent::Library, "Library timings are 9 AM to 8 PM.".to_string()),
            (
                Intent::Notice,
                "All notices are available on the university website.".to_string(),
            ),
            // Points at the separate recommendation entry point; it does not
            // run the evaluator.
            (
                Intent::Scholarship,
                "Use the scholarship section below to get personalized recommendations."
                    .to_string(),
            ),
        ])
    }
}
