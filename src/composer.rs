use tracing::debug;

use crate::canned::{CannedResponses, EMPTY_QUERY_ANSWER, NOT_FOUND_ANSWER};
use crate::intent::IntentClassifier;
use crate::model::{ChatResponse, Confidence, Intent};
use crate::retrieval::SimilarityIndex;

/// Turns one free-text query into one answer.
///
/// Precedence is fixed: empty input, canned answer, similarity match, apology.
pub struct ResponseComposer {
    classifier: IntentClassifier,
    canned: CannedResponses,
    index: SimilarityIndex,
}

impl ResponseComposer {
    pub fn new(classifier: IntentClassifier, canned: CannedResponses, index: SimilarityIndex) -> Self {
        Self {
            classifier,
            canned,
            index,
        }
    }

    pub fn with_index(index: SimilarityIndex) -> Self {
        Self::new(IntentClassifier::default(), CannedResponses::default(), index)
    }

    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    pub fn get_response(&self, query: &str) -> ChatResponse {
        if query.trim().is_empty() {
            return ChatResponse::new(EMPTY_QUERY_ANSWER, Intent::Unknown, Confidence::Low);
        }

        let normalized = query.trim().to_lowercase();
        let intent = self.classifier.detect(&normalized);
        debug!(%intent, "classified query");

        if let Some(answer) = self.canned.get(intent) {
            return ChatResponse::new(answer, intent, Confidence::High);
        }

        if let Some(found) = self.index.search(&normalized) {
            debug!(index = found.index, score = found.score, "similarity match");
            return ChatResponse::new(found.answer, Intent::General, Confidence::Medium);
        }

        ChatResponse::new(NOT_FOUND_ANSWER, Intent::Unknown, Confidence::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::KnowledgeRecord;
    use crate::retrieval::DEFAULT_THRESHOLD;

    fn composer(records: Vec<(&str, &str)>) -> ResponseComposer {
        let records = records
            .into_iter()
            .map(|(q, a)| KnowledgeRecord {
                question: q.into(),
                answer: a.into(),
            })
            .collect();
        ResponseComposer::with_index(SimilarityIndex::build(records, DEFAULT_THRESHOLD))
    }

    #[test]
    fn empty_and_whitespace_queries_are_rejected() {
        let c = composer(vec![]);
        for q in ["", "   ", "\t\n"] {
            let r = c.get_response(q);
            assert_eq!(r.intent, Intent::Unknown);
            assert_eq!(r.confidence, Confidence::Low);
            assert_eq!(r.answer, EMPTY_QUERY_ANSWER);
        }
    }

    #[test]
    fn exam_keyword_returns_canned_answer() {
        let c = composer(vec![]);
        let r = c.get_response("When is the exam");
        assert_eq!(r.intent, Intent::Exam);
        assert_eq!(r.confidence, Confidence::High);
        assert_eq!(r.answer, "Exam form deadline is 15th March.");
    }

    #[test]
    fn canned_answer_wins_over_similarity() {
        let c = composer(vec![("library book return policy", "Return within 14 days.")]);
        let r = c.get_response("library book return policy");
        assert_eq!(r.intent, Intent::Library);
        assert_eq!(r.confidence, Confidence::High);
    }

    #[test]
    fn similarity_match_is_medium_general() {
        let c = composer(vec![
            ("Where is the canteen located?", "Block C, ground floor."),
            ("How do I reset my hostel wifi password?", "Ask the hostel warden."),
        ]);
        let r = c.get_response("  Where is the CANTEEN?  ");
        assert_eq!(r.intent, Intent::General);
        assert_eq!(r.confidence, Confidence::Medium);
        assert_eq!(r.answer, "Block C, ground floor.");
    }

    #[test]
    fn empty_knowledge_base_falls_back_to_apology() {
        let c = composer(vec![]);
        let r = c.get_response("what is the weather");
        assert_eq!(r.intent, Intent::Unknown);
        assert_eq!(r.confidence, Confidence::Low);
        assert_eq!(r.answer, NOT_FOUND_ANSWER);
    }

    #[test]
    fn repeated_queries_are_identical() {
        let c = composer(vec![("Where is the canteen located?", "Block C")]);
        assert_eq!(c.get_response("canteen location"), c.get_response("canteen location"));
    }
}
