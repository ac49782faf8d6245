use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CampusError, Result};
use crate::model::KnowledgeRecord;
use crate::tfidf::{SparseVector, TfidfVectorizer};

pub const DEFAULT_THRESHOLD: f32 = 0.3;

pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let (na, nb) = (a.norm(), b.norm());
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        a.dot(b) / (na * nb)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub index: usize,
    pub answer: String,
    pub score: f32,
}

struct Fitted {
    vectorizer: TfidfVectorizer,
    vectors: Vec<SparseVector>,
}

/// Immutable similarity index over knowledge-base questions.
///
/// `vectors[i]` and `records[i]` always describe the same record.
pub struct SimilarityIndex {
    records: Vec<KnowledgeRecord>,
    fitted: Option<Fitted>,
    threshold: f32,
}

impl SimilarityIndex {
    pub fn build(records: Vec<KnowledgeRecord>, threshold: f32) -> Self {
        let fitted = if records.is_empty() {
            None
        } else {
            let questions: Vec<&str> = records.iter().map(|r| r.question.as_str()).collect();
            let vectorizer = TfidfVectorizer::fit(&questions);
            if vectorizer.vocabulary_len() == 0 {
                None
            } else {
                let vectors = questions.iter().map(|q| vectorizer.transform(q)).collect();
                Some(Fitted { vectorizer, vectors })
            }
        };

        match &fitted {
            Some(f) => info!(
                records = records.len(),
                terms = f.vectorizer.vocabulary_len(),
                "built similarity index"
            ),
            None => info!(records = records.len(), "similarity search disabled"),
        }

        Self {
            records,
            fitted,
            threshold,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.fitted.is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Scores every indexed question against `query`, in index order.
    pub fn scores(&self, query: &str) -> Result<Vec<f32>> {
        let Some(fitted) = &self.fitted else {
            return Ok(Vec::new());
        };

        let q = fitted.vectorizer.transform(query);
        if q.is_empty() {
            return Err(CampusError::Vectorization(
                "query has no indexed terms".to_string(),
            ));
        }

        let scores: Vec<f32> = fitted
            .vectors
            .iter()
            .map(|v| cosine_similarity(&q, v))
            .collect();
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(CampusError::Vectorization("non-finite score".to_string()));
        }
        Ok(scores)
    }

    /// Highest-scoring records first; equal scores keep index order.
    pub fn top_k(&self, query: &str, k: usize) -> Result<Vec<Match>> {
        let mut scored: Vec<(usize, f32)> = self.scores(query)?.into_iter().enumerate().collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(index, score)| self.to_match(index, score))
            .collect())
    }

    /// Best match strictly above the threshold; ties go to the lowest index.
    pub fn try_search(&self, query: &str) -> Result<Option<Match>> {
        let scores = self.scores(query)?;
        let mut best: Option<(usize, f32)> = None;
        for (i, &s) in scores.iter().enumerate() {
            if best.is_none_or(|(_, b)| s > b) {
                best = Some((i, s));
            }
        }

        Ok(best
            .filter(|&(_, score)| score > self.threshold)
            .map(|(index, score)| self.to_match(index, score)))
    }

    pub fn search(&self, query: &str) -> Option<Match> {
        match self.try_search(query) {
            Ok(found) => found,
            Err(err) => {
                debug!(error = %err, "similarity search treated as no match");
                None
            }
        }
    }

    fn to_match(&self, index: usize, score: f32) -> Match {
        Match {
            index,
            answer: self.records[index].answer.clone(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(q: &str, a: &str) -> KnowledgeRecord {
        KnowledgeRecord {
            question: q.to_string(),
            answer: a.to_string(),
        }
    }

    fn campus() -> SimilarityIndex {
        SimilarityIndex::build(
            vec![
                rec("Where is the canteen located?", "Block C, ground floor."),
                rec("How do I reset my hostel wifi password?", "Ask the hostel warden."),
            ],
            DEFAULT_THRESHOLD,
        )
    }

    #[test]
    fn exact_question_is_returned() {
        let index = campus();
        let m = index.search("how do i reset my hostel wifi password").expect("match");
        assert_eq!(m.index, 1);
        assert_eq!(m.answer, "Ask the hostel warden.");
        assert!((m.score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn unrelated_query_scores_below_exact_and_misses() {
        let index = campus();
        let exact = index.scores("where is the canteen located").unwrap()[0];
        assert!(index.search("what is the weather").is_none());
        assert!(matches!(
            index.try_search("what is the weather"),
            Err(CampusError::Vectorization(_))
        ));
        assert!((exact - 1.0).abs() < 1e-5);
    }

    #[test]
    fn empty_index_is_disabled() {
        let index = SimilarityIndex::build(Vec::new(), DEFAULT_THRESHOLD);
        assert!(!index.is_enabled());
        assert_eq!(index.try_search("canteen").unwrap(), None);
        assert!(index.search("anything").is_none());
    }

    #[test]
    fn stop_word_only_corpus_is_disabled() {
        let index = SimilarityIndex::build(vec![rec("what is this", "x")], DEFAULT_THRESHOLD);
        assert!(!index.is_enabled());
        assert!(index.search("what is this").is_none());
    }

    #[test]
    fn ties_resolve_to_first_record() {
        let index = SimilarityIndex::build(
            vec![rec("canteen timings", "first"), rec("canteen timings", "second")],
            DEFAULT_THRESHOLD,
        );
        assert_eq!(index.search("canteen timings").unwrap().answer, "first");
        let ranked = index.top_k("canteen timings", 2).unwrap();
        assert_eq!(ranked[0].index, 0);
        assert_eq!(ranked[1].index, 1);
    }

    #[test]
    fn threshold_is_strict() {
        let index = campus();
        let score = index.scores("canteen").unwrap()[0];
        let strict = SimilarityIndex::build(
            vec![
                rec("Where is the canteen located?", "Block C, ground floor."),
                rec("How do I reset my hostel wifi password?", "Ask the hostel warden."),
            ],
            score,
        );
        assert!(strict.search("canteen").is_none());
        assert!(index.search("canteen").is_some());
    }
}
