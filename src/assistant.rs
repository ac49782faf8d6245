use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::composer::ResponseComposer;
use crate::config::Config;
use crate::model::{ChatResponse, EligibilityResult, Profile};
use crate::retrieval::SimilarityIndex;
use crate::scholarship;
use crate::storage::{load_knowledge_base, load_scholarship_rules};

/// Process-wide entry points for chat and scholarship matching.
///
/// The composer is an immutable snapshot; reloading builds a new one and swaps
/// the `Arc`, so queries already holding the old snapshot finish on it.
pub struct CampusAssistant {
    knowledge_base: PathBuf,
    scholarships: PathBuf,
    threshold: f32,
    current: RwLock<Arc<ResponseComposer>>,
}

impl CampusAssistant {
    pub fn from_config(config: &Config) -> Self {
        let composer = Self::build_composer(&config.knowledge_base, config.similarity_threshold);
        Self {
            knowledge_base: config.knowledge_base.clone(),
            scholarships: config.scholarships.clone(),
            threshold: config.similarity_threshold,
            current: RwLock::new(Arc::new(composer)),
        }
    }

    fn build_composer(path: &std::path::Path, threshold: f32) -> ResponseComposer {
        let records = load_knowledge_base(path);
        ResponseComposer::with_index(SimilarityIndex::build(records, threshold))
    }

    pub fn snapshot(&self) -> Arc<ResponseComposer> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get_response(&self, query: &str) -> ChatResponse {
        self.snapshot().get_response(query)
    }

    /// Reads the rules file on every call.
    pub fn recommend_scholarships(&self, profile: &Profile) -> Vec<EligibilityResult> {
        let rules = load_scholarship_rules(&self.scholarships);
        scholarship::evaluate(profile, &rules)
    }

    pub fn reload_knowledge_base(&self) {
        let composer = Arc::new(Self::build_composer(&self.knowledge_base, self.threshold));
        let records = composer.index().len();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = composer;
        info!(path = %self.knowledge_base.display(), records, "reloaded knowledge base");
    }
}
