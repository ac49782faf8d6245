pub mod analytics;
pub mod assistant;
pub mod canned;
pub mod composer;
pub mod config;
pub mod error;
pub mod eval;
pub mod intent;
pub mod model;
pub mod retrieval;
pub mod scholarship;
pub mod storage;
pub mod tfidf;

pub use analytics::UsageCounters;
pub use assistant::CampusAssistant;
pub use composer::ResponseComposer;
pub use config::Config;
pub use error::{CampusError, Result};
pub use eval::{DEFAULT_REQUIRED_PASS_RATE, EvalCase, EvalOutcome, EvalSummary, evaluate_cases};
pub use intent::IntentClassifier;
pub use model::{
    ChatResponse, Check, Confidence, EligibilityResult, Intent, KnowledgeRecord, Profile, Reason,
    ScholarshipRule,
};
pub use retrieval::{DEFAULT_THRESHOLD, Match, SimilarityIndex, cosine_similarity};
pub use storage::{load_json, load_knowledge_base, load_scholarship_rules, try_load_json};
