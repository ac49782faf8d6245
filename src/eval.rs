use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::composer::ResponseComposer;
use crate::model::{Confidence, Intent};

pub const DEFAULT_REQUIRED_PASS_RATE: f32 = 0.85;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalCase {
    pub case_id: String,
    pub question: String,
    pub expected_intent: Intent,
    #[serde(default)]
    pub expected_confidence: Option<Confidence>,
    #[serde(default)]
    pub expected_answer: Option<String>,
}

impl EvalCase {
    pub fn matches(&self, intent: Intent, confidence: Confidence, answer: &str) -> bool {
        if self.expected_intent != intent {
            return false;
        }
        if self.expected_confidence.is_some_and(|c| c != confidence) {
            return false;
        }
        if let Some(expected) = &self.expected_answer {
            if expected != answer {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalOutcome {
    pub case_id: String,
    pub passed: bool,
    pub actual_intent: Intent,
    pub actual_confidence: Confidence,
    pub actual_answer: String,
    pub latency_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f32,
    pub outcomes: Vec<EvalOutcome>,
}

impl EvalSummary {
    pub fn meets(&self, required_pass_rate: f32) -> bool {
        self.pass_rate >= required_pass_rate
    }
}

pub fn evaluate_cases(composer: &ResponseComposer, cases: &[EvalCase]) -> EvalSummary {
    let mut outcomes = Vec::with_capacity(cases.len());

    for case in cases {
        let start = Instant::now();
        let response = composer.get_response(&case.question);
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        outcomes.push(EvalOutcome {
            case_id: case.case_id.clone(),
            passed: case.matches(response.intent, response.confidence, &response.answer),
            actual_intent: response.intent,
            actual_confidence: response.confidence,
            actual_answer: response.answer,
            latency_ms,
        });
    }

    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.passed).count();
    let failed = total.saturating_sub(passed);
    let pass_rate = if total == 0 {
        0.0
    } else {
        passed as f32 / total as f32
    };

    EvalSummary {
        total,
        passed,
        failed,
        pass_rate,
        outcomes,
    }
}
