use tracing::debug;

use crate::model::{Check, EligibilityResult, Profile, Reason, ScholarshipRule};

const ANY: &str = "any";

fn wildcard_or_equal(rule_value: &str, profile_value: &str) -> bool {
    rule_value.eq_ignore_ascii_case(ANY) || rule_value.to_lowercase() == profile_value.to_lowercase()
}

fn reason(check: Check, passed: bool, pass: String, fail: String) -> Reason {
    Reason {
        check,
        passed,
        message: if passed { pass } else { fail },
    }
}

/// Coarse signal derived only from the verdict.
pub fn probability(eligible: bool) -> &'static str {
    if eligible { "90%" } else { "20%" }
}

pub fn evaluate_rule(profile: &Profile, rule: &ScholarshipRule) -> EligibilityResult {
    let course = profile.course.to_uppercase();
    let category = profile.category.to_lowercase();

    let reasons = vec![
        reason(
            Check::Course,
            wildcard_or_equal(&rule.course, &profile.course),
            format!("✔ Course matched ({course})"),
            format!("✘ Course not eligible ({course})"),
        ),
        reason(
            Check::Year,
            profile.year >= rule.min_year,
            format!("✔ Year eligible ({})", profile.year),
            format!("✘ Minimum year required: {}", rule.min_year),
        ),
        reason(
            Check::Category,
            wildcard_or_equal(&rule.category, &profile.category),
            "✔ Category accepted".to_string(),
            format!("✘ Category mismatch ({category})"),
        ),
        reason(
            Check::Income,
            profile.income <= rule.max_income,
            format!("✔ Income below ₹{}", rule.max_income),
            format!("✘ Income above ₹{}", rule.max_income),
        ),
    ];

    let eligible = reasons.iter().all(|r| r.passed);
    debug!(scholarship = %rule.name, eligible, "evaluated scholarship");

    EligibilityResult {
        name: rule.name.clone(),
        benefit: rule.benefit.clone(),
        eligible,
        probability: probability(eligible).to_string(),
        reasons,
    }
}

/// One result per rule, in rule order.
pub fn evaluate(profile: &Profile, rules: &[ScholarshipRule]) -> Vec<EligibilityResult> {
    rules.iter().map(|rule| evaluate_rule(profile, rule)).collect()
}
