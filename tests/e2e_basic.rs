use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn bin(dir: &Path) -> Command {
    let path = assert_cmd::cargo::cargo_bin!("campus-assist");
    let mut cmd = Command::new(path);
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .args(["--config", "missing.toml"]);
    cmd
}

fn seeded() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(
        dir.path().join("data/campus_data.json"),
        r#"[
            {"question": "Where is the canteen located?", "answer": "Block C, ground floor."},
            {"question": "How do I reset my hostel wifi password?", "answer": "Ask the hostel warden."}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("data/scholarships.json"),
        r#"[
            {"name": "Merit Grant", "benefit": "Full tuition", "course": "any", "min_year": 1, "category": "any", "max_income": 500000},
            {"name": "CS Fellowship", "benefit": "₹50,000", "course": "cs", "min_year": 3, "category": "any", "max_income": 800000}
        ]"#,
    )
    .unwrap();
    dir
}

fn stdout_json(assert: &assert_cmd::assert::Assert) -> Value {
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn ask_exam_returns_canned_answer_and_counts_it() {
    let dir = seeded();
    let assert = bin(dir.path())
        .args(["--output", "json", "ask", "when", "is", "the", "exam"])
        .assert()
        .success();

    let json = stdout_json(&assert);
    assert_eq!(json["intent"], "exam");
    assert_eq!(json["confidence"], "High");
    assert_eq!(json["answer"], "Exam form deadline is 15th March.");

    let stats: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("data/analytics.json")).unwrap())
            .unwrap();
    assert_eq!(stats["total_queries"], 1);
    assert_eq!(stats["exam"], 1);
}

#[test]
fn ask_leaves_unreadable_counters_untouched() {
    let dir = seeded();
    let counters = dir.path().join("data/analytics.json");
    let corrupt = r#"{"total_queries": 5000, "exam": 4000,}"#;
    fs::write(&counters, corrupt).unwrap();

    bin(dir.path())
        .args(["--output", "json", "ask", "exam"])
        .assert()
        .success()
        .stderr(predicate::str::contains("leaving unreadable usage counters untouched"));

    assert_eq!(fs::read_to_string(&counters).unwrap(), corrupt);
}

#[test]
fn ask_falls_back_to_similarity_then_apology() {
    let dir = seeded();
    let assert = bin(dir.path())
        .args(["--no-analytics", "--output", "json", "ask", "where is the canteen"])
        .assert()
        .success();
    let json = stdout_json(&assert);
    assert_eq!(json["intent"], "general");
    assert_eq!(json["confidence"], "Medium");
    assert_eq!(json["answer"], "Block C, ground floor.");

    let assert = bin(dir.path())
        .args(["--no-analytics", "--output", "json", "ask", "what is the weather"])
        .assert()
        .success();
    let json = stdout_json(&assert);
    assert_eq!(json["intent"], "unknown");
    assert_eq!(json["confidence"], "Low");
    assert!(!dir.path().join("data/analytics.json").exists());
}

#[test]
fn ask_blank_question_is_rejected_softly() {
    let dir = TempDir::new().unwrap();
    bin(dir.path())
        .args(["--no-analytics", "ask", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Please type a valid question."))
        .stdout(predicate::str::contains("confidence: Low"));
}

#[test]
fn recommend_preserves_rule_order_and_reasons() {
    let dir = seeded();
    let assert = bin(dir.path())
        .args([
            "--no-analytics",
            "--output",
            "json",
            "recommend",
            "--course",
            "CS",
            "--year",
            "2",
            "--category",
            "general",
            "--income",
            "300000",
        ])
        .assert()
        .success();

    let json = stdout_json(&assert);
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["name"], "Merit Grant");
    assert_eq!(data[0]["eligible"], true);
    assert_eq!(data[0]["probability"], "90%");
    assert_eq!(data[0]["reasons"].as_array().unwrap().len(), 4);
    assert_eq!(data[1]["name"], "CS Fellowship");
    assert_eq!(data[1]["eligible"], false);
    assert_eq!(data[1]["probability"], "20%");
    assert_eq!(data[1]["reasons"][1], "✘ Minimum year required: 3");
}

#[test]
fn recommend_without_rules_file_prints_nothing_found() {
    let dir = TempDir::new().unwrap();
    bin(dir.path())
        .args(["--no-analytics", "recommend", "--year", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No scholarships found."));
}

#[test]
fn eval_fails_below_required_pass_rate() {
    let dir = seeded();
    fs::write(
        dir.path().join("cases.json"),
        r#"[
            {"case_id": "c1", "question": "library hours", "expected_intent": "library", "expected_confidence": "High"},
            {"case_id": "c2", "question": "hostel wifi password", "expected_intent": "general", "expected_answer": "Ask the hostel warden."},
            {"case_id": "c3", "question": "weather", "expected_intent": "general"}
        ]"#,
    )
    .unwrap();

    bin(dir.path())
        .args(["eval", "--cases", "cases.json", "--min-pass-rate", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("passed=2"));

    bin(dir.path())
        .args(["eval", "--cases", "cases.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("below required"));
}

#[test]
fn unknown_output_format_is_an_error() {
    let dir = TempDir::new().unwrap();
    bin(dir.path())
        .args(["--output", "xml", "stats"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown output format: xml"));
}
