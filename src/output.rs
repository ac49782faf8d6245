use std::io::{self, Write};

use serde::Serialize;

use campus_assist::error::{CampusError, Result};
use campus_assist::{ChatResponse, EligibilityResult, EvalSummary, Match, UsageCounters};

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}

fn check_format(format: &str) -> Result<()> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(CampusError::InvalidArg(format!("Unknown output format: {other}"))),
    }
}

#[derive(Serialize)]
struct JsonAnswer<'a> {
    #[serde(flatten)]
    response: &'a ChatResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<&'a [Match]>,
}

pub fn print_answer(format: &str, response: &ChatResponse, matches: Option<&[Match]>) -> Result<()> {
    check_format(format)?;
    if format == "json" {
        return print_json(&JsonAnswer { response, matches });
    }

    let mut out = io::stdout();
    writeln!(out, "{}", response.answer)?;
    writeln!(out, "intent: {}  confidence: {}", response.intent, response.confidence)?;
    if let Some(matches) = matches {
        writeln!(out)?;
        for m in matches {
            writeln!(out, "  #{:<3} {:.4}  {}", m.index, m.score, m.answer)?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonScholarships<'a> {
    data: &'a [EligibilityResult],
}

pub fn print_scholarships(format: &str, results: &[EligibilityResult]) -> Result<()> {
    check_format(format)?;
    if format == "json" {
        return print_json(&JsonScholarships { data: results });
    }

    let mut out = io::stdout();
    if results.is_empty() {
        writeln!(out, "No scholarships found.")?;
    }
    for r in results {
        let verdict = if r.eligible { "Eligible" } else { "Not Eligible" };
        writeln!(out, "{} - {}", r.name, verdict)?;
        writeln!(out, "  Benefit: {}", r.benefit)?;
        writeln!(out, "  Chance:  {}", r.probability)?;
        for reason in &r.reasons {
            writeln!(out, "  {}", reason.message)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_eval(format: &str, summary: &EvalSummary, required: f32) -> Result<()> {
    check_format(format)?;
    if format == "json" {
        return print_json(summary);
    }

    let mut out = io::stdout();
    writeln!(
        out,
        "total={} passed={} failed={} pass_rate={:.4} required={:.4} meets_threshold={}",
        summary.total,
        summary.passed,
        summary.failed,
        summary.pass_rate,
        required,
        summary.meets(required)
    )?;
    for o in &summary.outcomes {
        writeln!(
            out,
            "case={} passed={} intent={} confidence={} latency={:.2}ms",
            o.case_id, o.passed, o.actual_intent, o.actual_confidence, o.latency_ms
        )?;
    }
    Ok(())
}

pub fn print_stats(format: &str, counters: &UsageCounters) -> Result<()> {
    check_format(format)?;
    if format == "json" {
        return print_json(counters);
    }

    let mut out = io::stdout();
    writeln!(out, "Total queries: {}", counters.total_queries)?;
    for (label, n) in [
        ("exam", counters.exam),
        ("scholarship", counters.scholarship),
        ("library", counters.library),
        ("notice", counters.notice),
        ("general", counters.general),
        ("unknown", counters.unknown),
    ] {
        writeln!(out, "  {label:<12} {n}")?;
    }
    Ok(())
}
