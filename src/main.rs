mod cli;
mod output;

use std::fs::File;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use campus_assist::{
    CampusAssistant, Config, EvalCase, Profile, UsageCounters, evaluate_cases, load_json,
};

use crate::cli::{Cli, Commands};

const EXPLAIN_MATCHES: usize = 3;

fn main() {
    if let Err(err) = real_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Config {
    let mut config = Config::load(&cli.config);
    if let Some(path) = &cli.knowledge_base {
        config.knowledge_base = path.clone();
    }
    if let Some(path) = &cli.scholarships {
        config.scholarships = path.clone();
    }
    if let Some(path) = &cli.analytics {
        config.analytics = path.clone();
    }
    config
}

fn bump_analytics(cli: &Cli, config: &Config, record: impl FnOnce(&mut UsageCounters)) {
    if !cli.record_analytics {
        return;
    }
    let mut counters = match UsageCounters::try_load(&config.analytics) {
        Ok(counters) => counters,
        Err(err) => {
            warn!(path = %config.analytics.display(), error = %err, "leaving unreadable usage counters untouched");
            return;
        }
    };
    record(&mut counters);
    if let Err(err) = counters.save(&config.analytics) {
        warn!(path = %config.analytics.display(), error = %err, "could not save usage counters");
    }
}

fn build_profile(
    file: Option<&std::path::Path>,
    overrides: [(&str, Option<&String>); 4],
) -> Profile {
    let mut value = match file {
        Some(path) => load_json(path, Value::Object(Default::default())),
        None => Value::Object(Default::default()),
    };
    if let Value::Object(map) = &mut value {
        for (key, v) in overrides {
            if let Some(v) = v {
                map.insert(key.to_string(), Value::String(v.clone()));
            }
        }
    }
    Profile::from_value(value)
}

fn real_main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.validate().map_err(anyhow::Error::msg)?;

    let config = resolve_config(&cli);

    match &cli.command {
        Commands::Ask { question, explain } => {
            let assistant = CampusAssistant::from_config(&config);
            let query = question.join(" ");
            let response = assistant.get_response(&query);

            let matches = if *explain {
                let snapshot = assistant.snapshot();
                Some(
                    snapshot
                        .index()
                        .top_k(&query.trim().to_lowercase(), EXPLAIN_MATCHES)
                        .unwrap_or_default(),
                )
            } else {
                None
            };

            output::print_answer(&cli.output, &response, matches.as_deref())?;
            bump_analytics(&cli, &config, |c| c.record_chat(response.intent));
        }
        Commands::Recommend {
            profile,
            course,
            year,
            category,
            income,
        } => {
            let assistant = CampusAssistant::from_config(&config);
            let profile = build_profile(
                profile.as_deref(),
                [
                    ("course", course.as_ref()),
                    ("year", year.as_ref()),
                    ("category", category.as_ref()),
                    ("income", income.as_ref()),
                ],
            );
            let results = assistant.recommend_scholarships(&profile);
            output::print_scholarships(&cli.output, &results)?;
            bump_analytics(&cli, &config, UsageCounters::record_scholarship);
        }
        Commands::Eval {
            cases,
            min_pass_rate,
        } => {
            let assistant = CampusAssistant::from_config(&config);
            let file = File::open(cases).with_context(|| format!("open {}", cases.display()))?;
            let cases: Vec<EvalCase> =
                serde_json::from_reader(file).context("parse eval cases json")?;

            let summary = evaluate_cases(&assistant.snapshot(), &cases);
            output::print_eval(&cli.output, &summary, *min_pass_rate)?;
            if !summary.meets(*min_pass_rate) {
                anyhow::bail!(
                    "pass rate {:.4} below required {:.4}",
                    summary.pass_rate,
                    min_pass_rate
                );
            }
        }
        Commands::Stats => {
            let counters = UsageCounters::load(&config.analytics);
            output::print_stats(&cli.output, &counters)?;
        }
    }

    Ok(())
}
