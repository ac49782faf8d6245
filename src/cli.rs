use std::path::PathBuf;

use clap::{Parser, Subcommand};

use campus_assist::DEFAULT_REQUIRED_PASS_RATE;

#[derive(Parser, Debug)]
#[command(
    name = "campus-assist",
    version,
    about = "Answer campus questions and match scholarships"
)]
pub struct Cli {
    #[arg(long, global = true, default_value = "campus.toml")]
    pub config: PathBuf,

    #[arg(long, global = true)]
    pub knowledge_base: Option<PathBuf>,

    #[arg(long, global = true)]
    pub scholarships: Option<PathBuf>,

    #[arg(long, global = true)]
    pub analytics: Option<PathBuf>,

    // Counting is on by default; only the negative toggle is exposed.
    #[arg(long = "no-analytics", global = true, default_value_t = true, action = clap::ArgAction::SetFalse)]
    pub record_analytics: bool,

    #[arg(long, global = true, default_value = "text")]
    pub output: String,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Answer a free-text question.
    Ask {
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        /// Also print the closest knowledge-base matches.
        #[arg(long)]
        explain: bool,
    },
    /// Evaluate a student profile against every configured scholarship.
    Recommend {
        /// JSON file holding the profile; individual flags override its fields.
        #[arg(long)]
        profile: Option<PathBuf>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        income: Option<String>,
    },
    /// Run a JSON list of question cases and report the pass rate.
    Eval {
        #[arg(long)]
        cases: PathBuf,
        #[arg(long, default_value_t = DEFAULT_REQUIRED_PASS_RATE)]
        min_pass_rate: f32,
    },
    /// Print usage counters.
    Stats,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if let Commands::Eval { min_pass_rate, .. } = &self.command {
            if !(0.0..=1.0).contains(min_pass_rate) {
                return Err("min-pass-rate must be within 0..=1".to_string());
            }
        }
        Ok(())
    }
}
