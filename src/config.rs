use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::error::Result;
use crate::retrieval::DEFAULT_THRESHOLD;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub knowledge_base: PathBuf,
    pub scholarships: PathBuf,
    pub analytics: PathBuf,
    pub similarity_threshold: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_base: PathBuf::from("data/campus_data.json"),
            scholarships: PathBuf::from("data/scholarships.json"),
            analytics: PathBuf::from("data/analytics.json"),
            similarity_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Config {
    /// Parses TOML; a threshold that is not a finite value in `0..=1` is
    /// replaced by the default.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(contents)?;
        let t = config.similarity_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            warn!(threshold = t, "similarity_threshold out of range, using default");
            config.similarity_threshold = DEFAULT_THRESHOLD;
        }
        Ok(config)
    }

    /// Missing file means defaults; an unreadable or malformed one is logged
    /// and ignored.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).unwrap_or_else(|err| {
                warn!(path = %path.display(), error = %err, "ignoring malformed config");
                Self::default()
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Self::default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot read config, using defaults");
                Self::default()
            }
        }
    }
}
