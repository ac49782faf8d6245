use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CampusError, Result};
use crate::model::{KnowledgeRecord, ScholarshipRule};

pub fn try_load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(CampusError::MissingData {
            path: path.to_path_buf(),
            reason: "file does not exist".to_string(),
        });
    }
    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

/// Reads `path` as JSON, returning `default` when it is absent or unreadable.
pub fn load_json<T: DeserializeOwned>(path: &Path, default: T) -> T {
    match try_load_json(path) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "falling back to default data");
            default
        }
    }
}

/// Loads the knowledge base, keeping only records that carry both a question
/// and an answer so the two stay index-aligned.
pub fn load_knowledge_base(path: &Path) -> Vec<KnowledgeRecord> {
    let raw: Vec<Value> = load_json(path, Vec::new());
    let total = raw.len();
    let records: Vec<KnowledgeRecord> = raw
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if records.len() != total {
        warn!(
            path = %path.display(),
            skipped = total - records.len(),
            "skipped knowledge records without question/answer"
        );
    }
    debug!(path = %path.display(), records = records.len(), "loaded knowledge base");
    records
}

pub fn load_scholarship_rules(path: &Path) -> Vec<ScholarshipRule> {
    let raw: Vec<Value> = load_json(path, Vec::new());
    let mut rules = Vec::with_capacity(raw.len());

    for (i, item) in raw.into_iter().enumerate() {
        match serde_json::from_value::<ScholarshipRule>(item) {
            Ok(rule) => rules.push(rule),
            Err(err) => warn!(path = %path.display(), index = i, error = %err, "skipping malformed scholarship rule"),
        }
    }

    rules
}
