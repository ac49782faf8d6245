use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CampusError, Result};
use crate::model::Intent;
use crate::storage::{load_json, try_load_json};

/// Per-intent usage tallies persisted alongside the campus data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageCounters {
    pub total_queries: u64,
    pub exam: u64,
    pub scholarship: u64,
    pub library: u64,
    pub notice: u64,
    pub general: u64,
    pub unknown: u64,
}

impl UsageCounters {
    pub fn load(path: &Path) -> Self {
        load_json(path, Self::default())
    }

    /// A missing file starts from zero; any other failure is returned so the
    /// caller can leave an unreadable file untouched.
    pub fn try_load(path: &Path) -> Result<Self> {
        match try_load_json(path) {
            Err(CampusError::MissingData { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn record_chat(&mut self, intent: Intent) {
        self.total_queries += 1;
        *self.bucket(intent) += 1;
    }

    pub fn record_scholarship(&mut self) {
        self.total_queries += 1;
        self.scholarship += 1;
    }

    fn bucket(&mut self, intent: Intent) -> &mut u64 {
        match intent {
            Intent::Exam => &mut self.exam,
            Intent::Scholarship => &mut self.scholarship,
            Intent::Library => &mut self.library,
            Intent::Notice => &mut self.notice,
            Intent::General => &mut self.general,
            Intent::Unknown => &mut self.unknown,
        }
    }
}
