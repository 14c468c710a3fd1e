use std::{collections::BTreeMap, fs, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::CodecError;
use crate::sample::RideRequest;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineError {
    pub line: Option<usize>,
    pub message: String,
}

/// Summary of one labeling run over an input stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelReport {
    pub run_id: String,
    pub input: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub records_read: usize,
    pub records_labeled: usize,
    pub records_unlabeled: usize,
    pub errors: Vec<LineError>,
    pub by_profile: BTreeMap<String, usize>,
    pub by_schema: BTreeMap<String, usize>,
}

impl LabelReport {
    pub fn new(input: &str) -> Self {
        let started_at = Utc::now();
        Self {
            run_id: generate_run_id(started_at),
            input: input.to_string(),
            started_at,
            completed_at: None,
            records_read: 0,
            records_labeled: 0,
            records_unlabeled: 0,
            errors: Vec::new(),
            by_profile: BTreeMap::new(),
            by_schema: BTreeMap::new(),
        }
    }

    /// Counts a record after classification.
    pub fn add_record(&mut self, record: &RideRequest) {
        self.records_read += 1;
        *self
            .by_schema
            .entry(record.schema_version().to_string())
            .or_default() += 1;

        match record.sample().classification_label() {
            Some(profile) => {
                self.records_labeled += 1;
                *self.by_profile.entry(profile.to_string()).or_default() += 1;
            }
            None => self.records_unlabeled += 1,
        }
    }

    pub fn add_error(&mut self, err: &CodecError) {
        self.errors.push(LineError {
            line: err.line(),
            message: err.to_string(),
        });
    }

    pub fn finish(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    pub fn elapsed(&self) -> Option<std::time::Duration> {
        self.completed_at
            .and_then(|end| (end - self.started_at).to_std().ok())
    }

    pub fn summary(&self) -> String {
        let elapsed = self
            .elapsed()
            .map(|d| humantime::format_duration(d).to_string())
            .unwrap_or_else(|| String::from("running"));
        format!(
            "{} records ({} labeled, {} unlabeled, {} errors) in {}",
            self.records_read,
            self.records_labeled,
            self.records_unlabeled,
            self.errors.len(),
            elapsed
        )
    }

    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }
}

fn generate_run_id(start: DateTime<Utc>) -> String {
    let uuid = uuid::Uuid::new_v4();
    let timestamp = start.format("%Y%m%dT%H%M%SZ");
    format!("{}_{}", timestamp, uuid)
}
