use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    activity::{SponsorsActivity, SponsorshipHistory},
    errors::ActivityError,
    ledger::{OneTimePayment, RefundEvidence, SponsorshipRecord},
    utils::persistence::write_atomic,
};

use super::{Result, SponsorshipSource};

/// On-disk sponsorship input.
///
/// Either section may be used on its own: `records` for data already in
/// start/stop form, `activities` for raw `sponsorsActivities` nodes. When
/// both are present the replayed activity log comes first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SponsorshipDocument {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<SponsorshipRecord>,
    #[serde(default, alias = "nodes", skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<SponsorsActivity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_time: Vec<OneTimePayment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refunds: Vec<RefundEvidence>,
}

impl SponsorshipDocument {
    pub fn into_history(self) -> std::result::Result<SponsorshipHistory, ActivityError> {
        let mut history = SponsorshipHistory::from_activities(&self.activities)?;
        history.records.extend(self.records);
        history.one_time.extend(self.one_time);
        history.refunds.extend(self.refunds);
        Ok(history)
    }

    /// Flattens a history into record form, dropping the activity log.
    pub fn from_history(history: SponsorshipHistory) -> Self {
        Self {
            records: history.records,
            activities: Vec::new(),
            one_time: history.one_time,
            refunds: history.refunds,
        }
    }
}

/// Reads a [`SponsorshipDocument`] from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SponsorshipSource for JsonFileSource {
    fn load_history(&self) -> Result<SponsorshipHistory> {
        let document = load_document_from_path(&self.path)?;
        debug!(
            path = %self.path.display(),
            records = document.records.len(),
            activities = document.activities.len(),
            "sponsorship document loaded"
        );
        Ok(document.into_history()?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn load_document_from_path(path: &Path) -> Result<SponsorshipDocument> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Writes the document atomically as pretty-printed JSON.
pub fn save_document_to_path(document: &SponsorshipDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    write_atomic(path, &json)?;
    Ok(())
}
