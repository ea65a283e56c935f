use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{SketchError, SketchResult};
use crate::submission::{PredictionRecord, Submission, SubmissionSink};

/// Storage key the prediction list is persisted under.
pub const PREDICTIONS_STORAGE_KEY: &str = "intuited_predictions";

/// In-memory prediction list, newest first.
///
/// Serializes to a JSON array so hosts can keep it in any key-value store
/// under `PREDICTIONS_STORAGE_KEY`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionStore {
    records: IndexMap<String, PredictionRecord>,
}

impl PredictionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(input: &str) -> SketchResult<Self> {
        let records: Vec<PredictionRecord> = serde_json::from_str(input).map_err(|e| {
            SketchError::Serialization(format!("failed to parse stored predictions: {e}"))
        })?;

        let mut store = Self::default();
        for record in records {
            record.path.validate()?;
            if store.records.contains_key(&record.id) {
                return Err(SketchError::InvalidData(format!(
                    "duplicate prediction id `{}`",
                    record.id
                )));
            }
            store.records.insert(record.id.clone(), record);
        }
        Ok(store)
    }

    pub fn to_json(&self) -> SketchResult<String> {
        let records: Vec<&PredictionRecord> = self.records.values().collect();
        serde_json::to_string(&records).map_err(|e| {
            SketchError::Serialization(format!("failed to serialize predictions: {e}"))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn list(&self) -> impl Iterator<Item = &PredictionRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PredictionRecord> {
        self.records.get(id)
    }

    /// Removes a record, returning it when it existed.
    pub fn delete(&mut self, id: &str) -> Option<PredictionRecord> {
        let removed = self.records.shift_remove(id);
        if removed.is_none() {
            warn!(id, "delete requested for unknown prediction");
        }
        removed
    }

    /// Stores a submission at the front of the list and returns its id.
    pub fn insert(&mut self, submission: Submission) -> SketchResult<String> {
        if submission.path.is_empty() {
            return Err(SketchError::Submission(
                "cannot store an empty forecast path".to_owned(),
            ));
        }
        submission.path.validate()?;

        let base = submission.metadata.submitted_at.timestamp_millis().to_string();
        let id = self.unique_id(base);
        let record = PredictionRecord::from_submission(id.clone(), submission);
        self.records.shift_insert(0, id.clone(), record);
        info!(%id, count = self.records.len(), "prediction stored");
        Ok(id)
    }

    fn unique_id(&self, base: String) -> String {
        if !self.records.contains_key(&base) {
            return base;
        }
        let mut suffix = 1u32;
        loop {
            let candidate = format!("{base}-{suffix}");
            if !self.records.contains_key(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }
}

impl SubmissionSink for PredictionStore {
    fn accept(&mut self, submission: Submission) -> SketchResult<()> {
        self.insert(submission).map(|_| ())
    }
}
