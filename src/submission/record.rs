use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capture::ForecastPath;
use crate::core::datetime_to_unix_millis;

/// Forecast horizon the user is predicting over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "4H")]
    FourHours,
    #[serde(rename = "1Q")]
    Quarter,
}

impl Timeframe {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::FourHours => "4H",
            Self::Quarter => "1Q",
        }
    }
}

/// Caller-supplied context attached to a path at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionMetadata {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionMetadata {
    #[must_use]
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe, submitted_at: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            submitted_at,
        }
    }

    #[must_use]
    pub fn now(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self::new(symbol, timeframe, Utc::now())
    }
}

/// Finalized path plus metadata, as handed to a `SubmissionSink`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub metadata: SubmissionMetadata,
    pub path: ForecastPath,
}

/// Persisted shape of one stored prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: String,
    pub symbol: String,
    pub timeframe: Timeframe,
    /// Submission wall-clock time in ms since epoch.
    pub timestamp: i64,
    pub path: ForecastPath,
}

impl PredictionRecord {
    #[must_use]
    pub fn from_submission(id: impl Into<String>, submission: Submission) -> Self {
        let Submission { metadata, path } = submission;
        Self {
            id: id.into(),
            symbol: metadata.symbol,
            timeframe: metadata.timeframe,
            timestamp: datetime_to_unix_millis(metadata.submitted_at),
            path,
        }
    }
}
