//! Hand-off of finalized forecast paths to persistence.

mod record;
mod store;

pub use record::{PredictionRecord, Submission, SubmissionMetadata, Timeframe};
pub use store::{PREDICTIONS_STORAGE_KEY, PredictionStore};

use crate::error::SketchResult;

/// Receiver of submitted forecasts.
pub trait SubmissionSink {
    fn accept(&mut self, submission: Submission) -> SketchResult<()>;
}

impl SubmissionSink for Vec<Submission> {
    fn accept(&mut self, submission: Submission) -> SketchResult<()> {
        self.push(submission);
        Ok(())
    }
}
