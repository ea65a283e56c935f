use serde::{Deserialize, Serialize};

use crate::capture::{CaptureEngine, CaptureOutcome};
use crate::core::{PointerPosition, ViewportSource};
use crate::error::SketchResult;
use crate::render::Renderer;

/// Platform-neutral notifications delivered to the capture surface.
///
/// Timestamps are wall-clock milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { at_ms: i64 },
    Move { x: f64, y: f64, at_ms: i64 },
    Up,
    /// Pointer left the surface; treated like a release.
    Leave,
    Resize { width: u32, height: u32 },
}

impl<S: ViewportSource, R: Renderer> CaptureEngine<S, R> {
    /// Routes one notification to the matching state transition.
    pub fn handle_event(&mut self, event: PointerEvent) -> SketchResult<CaptureOutcome> {
        let outcome = match event {
            PointerEvent::Down { at_ms } => self.begin_capture(at_ms),
            PointerEvent::Move { x, y, at_ms } => {
                self.record_sample(PointerPosition::new(x, y), at_ms)
            }
            PointerEvent::Up | PointerEvent::Leave => self.end_capture(),
            PointerEvent::Resize { width, height } => {
                self.resize(width, height)?;
                CaptureOutcome::Resized
            }
        };
        Ok(outcome)
    }

    /// Feeds a batch of notifications in order, stopping at the first error.
    pub fn handle_events<I>(&mut self, events: I) -> SketchResult<Vec<CaptureOutcome>>
    where
        I: IntoIterator<Item = PointerEvent>,
    {
        events
            .into_iter()
            .map(|event| self.handle_event(event))
            .collect()
    }
}
