use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::capture::{CaptureConfig, ForecastPath, ResizePolicy, Sample};
use crate::core::{AnchorPoint, AxisBounds, PointerPosition, PriceAxis, Viewport, ViewportSource};
use crate::error::{SketchError, SketchResult};
use crate::render::{RenderFrame, Renderer, StrokeBuffer, build_affordance_frame};
use crate::submission::{Submission, SubmissionMetadata, SubmissionSink};

/// Lifecycle of one forecast gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CaptureState {
    /// Showing the anchor cue; no path.
    #[default]
    Idle,
    /// Pointer is down and samples are being accumulated.
    Capturing,
    /// A valid path is pending a redraw or submit decision.
    Completed,
}

/// Result of feeding one operation or pointer event into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureOutcome {
    Started,
    Sampled,
    /// Sample rejected by the forward-only rule or unusable input.
    Dropped,
    Completed,
    /// Gesture too short; path cleared and engine back to idle.
    Discarded,
    Resized,
    /// Operation not valid in the current state.
    Ignored,
}

/// Called once per accepted gesture with the finalized path.
pub type PathReadyListener = Box<dyn FnMut(&ForecastPath)>;

/// Free-hand forecast capture state machine.
///
/// Drives a capture surface laid over a host chart. Anchor and axis bounds
/// are pulled from `source` whenever an operation needs them; only the anchor
/// that seeded the current path is held for the path's lifetime.
pub struct CaptureEngine<S: ViewportSource, R: Renderer> {
    renderer: R,
    source: S,
    config: CaptureConfig,
    viewport: Viewport,
    state: CaptureState,
    path: ForecastPath,
    seed_anchor: Option<AnchorPoint>,
    stroke: StrokeBuffer,
    submitted: bool,
    needs_redraw: bool,
    last_idle_view: Option<(AnchorPoint, AxisBounds)>,
    path_ready_listener: Option<PathReadyListener>,
}

impl<S: ViewportSource, R: Renderer> CaptureEngine<S, R> {
    pub fn new(
        renderer: R,
        source: S,
        viewport: Viewport,
        config: CaptureConfig,
    ) -> SketchResult<Self> {
        check_viewport(viewport)?;
        config.validate()?;

        Ok(Self {
            renderer,
            source,
            config,
            viewport,
            state: CaptureState::Idle,
            path: ForecastPath::default(),
            seed_anchor: None,
            stroke: StrokeBuffer::default(),
            submitted: false,
            needs_redraw: true,
            last_idle_view: None,
            path_ready_listener: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> CaptureState {
        self.state
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CaptureConfig) -> SketchResult<()> {
        config.validate()?;
        self.config = config;
        self.needs_redraw = true;
        Ok(())
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access for hosts that push viewport updates into their source.
    ///
    /// The engine picks up changes on its next read; `sync_viewport` tells
    /// whether the idle cue must be redrawn.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn set_path_ready_listener(&mut self, listener: PathReadyListener) {
        self.path_ready_listener = Some(listener);
    }

    /// Number of samples accumulated so far, including the anchor seed.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.path.len()
    }

    /// Finalized path, available only while `Completed`.
    #[must_use]
    pub fn completed_path(&self) -> Option<&ForecastPath> {
        (self.state == CaptureState::Completed).then_some(&self.path)
    }

    /// Anchor that seeded the current path, if a gesture exists.
    #[must_use]
    pub fn seed_anchor(&self) -> Option<AnchorPoint> {
        self.seed_anchor
    }

    #[must_use]
    pub fn stroke_buffer(&self) -> &StrokeBuffer {
        &self.stroke
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Starts a gesture at the host's current anchor.
    ///
    /// The press location does not matter: every path begins exactly at the
    /// anchor. Stays idle when the host has no usable anchor or bounds.
    pub fn begin_capture(&mut self, now_ms: i64) -> CaptureOutcome {
        match self.state {
            CaptureState::Idle => {}
            CaptureState::Capturing => {
                trace!("begin ignored: gesture already in progress");
                return CaptureOutcome::Ignored;
            }
            CaptureState::Completed => {
                debug!("begin ignored: completed path pending redraw or submit");
                return CaptureOutcome::Ignored;
            }
        }

        let Some(anchor) = self.usable_anchor() else {
            debug!("begin ignored: host anchor missing or off-surface");
            return CaptureOutcome::Ignored;
        };
        if !self.source.current_axis_bounds().is_some_and(AxisBounds::is_valid) {
            debug!("begin ignored: host axis bounds missing or malformed");
            return CaptureOutcome::Ignored;
        }

        self.path.seed(Sample::at_anchor(anchor, now_ms));
        self.seed_anchor = Some(anchor);
        self.submitted = false;
        self.stroke.begin(anchor.x, anchor.y);
        self.state = CaptureState::Capturing;
        self.needs_redraw = true;
        debug!(x = anchor.x, y = anchor.y, price = anchor.price, "capture started");
        CaptureOutcome::Started
    }

    /// Appends one pointer sample while capturing.
    ///
    /// Positions off the surface or not strictly right of the last sample are
    /// dropped, as are samples taken while the host axis is unusable.
    pub fn record_sample(&mut self, position: PointerPosition, now_ms: i64) -> CaptureOutcome {
        if self.state != CaptureState::Capturing {
            return CaptureOutcome::Ignored;
        }
        let Some(prev) = self.path.last().copied() else {
            return CaptureOutcome::Ignored;
        };
        if !position.x.is_finite() || !position.y.is_finite() {
            trace!("sample dropped: non-finite pointer position");
            return CaptureOutcome::Dropped;
        }
        if !self.viewport.contains(position.x, position.y) {
            trace!(x = position.x, y = position.y, "sample dropped: outside capture surface");
            return CaptureOutcome::Dropped;
        }
        if position.x <= prev.x {
            trace!(x = position.x, last_x = prev.x, "sample dropped: not moving forward");
            return CaptureOutcome::Dropped;
        }

        let price = match self.price_at(position.y) {
            Ok(price) => price,
            Err(err) => {
                trace!(%err, "sample dropped: price axis unavailable");
                return CaptureOutcome::Dropped;
            }
        };

        let sample = prev.following(position, now_ms, price);
        self.path.push(sample);
        self.stroke.extend(sample.x, sample.y);
        self.needs_redraw = true;
        trace!(x = sample.x, price = sample.price, v = sample.v, "sample recorded");
        CaptureOutcome::Sampled
    }

    /// Closes the gesture, keeping it only when it covers the minimum extent.
    pub fn end_capture(&mut self) -> CaptureOutcome {
        if self.state != CaptureState::Capturing {
            return CaptureOutcome::Ignored;
        }

        if self.meets_min_extent() {
            self.state = CaptureState::Completed;
            self.needs_redraw = true;
            info!(
                samples = self.path.len(),
                extent_px = self.path.horizontal_extent(),
                "capture completed"
            );
            if let Some(listener) = self.path_ready_listener.as_mut() {
                listener(&self.path);
            }
            CaptureOutcome::Completed
        } else {
            debug!(
                samples = self.path.len(),
                extent_px = self.path.horizontal_extent(),
                min_extent_px = self.config.min_extent_px,
                "capture discarded: below minimum extent"
            );
            self.clear_gesture();
            CaptureOutcome::Discarded
        }
    }

    /// Drops any gesture and returns to idle. Safe to call in every state.
    pub fn reset(&mut self) {
        if self.state != CaptureState::Idle {
            debug!(from = ?self.state, "capture reset");
        }
        self.clear_gesture();
    }

    /// Hands the completed path to `sink`.
    ///
    /// Returns `Ok(false)` outside `Completed` or when this path was already
    /// submitted. The engine stays `Completed`; the host decides what follows.
    pub fn submit<K: SubmissionSink + ?Sized>(
        &mut self,
        sink: &mut K,
        metadata: SubmissionMetadata,
    ) -> SketchResult<bool> {
        if self.state != CaptureState::Completed {
            debug!(state = ?self.state, "submit ignored: no completed path");
            return Ok(false);
        }
        if self.submitted {
            debug!("submit ignored: path already submitted");
            return Ok(false);
        }

        sink.accept(Submission {
            metadata,
            path: self.path.clone(),
        })?;
        self.submitted = true;
        info!(samples = self.path.len(), "forecast submitted");
        Ok(true)
    }

    /// Tracks the container size. The drawing buffer is always cleared.
    pub fn resize(&mut self, width: u32, height: u32) -> SketchResult<()> {
        let viewport = Viewport::new(width, height);
        check_viewport(viewport)?;

        self.viewport = viewport;
        match self.config.resize_policy {
            ResizePolicy::ResetGesture => self.reset(),
            ResizePolicy::ClearRenderingOnly => self.stroke.clear(),
        }
        self.last_idle_view = None;
        self.needs_redraw = true;
        debug!(width, height, policy = ?self.config.resize_policy, "capture surface resized");
        Ok(())
    }

    /// Checks whether the host view moved since the idle cue was last drawn.
    ///
    /// Returns `true` when a redraw is now pending.
    pub fn sync_viewport(&mut self) -> bool {
        if self.state == CaptureState::Idle && self.current_view() != self.last_idle_view {
            self.needs_redraw = true;
        }
        self.needs_redraw
    }

    /// Builds the frame for the current state without touching the renderer.
    #[must_use]
    pub fn build_frame(&self) -> RenderFrame {
        match self.state {
            CaptureState::Idle => match self.usable_anchor() {
                Some(anchor) => {
                    build_affordance_frame(self.viewport, anchor, &self.config.affordance_style)
                }
                None => RenderFrame::new(self.viewport),
            },
            CaptureState::Capturing | CaptureState::Completed => {
                self.stroke.to_frame(self.viewport, self.config.stroke_style)
            }
        }
    }

    /// Draws when something changed since the last draw. Returns whether it did.
    pub fn render(&mut self) -> SketchResult<bool> {
        if !self.sync_viewport() {
            return Ok(false);
        }

        let frame = self.build_frame();
        self.renderer.render(&frame)?;
        self.last_idle_view = if self.state == CaptureState::Idle {
            self.current_view()
        } else {
            None
        };
        self.needs_redraw = false;
        Ok(true)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn meets_min_extent(&self) -> bool {
        let (Some(anchor), Some(last)) = (self.seed_anchor, self.path.last()) else {
            return false;
        };
        self.path.len() >= 2 && last.x - anchor.x > self.config.min_extent_px
    }

    fn clear_gesture(&mut self) {
        self.path.clear();
        self.seed_anchor = None;
        self.submitted = false;
        self.stroke.clear();
        self.state = CaptureState::Idle;
        self.needs_redraw = true;
    }

    fn usable_anchor(&self) -> Option<AnchorPoint> {
        self.source
            .current_anchor()
            .filter(|anchor| anchor.is_usable_within(self.viewport))
    }

    fn current_view(&self) -> Option<(AnchorPoint, AxisBounds)> {
        let bounds = self
            .source
            .current_axis_bounds()
            .filter(|bounds| bounds.is_valid())?;
        Some((self.usable_anchor()?, bounds))
    }

    fn price_at(&self, y: f64) -> SketchResult<f64> {
        let bounds = self.source.current_axis_bounds().ok_or_else(|| {
            SketchError::InvalidData("host axis bounds unavailable".to_owned())
        })?;
        PriceAxis::new(bounds)?.pixel_to_price(y, self.viewport)
    }
}

fn check_viewport(viewport: Viewport) -> SketchResult<()> {
    if !viewport.is_valid() {
        return Err(SketchError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}
