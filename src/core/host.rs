//! Pull-based port through which the capture engine observes the host chart.
//!
//! Hosts re-sync their viewport on their own schedule (scroll, zoom, new
//! candles). The engine never subscribes: it asks for the latest values at the
//! moment it needs them.

use tracing::trace;

use crate::core::scale::PriceAxis;
use crate::core::types::{AnchorPoint, AxisBounds, Viewport};

/// Live view of the host chart as seen by the capture engine.
///
/// `None` means the host has nothing usable yet (no data loaded, axis not
/// laid out). The engine treats that as "stay idle".
pub trait ViewportSource {
    fn current_anchor(&self) -> Option<AnchorPoint>;
    fn current_axis_bounds(&self) -> Option<AxisBounds>;
}

impl<T: ViewportSource + ?Sized> ViewportSource for Box<T> {
    fn current_anchor(&self) -> Option<AnchorPoint> {
        (**self).current_anchor()
    }

    fn current_axis_bounds(&self) -> Option<AxisBounds> {
        (**self).current_axis_bounds()
    }
}

/// Host-pushed values. Useful for tests and for hosts that already compute
/// anchor and bounds themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StaticViewport {
    anchor: Option<AnchorPoint>,
    bounds: Option<AxisBounds>,
}

impl StaticViewport {
    #[must_use]
    pub fn new(anchor: AnchorPoint, bounds: AxisBounds) -> Self {
        Self {
            anchor: Some(anchor),
            bounds: Some(bounds),
        }
    }

    pub fn set_anchor(&mut self, anchor: Option<AnchorPoint>) {
        self.anchor = anchor;
    }

    pub fn set_axis_bounds(&mut self, bounds: Option<AxisBounds>) {
        self.bounds = bounds;
    }
}

impl ViewportSource for StaticViewport {
    fn current_anchor(&self) -> Option<AnchorPoint> {
        self.anchor
    }

    fn current_axis_bounds(&self) -> Option<AxisBounds> {
        self.bounds
    }
}

/// Last candle of the host series: its pixel x and its close price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LastCandle {
    pub x: f64,
    pub close: f64,
}

/// Derives the anchor from the last candle the way the chart syncs its state:
/// the close price is projected through the visible price axis to get pixel y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandleViewport {
    viewport: Viewport,
    bounds: Option<AxisBounds>,
    last_candle: Option<LastCandle>,
}

impl CandleViewport {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            bounds: None,
            last_candle: None,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_axis_bounds(&mut self, bounds: AxisBounds) {
        self.bounds = Some(bounds);
    }

    pub fn set_last_candle(&mut self, x: f64, close: f64) {
        self.last_candle = Some(LastCandle { x, close });
    }

    pub fn clear(&mut self) {
        self.bounds = None;
        self.last_candle = None;
    }
}

impl ViewportSource for CandleViewport {
    fn current_anchor(&self) -> Option<AnchorPoint> {
        let candle = self.last_candle?;
        let axis = PriceAxis::new(self.bounds?).ok()?;
        match axis.price_to_pixel(candle.close, self.viewport) {
            Ok(y) => Some(AnchorPoint::new(candle.x, y, candle.close)),
            Err(err) => {
                trace!(%err, "last candle cannot be projected onto the price axis");
                None
            }
        }
    }

    fn current_axis_bounds(&self) -> Option<AxisBounds> {
        self.bounds
    }
}
