use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::decimal_to_f64;
use crate::error::SketchResult;

/// Pixel size of the capture surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        (0.0..=f64::from(self.width)).contains(&x) && (0.0..=f64::from(self.height)).contains(&y)
    }
}

/// Pixel/price location where every new forecast must begin.
///
/// Owned by the host chart: it tracks the close of the last visible candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
    pub price: f64,
}

impl AnchorPoint {
    #[must_use]
    pub fn new(x: f64, y: f64, price: f64) -> Self {
        Self { x, y, price }
    }

    pub fn from_decimal_price(x: f64, y: f64, price: Decimal) -> SketchResult<Self> {
        Ok(Self {
            x,
            y,
            price: decimal_to_f64(price, "anchor price")?,
        })
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.price.is_finite()
    }

    /// An anchor can seed a path only when it is finite and lies on the surface.
    #[must_use]
    pub fn is_usable_within(self, viewport: Viewport) -> bool {
        self.is_finite() && viewport.is_valid() && viewport.contains(self.x, self.y)
    }
}

/// Visible price range mapped to the bottom (`min`) and top (`max`) of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }
}

/// Raw pointer coordinates relative to the capture surface origin (top-left).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}
