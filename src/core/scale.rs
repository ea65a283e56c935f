use crate::core::types::{AxisBounds, Viewport};
use crate::error::{SketchError, SketchResult};

/// Linear price axis over an inverted Y pixel axis: pixel `0` is `max`,
/// pixel `height` is `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceAxis {
    min: f64,
    max: f64,
}

impl PriceAxis {
    pub fn new(bounds: AxisBounds) -> SketchResult<Self> {
        if !bounds.is_valid() {
            return Err(SketchError::InvalidData(
                "axis bounds must be finite with min < max".to_owned(),
            ));
        }

        Ok(Self {
            min: bounds.min,
            max: bounds.max,
        })
    }

    #[must_use]
    pub fn bounds(self) -> AxisBounds {
        AxisBounds::new(self.min, self.max)
    }

    pub fn pixel_to_price(self, y: f64, viewport: Viewport) -> SketchResult<f64> {
        let height = checked_height(viewport)?;
        if !y.is_finite() {
            return Err(SketchError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = 1.0 - y / height;
        Ok(self.min + normalized * (self.max - self.min))
    }

    pub fn price_to_pixel(self, price: f64, viewport: Viewport) -> SketchResult<f64> {
        let height = checked_height(viewport)?;
        if !price.is_finite() {
            return Err(SketchError::InvalidData("price must be finite".to_owned()));
        }

        let normalized = (price - self.min) / (self.max - self.min);
        Ok((1.0 - normalized) * height)
    }
}

fn checked_height(viewport: Viewport) -> SketchResult<f64> {
    if !viewport.is_valid() {
        return Err(SketchError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(f64::from(viewport.height))
}
