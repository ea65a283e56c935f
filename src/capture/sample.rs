use serde::{Deserialize, Serialize};

use crate::core::{AnchorPoint, PointerPosition};
use crate::error::{SketchError, SketchResult};

/// One recorded point of a forecast gesture.
///
/// Field names follow the persisted wire shape:
/// `{t: ms since epoch, x: px, y: px, price, v: px/ms, a: px/ms²}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: i64,
    pub x: f64,
    pub y: f64,
    pub price: f64,
    pub v: f64,
    pub a: f64,
}

impl Sample {
    /// First sample of every path: the anchor itself, at rest.
    #[must_use]
    pub fn at_anchor(anchor: AnchorPoint, t: i64) -> Self {
        Self {
            t,
            x: anchor.x,
            y: anchor.y,
            price: anchor.price,
            v: 0.0,
            a: 0.0,
        }
    }

    /// Builds the sample that follows `self`, deriving instantaneous kinematics.
    ///
    /// Timestamps never go backwards: a `now` earlier than `self.t` is clamped,
    /// which yields `dt == 0` and therefore zero velocity and acceleration.
    #[must_use]
    pub fn following(&self, position: PointerPosition, now: i64, price: f64) -> Self {
        let t = now.max(self.t);
        let dt = t.saturating_sub(self.t) as f64;
        let dist = position.distance_to(self.x, self.y);
        let (v, a) = if dt > 0.0 {
            let v = dist / dt;
            (v, (v - self.v) / dt)
        } else {
            (0.0, 0.0)
        };

        Self {
            t,
            x: position.x,
            y: position.y,
            price,
            v,
            a,
        }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.price.is_finite()
            && self.v.is_finite()
            && self.a.is_finite()
    }
}

/// Ordered samples of one forecast gesture.
///
/// Appends go through the capture engine, which enforces the anchor seed and
/// the strictly increasing `x` rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForecastPath {
    samples: Vec<Sample>,
}

impl ForecastPath {
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Horizontal pixel distance covered from the first to the last sample.
    #[must_use]
    pub fn horizontal_extent(&self) -> f64 {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => last.x - first.x,
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }

    pub(crate) fn seed(&mut self, sample: Sample) {
        self.samples.clear();
        self.samples.push(sample);
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub(crate) fn clear(&mut self) {
        self.samples.clear();
    }

    /// Checks the structural invariants of a finalized path, for paths that
    /// arrive from outside the engine (for example a persisted store).
    pub fn validate(&self) -> SketchResult<()> {
        if self.samples.is_empty() {
            return Ok(());
        }
        if self.samples.len() < 2 {
            return Err(SketchError::InvalidData(
                "non-empty forecast path needs at least 2 samples".to_owned(),
            ));
        }
        if let Some(first) = self.samples.first() {
            if first.v != 0.0 || first.a != 0.0 {
                return Err(SketchError::InvalidData(
                    "first sample must be at rest".to_owned(),
                ));
            }
        }
        if self.samples.iter().any(|sample| !sample.is_finite()) {
            return Err(SketchError::InvalidData(
                "forecast path samples must be finite".to_owned(),
            ));
        }
        for pair in self.samples.windows(2) {
            if pair[1].x <= pair[0].x {
                return Err(SketchError::InvalidData(
                    "forecast path x must strictly increase".to_owned(),
                ));
            }
            if pair[1].t < pair[0].t {
                return Err(SketchError::InvalidData(
                    "forecast path timestamps must not decrease".to_owned(),
                ));
            }
        }
        Ok(())
    }
}
