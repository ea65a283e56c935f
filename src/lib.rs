//! forecast-sketch: headless capture engine for free-hand price forecasts.
//!
//! A host chart supplies the live anchor point (the last candle) and the
//! visible price bounds. The engine turns pointer input over a capture surface
//! into a forward-only, timestamped and priced path that starts exactly at the
//! anchor, and hands finalized paths to a submission sink.

pub mod capture;
pub mod core;
pub mod error;
pub mod render;
pub mod submission;
pub mod telemetry;

pub use capture::{CaptureConfig, CaptureEngine, CaptureState};
pub use error::{SketchError, SketchResult};
