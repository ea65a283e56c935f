//! Free-hand forecast gesture capture.

mod config;
mod engine;
mod input;
mod sample;

pub use config::{
    CAPTURE_CONFIG_JSON_SCHEMA_V1, CaptureConfig, DEFAULT_MIN_EXTENT_PX, ResizePolicy,
};
pub use engine::{CaptureEngine, CaptureOutcome, CaptureState, PathReadyListener};
pub use input::PointerEvent;
pub use sample::{ForecastPath, Sample};
