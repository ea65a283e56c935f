use serde::{Deserialize, Serialize};

use crate::error::{SketchError, SketchResult};
use crate::render::{AffordanceStyle, StrokeStyle};

pub const CAPTURE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Smallest horizontal distance, in pixels, a gesture must cover.
pub const DEFAULT_MIN_EXTENT_PX: f64 = 100.0;

/// What a resize does to a gesture that is in progress or completed.
///
/// Pixel coordinates recorded before a resize no longer line up with the
/// surface, so the drawing buffer is always cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResizePolicy {
    /// Discard the path and return to idle.
    #[default]
    ResetGesture,
    /// Clear only the drawing buffer; the in-memory path and state survive.
    ClearRenderingOnly,
}

/// Capture engine configuration.
///
/// Serializable so hosts can ship tuning alongside their chart setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_min_extent_px")]
    pub min_extent_px: f64,
    #[serde(default)]
    pub resize_policy: ResizePolicy,
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    #[serde(default)]
    pub affordance_style: AffordanceStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CaptureConfigJsonContractV1 {
    schema_version: u32,
    config: CaptureConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            min_extent_px: default_min_extent_px(),
            resize_policy: ResizePolicy::default(),
            stroke_style: StrokeStyle::default(),
            affordance_style: AffordanceStyle::default(),
        }
    }
}

impl CaptureConfig {
    #[must_use]
    pub fn with_min_extent_px(mut self, min_extent_px: f64) -> Self {
        self.min_extent_px = min_extent_px;
        self
    }

    #[must_use]
    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }

    #[must_use]
    pub fn with_stroke_style(mut self, style: StrokeStyle) -> Self {
        self.stroke_style = style;
        self
    }

    #[must_use]
    pub fn with_affordance_style(mut self, style: AffordanceStyle) -> Self {
        self.affordance_style = style;
        self
    }

    pub fn validate(&self) -> SketchResult<()> {
        if !self.min_extent_px.is_finite() || self.min_extent_px < 0.0 {
            return Err(SketchError::InvalidData(
                "min extent must be finite and >= 0".to_owned(),
            ));
        }
        self.stroke_style.validate()?;
        self.affordance_style.validate()
    }

    pub fn to_json_pretty(&self) -> SketchResult<String> {
        let payload = CaptureConfigJsonContractV1 {
            schema_version: CAPTURE_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SketchError::Serialization(format!("failed to serialize capture config: {e}"))
        })
    }

    /// Parses either a bare config object or a versioned contract payload.
    pub fn from_json_str(input: &str) -> SketchResult<Self> {
        let config = match serde_json::from_str::<CaptureConfigJsonContractV1>(input) {
            Ok(payload) => {
                if payload.schema_version != CAPTURE_CONFIG_JSON_SCHEMA_V1 {
                    return Err(SketchError::Serialization(format!(
                        "unsupported capture config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
            Err(_) => serde_json::from_str::<CaptureConfig>(input).map_err(|e| {
                SketchError::Serialization(format!("failed to parse capture config: {e}"))
            })?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_min_extent_px() -> f64 {
    DEFAULT_MIN_EXTENT_PX
}
