use serde::{Deserialize, Serialize};

use crate::core::{AnchorPoint, Viewport};
use crate::error::{SketchError, SketchResult};
use crate::render::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PolylinePrimitive, RectPrimitive,
    RenderFrame, TextHAlign, TextPrimitive,
};

/// Look of the user's forecast stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width_px: f64,
    pub glow_px: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            width_px: 2.0,
            glow_px: 5.0,
        }
    }
}

impl StrokeStyle {
    pub fn validate(self) -> SketchResult<()> {
        if !self.width_px.is_finite() || self.width_px <= 0.0 {
            return Err(SketchError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        if !self.glow_px.is_finite() || self.glow_px < 0.0 {
            return Err(SketchError::InvalidData(
                "stroke glow must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Look of the idle "start here" cue drawn at the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordanceStyle {
    pub area_tint: Color,
    pub guide_color: Color,
    pub guide_width_px: f64,
    pub guide_dash_px: f64,
    pub guide_gap_px: f64,
    pub dot_color: Color,
    pub dot_radius_px: f64,
    pub label_text: String,
    pub label_color: Color,
    pub label_font_size_px: f64,
    pub label_offset_x_px: f64,
    pub label_offset_y_px: f64,
}

impl Default for AffordanceStyle {
    fn default() -> Self {
        Self {
            area_tint: Color::rgba(1.0, 1.0, 1.0, 0.03),
            guide_color: Color::rgba(1.0, 1.0, 1.0, 0.3),
            guide_width_px: 1.0,
            guide_dash_px: 4.0,
            guide_gap_px: 4.0,
            dot_color: Color::WHITE,
            dot_radius_px: 4.0,
            label_text: "START PREDICTION".to_owned(),
            label_color: Color::rgb(0.533, 0.533, 0.533),
            label_font_size_px: 10.0,
            label_offset_x_px: 8.0,
            label_offset_y_px: 3.0,
        }
    }
}

impl AffordanceStyle {
    pub fn validate(&self) -> SketchResult<()> {
        for (name, value) in [
            ("guide width", self.guide_width_px),
            ("guide dash", self.guide_dash_px),
            ("dot radius", self.dot_radius_px),
            ("label font size", self.label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SketchError::InvalidData(format!(
                    "affordance {name} must be finite and > 0"
                )));
            }
        }
        if !self.guide_gap_px.is_finite() || self.guide_gap_px < 0.0 {
            return Err(SketchError::InvalidData(
                "affordance guide gap must be finite and >= 0".to_owned(),
            ));
        }
        if !self.label_offset_x_px.is_finite() || !self.label_offset_y_px.is_finite() {
            return Err(SketchError::InvalidData(
                "affordance label offset must be finite".to_owned(),
            ));
        }
        if self.label_text.is_empty() {
            return Err(SketchError::InvalidData(
                "affordance label must not be empty".to_owned(),
            ));
        }
        for color in [
            self.area_tint,
            self.guide_color,
            self.dot_color,
            self.label_color,
        ] {
            color.validate()?;
        }
        Ok(())
    }
}

/// Engine-owned drawing buffer for the gesture in progress.
///
/// Mirrors what is on the surface: cleared on reset, discard and resize.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeBuffer {
    points: Vec<(f64, f64)>,
}

impl StrokeBuffer {
    pub fn begin(&mut self, x: f64, y: f64) {
        self.points.clear();
        self.points.push((x, y));
    }

    pub fn extend(&mut self, x: f64, y: f64) {
        self.points.push((x, y));
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    #[must_use]
    pub fn to_frame(&self, viewport: Viewport, style: StrokeStyle) -> RenderFrame {
        let frame = RenderFrame::new(viewport);
        if self.points.is_empty() {
            return frame;
        }
        frame.with_polyline(PolylinePrimitive {
            points: self.points.clone(),
            stroke_width: style.width_px,
            color: style.color,
            glow_px: style.glow_px,
        })
    }
}

/// Builds the idle cue: tinted drawing area right of the anchor, a dashed
/// vertical guide through the anchor, a marker dot and a label.
#[must_use]
pub fn build_affordance_frame(
    viewport: Viewport,
    anchor: AnchorPoint,
    style: &AffordanceStyle,
) -> RenderFrame {
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);

    RenderFrame::new(viewport)
        .with_rect(RectPrimitive::new(
            anchor.x,
            0.0,
            (width - anchor.x).max(0.0),
            height,
            style.area_tint,
        ))
        .with_line(
            LinePrimitive::new(
                anchor.x,
                0.0,
                anchor.x,
                height,
                style.guide_width_px,
                style.guide_color,
            )
            .with_stroke_style(LineStrokeStyle::Dashed {
                dash_px: style.guide_dash_px,
                gap_px: style.guide_gap_px,
            }),
        )
        .with_circle(CirclePrimitive::new(
            anchor.x,
            anchor.y,
            style.dot_radius_px,
            style.dot_color,
        ))
        .with_text(TextPrimitive::new(
            style.label_text.clone(),
            anchor.x + style.label_offset_x_px,
            anchor.y + style.label_offset_y_px,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Left,
        ))
}
