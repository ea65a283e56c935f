mod frame;
mod null_renderer;
mod overlay;
mod primitives;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;
pub use overlay::{AffordanceStyle, StrokeBuffer, StrokeStyle, build_affordance_frame};
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, LineStrokeStyle, PolylinePrimitive, RectPrimitive,
    TextHAlign, TextPrimitive,
};

use crate::error::SketchResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code stays
/// isolated from gesture state and input handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> SketchResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
