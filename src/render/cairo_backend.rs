use cairo::{Context, Format, ImageSurface, LineCap, LineJoin, Operator};
use pango::FontDescription;
use std::f64::consts::PI;

use crate::error::{SketchError, SketchResult};
use crate::render::{Color, LineStrokeStyle, RenderFrame, Renderer, TextHAlign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub circles_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback layered over a chart).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> SketchResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// The capture surface is an overlay, so the default clear color is fully
/// transparent and the chart underneath stays visible.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> SketchResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(SketchError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgba(0.0, 0.0, 0.0, 0.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> SketchResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> SketchResult<()> {
        frame.validate()?;

        context.save().map_err(|err| map_backend_error("failed to save context", err))?;
        context.set_operator(Operator::Source);
        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        context
            .restore()
            .map_err(|err| map_backend_error("failed to restore context", err))?;

        let mut stats = CairoRenderStats::default();

        for rect in &frame.rects {
            apply_color(context, rect.fill_color);
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for line in &frame.lines {
            apply_color(context, line.color);
            context.set_line_width(line.stroke_width);
            match line.stroke_style {
                LineStrokeStyle::Solid => context.set_dash(&[], 0.0),
                LineStrokeStyle::Dashed { dash_px, gap_px } => {
                    context.set_dash(&[dash_px, gap_px], 0.0);
                }
            }
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }
        context.set_dash(&[], 0.0);

        for polyline in &frame.polylines {
            context.set_line_cap(LineCap::Round);
            context.set_line_join(LineJoin::Round);
            // Cairo has no shadow blur; a wide translucent pass stands in for the glow.
            if polyline.glow_px > 0.0 {
                let glow = Color::rgba(
                    polyline.color.red,
                    polyline.color.green,
                    polyline.color.blue,
                    polyline.color.alpha * 0.25,
                );
                apply_color(context, glow);
                context.set_line_width(polyline.stroke_width + polyline.glow_px);
                append_polyline_path(context, &polyline.points);
                context
                    .stroke()
                    .map_err(|err| map_backend_error("failed to stroke glow", err))?;
            }
            apply_color(context, polyline.color);
            context.set_line_width(polyline.stroke_width);
            append_polyline_path(context, &polyline.points);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke polyline", err))?;
            stats.polylines_drawn += 1;
        }

        for circle in &frame.circles {
            apply_color(context, circle.fill_color);
            context.new_sub_path();
            context.arc(circle.cx, circle.cy, circle.radius, 0.0, 2.0 * PI);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill circle", err))?;
            stats.circles_drawn += 1;
        }

        for text in &frame.texts {
            let layout = pangocairo::functions::create_layout(context);
            let font_description =
                FontDescription::from_string(&format!("Sans {}", text.font_size_px));
            layout.set_font_description(Some(&font_description));
            layout.set_text(&text.text);

            let (text_width, _text_height) = layout.pixel_size();
            let x = match text.h_align {
                TextHAlign::Left => text.x,
                TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
                TextHAlign::Right => text.x - f64::from(text_width),
            };

            apply_color(context, text.color);
            context.move_to(x, text.y);
            pangocairo::functions::show_layout(context, &layout);
            stats.texts_drawn += 1;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> SketchResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> SketchResult<()> {
        self.render_with_context(context, frame)
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn append_polyline_path(context: &Context, points: &[(f64, f64)]) {
    let Some((&(x0, y0), rest)) = points.split_first() else {
        return;
    };
    context.move_to(x0, y0);
    if rest.is_empty() {
        // A lone point still shows up as a round dot with round caps.
        context.line_to(x0, y0);
    }
    for &(x, y) in rest {
        context.line_to(x, y);
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> SketchError {
    SketchError::InvalidData(format!("{prefix}: {err}"))
}
