use crate::foundation::core::{Canvas, Circle, Line, Point, Rect, Rgba8};
use crate::foundation::error::{FolioError, FolioResult};
use crate::render::backend::{FrameRGBA, FrameRenderer, RenderSettings};
use crate::render::draw::{DrawCommand, DrawList};
use crate::render::text::{TextBrush, TextLayoutEngine, first_baseline};
use vello_cpu::kurbo::Shape as _;

const CURVE_TOLERANCE: f64 = 0.1;
/// Number of translucent rings used to fake a blurred halo.
const GLOW_RINGS: u32 = 6;
/// Outline width for synthetic bold, as a fraction of the font size.
const EMBOLDEN_RATIO: f32 = 0.04;

/// `vello_cpu` rasterizer for [`DrawList`]s.
///
/// Text commands need a font (see [`RenderSettings::font_path`]) and are skipped without one.
/// Bold text asks parley for a bold weight and is additionally outlined, since only one face is
/// registered.
pub struct CpuRenderer {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    text: Option<TextLayoutEngine>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("settings", &self.settings)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}

impl CpuRenderer {
    pub fn new(settings: RenderSettings) -> FolioResult<Self> {
        let text = match settings.font_path.as_deref() {
            Some(path) => Some(TextLayoutEngine::from_path(path)?),
            None => None,
        };
        Ok(Self {
            settings,
            ctx: None,
            text,
        })
    }

    /// Replace the text engine, e.g. with one built from in-memory font bytes.
    pub fn with_text_engine(mut self, engine: TextLayoutEngine) -> Self {
        self.text = Some(engine);
        self
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> FolioResult<R>,
    ) -> FolioResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_command(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        canvas: Canvas,
        cmd: &DrawCommand,
    ) -> FolioResult<()> {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match cmd {
            DrawCommand::Clear => {
                ctx.reset();
                if let Some([r, g, b, a]) = self.settings.clear_rgba {
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                        0.0,
                        0.0,
                        f64::from(canvas.width),
                        f64::from(canvas.height),
                    ));
                }
            }
            DrawCommand::Line { line, width, color } => {
                ctx.set_stroke(stroke(*width));
                ctx.set_paint(paint(*color));
                ctx.stroke_path(&line_to_cpu(*line).to_path(CURVE_TOLERANCE));
            }
            DrawCommand::FillCircle { circle, color } => {
                ctx.set_paint(paint(*color));
                ctx.fill_path(&circle_to_cpu(*circle).to_path(CURVE_TOLERANCE));
            }
            DrawCommand::StrokeCircle {
                circle,
                width,
                color,
            } => {
                ctx.set_stroke(stroke(*width));
                ctx.set_paint(paint(*color));
                ctx.stroke_path(&circle_to_cpu(*circle).to_path(CURVE_TOLERANCE));
            }
            DrawCommand::Glow {
                circle,
                blur,
                color,
            } => {
                let ring_alpha = color.alpha_f64() / f64::from(GLOW_RINGS);
                for i in (1..=GLOW_RINGS).rev() {
                    let spread = blur * f64::from(i) / f64::from(GLOW_RINGS);
                    let ring = Circle::new(circle.center, circle.radius + spread);
                    ctx.set_paint(paint(color.with_alpha(ring_alpha)));
                    ctx.fill_path(&circle_to_cpu(ring).to_path(CURVE_TOLERANCE));
                }
                ctx.set_paint(paint(*color));
                ctx.fill_path(&circle_to_cpu(*circle).to_path(CURVE_TOLERANCE));
            }
            DrawCommand::FillRect { rect, color } => {
                ctx.set_paint(paint(*color));
                ctx.fill_rect(&rect_to_cpu(*rect));
            }
            DrawCommand::StrokeRect { rect, width, color } => {
                ctx.set_stroke(stroke(*width));
                ctx.set_paint(paint(*color));
                ctx.stroke_rect(&rect_to_cpu(*rect));
            }
            DrawCommand::Text {
                origin,
                text,
                size_px,
                bold,
                color,
            } => {
                let Some(engine) = self.text.as_mut() else {
                    return Ok(());
                };
                let layout = engine.layout_line(text, *size_px, *bold, TextBrush::from(*color))?;
                let outline = embolden_width(*size_px, *bold);
                let top = origin.y - f64::from(first_baseline(&layout));
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, top)));
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));
                        let glyphs: Vec<_> = run
                            .glyphs()
                            .map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x,
                                y: g.y,
                            })
                            .collect();
                        let font_size = run.run().font_size();
                        ctx.glyph_run(engine.font())
                            .font_size(font_size)
                            .fill_glyphs(glyphs.iter().copied());
                        if let Some(width) = outline {
                            ctx.set_stroke(stroke(f64::from(width)));
                            ctx.glyph_run(engine.font())
                                .font_size(font_size)
                                .stroke_glyphs(glyphs.iter().copied());
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl FrameRenderer for CpuRenderer {
    fn render(&mut self, canvas: Canvas, list: &DrawList) -> FolioResult<FrameRGBA> {
        if canvas.width == 0 || canvas.height == 0 {
            return Ok(FrameRGBA {
                width: canvas.width,
                height: canvas.height,
                data: Vec::new(),
                premultiplied: true,
            });
        }
        let w: u16 = canvas
            .width
            .try_into()
            .map_err(|_| FolioError::render("canvas width exceeds u16"))?;
        let h: u16 = canvas
            .height
            .try_into()
            .map_err(|_| FolioError::render("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.with_ctx_mut(w, h, |this, ctx| {
            for cmd in &list.commands {
                this.draw_command(ctx, canvas, cmd)?;
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn paint(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width).with_caps(vello_cpu::kurbo::Cap::Round)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn line_to_cpu(l: Line) -> vello_cpu::kurbo::Line {
    vello_cpu::kurbo::Line::new(point_to_cpu(l.p0), point_to_cpu(l.p1))
}

fn circle_to_cpu(c: Circle) -> vello_cpu::kurbo::Circle {
    vello_cpu::kurbo::Circle::new(point_to_cpu(c.center), c.radius)
}

/// Outline width that fakes a bold weight, or `None` for regular text.
fn embolden_width(size_px: f32, bold: bool) -> Option<f32> {
    (bold && size_px > 0.0).then_some(size_px * EMBOLDEN_RATIO)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
