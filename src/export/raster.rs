use crate::error::ExportError;
use crate::frame::Frame;
use crate::geometry::Size;
use crate::stroke::{Stroke, StrokeStyle};
use image::RgbaImage;
use vello_cpu::kurbo::{Affine, BezPath, Cap, Join, Point, Rect};
use vello_cpu::peniko::Color;

/// Opacity of the halo drawn around soft strokes.
const SOFT_HALO_OPACITY: f32 = 0.35;

fn stroke_path(stroke: &Stroke) -> Option<BezPath> {
    let (first, rest) = stroke.points().split_first()?;
    let mut path = BezPath::new();
    path.move_to(Point::new(first.x, first.y));
    if rest.is_empty() {
        // A lone point still draws a round dot.
        path.line_to(Point::new(first.x, first.y));
    }
    for point in rest {
        path.line_to(Point::new(point.x, point.y));
    }
    Some(path)
}

fn round_stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width)
        .with_caps(Cap::Round)
        .with_join(Join::Round)
}

fn draw_stroke(ctx: &mut vello_cpu::RenderContext, stroke: &Stroke) {
    let Some(path) = stroke_path(stroke) else {
        return;
    };
    let [r, g, b, a] = stroke.color().to_srgba_unmultiplied();

    if stroke.style() == StrokeStyle::Soft {
        let halo_alpha = (f32::from(a) * SOFT_HALO_OPACITY).round() as u8;
        ctx.set_paint(Color::from_rgba8(r, g, b, halo_alpha));
        ctx.set_stroke(round_stroke(stroke.hit_radius() * 2.0));
        ctx.stroke_path(&path);
    }

    ctx.set_paint(Color::from_rgba8(r, g, b, a));
    ctx.set_stroke(round_stroke(stroke.width()));
    ctx.stroke_path(&path);
}

/// Draws `frame` on white at `width` x `height` pixels, scaling from
/// `canvas` coordinates.
pub fn rasterize_frame(
    frame: &Frame,
    canvas: Size,
    width: u32,
    height: u32,
) -> Result<RgbaImage, ExportError> {
    let invalid = || ExportError::InvalidSize { width, height };
    let width_u16: u16 = width.try_into().map_err(|_| invalid())?;
    let height_u16: u16 = height.try_into().map_err(|_| invalid())?;
    if width_u16 == 0 || height_u16 == 0 || canvas.width <= 0.0 || canvas.height <= 0.0 {
        return Err(invalid());
    }

    let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
    ctx.set_transform(Affine::IDENTITY);
    ctx.set_paint(Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_rect(&Rect::new(0.0, 0.0, f64::from(width), f64::from(height)));

    ctx.set_transform(Affine::scale_non_uniform(
        f64::from(width) / canvas.width,
        f64::from(height) / canvas.height,
    ));
    for stroke in frame.strokes() {
        draw_stroke(&mut ctx, stroke);
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
    ctx.render_to_pixmap(&mut pixmap);

    // The background is opaque, so premultiplied and straight alpha agree.
    let data = pixmap.data_as_u8_slice().to_vec();
    RgbaImage::from_raw(width, height, data).ok_or_else(|| {
        ExportError::Raster(format!("pixel buffer does not match {width}x{height}"))
    })
}
