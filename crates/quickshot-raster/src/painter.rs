//! Stateless shape rasterization.
//!
//! Pure functions over a pixmap: style arrives as a parameter, nothing here
//! mutates session state. Strokes use round caps and joins and are
//! anti-aliased with "over" blending.

use kurbo::Point;
use quickshot_core::shapes::{Arrow, Ellipse, Rectangle, Shape, Stroke};
use quickshot_core::style::Style;
use tiny_skia::{
    Color, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke as StrokeStyle, Transform,
};

fn paint_for(style: &Style) -> Paint<'static> {
    let mut paint = Paint::default();
    let c = style.color;
    paint.set_color(Color::from_rgba8(c.r, c.g, c.b, c.a));
    paint.anti_alias = true;
    paint
}

fn stroke_for(style: &Style) -> StrokeStyle {
    StrokeStyle {
        width: style.thickness() as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..StrokeStyle::default()
    }
}

fn stroke_path(pixmap: &mut Pixmap, path: &tiny_skia::Path, style: &Style) {
    pixmap.stroke_path(
        path,
        &paint_for(style),
        &stroke_for(style),
        Transform::identity(),
        None,
    );
}

/// Draw one line segment. The freehand tool calls this once per pointer
/// event, so a drag never redraws the whole stroke.
pub fn draw_segment(pixmap: &mut Pixmap, from: Point, to: Point, style: &Style) {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x as f32, from.y as f32);
    pb.line_to(to.x as f32, to.y as f32);
    if let Some(path) = pb.finish() {
        stroke_path(pixmap, &path, style);
    }
}

/// Draw a complete freehand stroke as a polyline.
pub fn draw_stroke(pixmap: &mut Pixmap, stroke: &Stroke) {
    if stroke.points.len() < 2 {
        return;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(stroke.points[0].x as f32, stroke.points[0].y as f32);
    for point in stroke.points.iter().skip(1) {
        pb.line_to(point.x as f32, point.y as f32);
    }
    if let Some(path) = pb.finish() {
        stroke_path(pixmap, &path, &stroke.style);
    }
}

/// Draw an axis-aligned rectangle outline.
pub fn draw_rectangle(pixmap: &mut Pixmap, rectangle: &Rectangle) {
    let r = rectangle.to_rect();
    let Some(rect) =
        tiny_skia::Rect::from_ltrb(r.x0 as f32, r.y0 as f32, r.x1 as f32, r.y1 as f32)
    else {
        return;
    };
    let path = PathBuilder::from_rect(rect);
    stroke_path(pixmap, &path, &rectangle.style);
}

/// Draw a circle outline centered at the gesture anchor.
pub fn draw_ellipse(pixmap: &mut Pixmap, ellipse: &Ellipse) {
    let radius = ellipse.radius() as f32;
    let Some(path) =
        PathBuilder::from_circle(ellipse.center.x as f32, ellipse.center.y as f32, radius)
    else {
        return;
    };
    stroke_path(pixmap, &path, &ellipse.style);
}

/// Draw an arrow: shaft plus two head lines.
pub fn draw_arrow(pixmap: &mut Pixmap, arrow: &Arrow) {
    if arrow.length() < f64::EPSILON {
        return;
    }
    let (head_left, head_right) = arrow.head_points();

    let mut pb = PathBuilder::new();
    pb.move_to(arrow.start.x as f32, arrow.start.y as f32);
    pb.line_to(arrow.end.x as f32, arrow.end.y as f32);
    pb.move_to(arrow.end.x as f32, arrow.end.y as f32);
    pb.line_to(head_left.x as f32, head_left.y as f32);
    pb.move_to(arrow.end.x as f32, arrow.end.y as f32);
    pb.line_to(head_right.x as f32, head_right.y as f32);

    if let Some(path) = pb.finish() {
        stroke_path(pixmap, &path, &arrow.style);
    }
}

/// Dispatch on the shape variant.
pub fn draw_shape(pixmap: &mut Pixmap, shape: &Shape) {
    match shape {
        Shape::Freehand(stroke) => draw_stroke(pixmap, stroke),
        Shape::Rectangle(rectangle) => draw_rectangle(pixmap, rectangle),
        Shape::Ellipse(ellipse) => draw_ellipse(pixmap, ellipse),
        Shape::Arrow(arrow) => draw_arrow(pixmap, arrow),
    }
}
