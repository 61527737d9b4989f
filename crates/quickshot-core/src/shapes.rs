//! Annotation shape values.
//!
//! Shapes are plain value records handed from the gesture state machine to
//! the rasterizer. They are flattened to pixels on commit and never persisted
//! afterwards; the history keeps raster snapshots, not shape lists.

use crate::style::Style;
use kurbo::{Point, Rect, Vec2};

/// A freehand stroke: an ordered point sequence plus style.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Points in raster coordinates, in draw order.
    pub points: Vec<Point>,
    /// Style captured when the stroke began.
    pub style: Style,
}

impl Stroke {
    /// Create a stroke starting at a single anchor point.
    pub fn new(anchor: Point, style: Style) -> Self {
        Self {
            points: vec![anchor],
            style,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// An axis-aligned rectangle outline defined by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub anchor: Point,
    pub terminal: Point,
    pub style: Style,
}

impl Rectangle {
    pub fn new(anchor: Point, terminal: Point, style: Style) -> Self {
        Self {
            anchor,
            terminal,
            style,
        }
    }

    /// The normalized box spanned by the two corners.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.anchor, self.terminal)
    }
}

/// A circle outline centered at the gesture anchor.
///
/// The radius is the euclidean anchor-to-terminal distance, uniform in both
/// axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub terminal: Point,
    pub style: Style,
}

impl Ellipse {
    pub fn new(center: Point, terminal: Point, style: Style) -> Self {
        Self {
            center,
            terminal,
            style,
        }
    }

    pub fn radius(&self) -> f64 {
        self.center.distance(self.terminal)
    }
}

/// A straight arrow: shaft from `start` to `end` plus a two-line head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub start: Point,
    /// End point (where the arrowhead points).
    pub end: Point,
    pub style: Style,
}

impl Arrow {
    /// Head length at zero thickness.
    pub const HEAD_BASE_LENGTH: f64 = 15.0;
    /// Head length gained per unit of stroke thickness.
    pub const HEAD_LENGTH_PER_THICKNESS: f64 = 1.5;
    /// Half-angle of the head, off the shaft direction.
    pub const HEAD_HALF_ANGLE: f64 = std::f64::consts::FRAC_PI_6;

    pub fn new(start: Point, end: Point, style: Style) -> Self {
        Self { start, end, style }
    }

    /// Get the direction vector (normalized).
    pub fn direction(&self) -> Vec2 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        let len = (dx * dx + dy * dy).sqrt();
        if len < f64::EPSILON {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(dx / len, dy / len)
        }
    }

    /// Get the length of the arrow shaft.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Head length for this arrow's thickness.
    pub fn head_length(&self) -> f64 {
        Self::HEAD_BASE_LENGTH + Self::HEAD_LENGTH_PER_THICKNESS * f64::from(self.style.thickness())
    }

    /// The two free endpoints of the head lines.
    ///
    /// Each sits `head_length()` away from `end`, rotated
    /// [`Self::HEAD_HALF_ANGLE`] to either side of the reversed shaft
    /// direction.
    pub fn head_points(&self) -> (Point, Point) {
        let dir = self.direction();
        let back = (-dir.y).atan2(-dir.x);
        let len = self.head_length();
        let left = Point::new(
            self.end.x + len * (back + Self::HEAD_HALF_ANGLE).cos(),
            self.end.y + len * (back + Self::HEAD_HALF_ANGLE).sin(),
        );
        let right = Point::new(
            self.end.x + len * (back - Self::HEAD_HALF_ANGLE).cos(),
            self.end.y + len * (back - Self::HEAD_HALF_ANGLE).sin(),
        );
        (left, right)
    }
}

/// Tagged union of every drawable annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Freehand(Stroke),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Arrow(Arrow),
}

impl Shape {
    pub fn style(&self) -> &Style {
        match self {
            Shape::Freehand(s) => &s.style,
            Shape::Rectangle(s) => &s.style,
            Shape::Ellipse(s) => &s.style,
            Shape::Arrow(s) => &s.style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_normalizes_corners() {
        let rect = Rectangle::new(
            Point::new(50.0, 40.0),
            Point::new(10.0, 10.0),
            Style::default(),
        );
        let r = rect.to_rect();
        assert!((r.x0 - 10.0).abs() < f64::EPSILON);
        assert!((r.y0 - 10.0).abs() < f64::EPSILON);
        assert!((r.x1 - 50.0).abs() < f64::EPSILON);
        assert!((r.y1 - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ellipse_radius() {
        let ellipse = Ellipse::new(
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Style::default(),
        );
        assert!((ellipse.radius() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_arrow_direction_and_length() {
        let arrow = Arrow::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Style::default(),
        );
        let dir = arrow.direction();
        assert!((dir.x - 1.0).abs() < f64::EPSILON);
        assert!(dir.y.abs() < f64::EPSILON);
        assert!((arrow.length() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_arrow_head_length_scales_with_thickness() {
        let arrow = Arrow::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Style::new(crate::style::Rgba::red(), 3),
        );
        assert!((arrow.head_length() - 19.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_arrow_head_half_angle_is_thirty_degrees() {
        let arrow = Arrow::new(
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Style::new(crate::style::Rgba::red(), 3),
        );
        let (left, right) = arrow.head_points();
        let shaft_back = Vec2::new(arrow.start.x - arrow.end.x, arrow.start.y - arrow.end.y);
        for head in [left, right] {
            let v = Vec2::new(head.x - arrow.end.x, head.y - arrow.end.y);
            assert!((v.hypot() - arrow.head_length()).abs() < 1e-9);
            let cos = v.dot(shaft_back) / (v.hypot() * shaft_back.hypot());
            assert!((cos.acos() - Arrow::HEAD_HALF_ANGLE).abs() < 1e-9);
        }
        // The two head lines sit on opposite sides of the shaft.
        assert!(left.y < 0.0 && right.y > 0.0 || left.y > 0.0 && right.y < 0.0);
    }

    #[test]
    fn test_degenerate_arrow_direction() {
        let p = Point::new(5.0, 5.0);
        let arrow = Arrow::new(p, p, Style::default());
        let dir = arrow.direction();
        assert!((dir.x - 1.0).abs() < f64::EPSILON);
        assert!(dir.y.abs() < f64::EPSILON);
    }
}
