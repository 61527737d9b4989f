//! Tool selection and the per-gesture drawing state machine.

use crate::shapes::{Arrow, Ellipse, Rectangle, Shape, Stroke};
use crate::style::{Rgba, Style};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available drawing tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Freehand,
    Rectangle,
    Ellipse,
    Arrow,
}

/// State of a drawing gesture.
#[derive(Debug, Clone, Copy, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer is down and a shape is being drawn.
    Active {
        /// Point where the gesture started.
        anchor: Point,
        /// Latest pointer position.
        current: Point,
    },
}

/// Tracks the current tool, style, and in-flight gesture.
///
/// All points passed in are expected to be in raster coordinates already;
/// mapping from viewport space happens before this layer.
#[derive(Debug, Clone, Default)]
pub struct ToolGesture {
    current_tool: ToolKind,
    state: GestureState,
    /// Accumulated points for the freehand tool.
    freehand_points: Vec<Point>,
    style: Style,
}

impl ToolGesture {
    /// Create a gesture tracker with default tool and style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the selected tool.
    pub fn tool(&self) -> ToolKind {
        self.current_tool
    }

    /// Get the current style.
    pub fn style(&self) -> Style {
        self.style
    }

    /// Select a tool. Ignored while a gesture is active.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.is_active() {
            log::debug!("tool change ignored during an active gesture");
            return;
        }
        self.current_tool = tool;
    }

    /// Set the stroke color. Ignored while a gesture is active.
    pub fn set_color(&mut self, color: Rgba) {
        if self.is_active() {
            log::debug!("color change ignored during an active gesture");
            return;
        }
        self.style.color = color;
    }

    /// Set the stroke thickness (clamped). Ignored while a gesture is active.
    pub fn set_thickness(&mut self, thickness: u32) {
        if self.is_active() {
            log::debug!("thickness change ignored during an active gesture");
            return;
        }
        self.style.set_thickness(thickness);
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active { .. })
    }

    /// Begin a gesture at the given raster point.
    pub fn begin(&mut self, point: Point) {
        if self.current_tool == ToolKind::Freehand {
            self.freehand_points.clear();
            self.freehand_points.push(point);
        }
        self.state = GestureState::Active {
            anchor: point,
            current: point,
        };
    }

    /// Advance the gesture to a new pointer position.
    ///
    /// For the freehand tool the point is appended and the newly added
    /// segment `(previous, point)` is returned so callers can draw it
    /// incrementally. Other tools return `None`; their preview is recomputed
    /// from scratch via [`Self::preview_shape`].
    pub fn update(&mut self, point: Point) -> Option<(Point, Point)> {
        let GestureState::Active { current, .. } = &mut self.state else {
            return None;
        };
        *current = point;
        if self.current_tool == ToolKind::Freehand {
            let previous = *self.freehand_points.last()?;
            self.freehand_points.push(point);
            return Some((previous, point));
        }
        None
    }

    /// The shape described by the gesture so far, if any.
    pub fn preview_shape(&self) -> Option<Shape> {
        let GestureState::Active { anchor, current } = self.state else {
            return None;
        };
        match self.current_tool {
            ToolKind::Freehand => {
                if self.freehand_points.len() < 2 {
                    return None;
                }
                Some(Shape::Freehand(Stroke {
                    points: self.freehand_points.clone(),
                    style: self.style,
                }))
            }
            ToolKind::Rectangle => Some(Shape::Rectangle(Rectangle::new(
                anchor, current, self.style,
            ))),
            ToolKind::Ellipse => Some(Shape::Ellipse(Ellipse::new(anchor, current, self.style))),
            ToolKind::Arrow => Some(Shape::Arrow(Arrow::new(anchor, current, self.style))),
        }
    }

    /// Reset the gesture to idle, discarding accumulated points.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
        self.freehand_points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_selection() {
        let mut gesture = ToolGesture::new();
        assert_eq!(gesture.tool(), ToolKind::Freehand);

        gesture.set_tool(ToolKind::Rectangle);
        assert_eq!(gesture.tool(), ToolKind::Rectangle);
    }

    #[test]
    fn test_rectangle_gesture() {
        let mut gesture = ToolGesture::new();
        gesture.set_tool(ToolKind::Rectangle);

        assert!(!gesture.is_active());
        gesture.begin(Point::new(10.0, 10.0));
        assert!(gesture.is_active());

        assert!(gesture.update(Point::new(50.0, 40.0)).is_none());

        match gesture.preview_shape() {
            Some(Shape::Rectangle(rect)) => {
                assert_eq!(rect.anchor, Point::new(10.0, 10.0));
                assert_eq!(rect.terminal, Point::new(50.0, 40.0));
            }
            other => panic!("expected rectangle preview, got {other:?}"),
        }

        gesture.cancel();
        assert!(!gesture.is_active());
    }

    #[test]
    fn test_freehand_accumulates_segments() {
        let mut gesture = ToolGesture::new();
        gesture.begin(Point::new(0.0, 0.0));

        let seg = gesture.update(Point::new(10.0, 10.0)).unwrap();
        assert_eq!(seg, (Point::new(0.0, 0.0), Point::new(10.0, 10.0)));

        let seg = gesture.update(Point::new(20.0, 0.0)).unwrap();
        assert_eq!(seg, (Point::new(10.0, 10.0), Point::new(20.0, 0.0)));

        match gesture.preview_shape() {
            Some(Shape::Freehand(stroke)) => assert_eq!(stroke.len(), 3),
            other => panic!("expected freehand preview, got {other:?}"),
        }
    }

    #[test]
    fn test_freehand_single_point_has_no_preview() {
        let mut gesture = ToolGesture::new();
        gesture.begin(Point::new(5.0, 5.0));
        assert!(gesture.preview_shape().is_none());
    }

    #[test]
    fn test_config_changes_ignored_mid_gesture() {
        let mut gesture = ToolGesture::new();
        gesture.set_tool(ToolKind::Arrow);
        gesture.set_thickness(5);
        gesture.begin(Point::new(0.0, 0.0));

        gesture.set_tool(ToolKind::Ellipse);
        gesture.set_color(Rgba::black());
        gesture.set_thickness(9);

        assert_eq!(gesture.tool(), ToolKind::Arrow);
        assert_eq!(gesture.style().color, Rgba::red());
        assert_eq!(gesture.style().thickness(), 5);

        gesture.cancel();
        gesture.set_tool(ToolKind::Ellipse);
        assert_eq!(gesture.tool(), ToolKind::Ellipse);
    }

    #[test]
    fn test_update_outside_gesture_is_noop() {
        let mut gesture = ToolGesture::new();
        assert!(gesture.update(Point::new(1.0, 1.0)).is_none());
        assert!(gesture.preview_shape().is_none());
    }
}
