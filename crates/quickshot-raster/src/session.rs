//! The annotation session: the stateful raster editing engine.

use crate::compositor;
use crate::layer::Layer;
use crate::painter;
use crate::RasterError;
use kurbo::Point;
use quickshot_core::history::History;
use quickshot_core::style::{Rgba, Style};
use quickshot_core::tools::{ToolGesture, ToolKind};
use tiny_skia::Pixmap;

/// One capture-through-export editing session.
///
/// Owns the captured bitmap, the committed and live layers, the gesture
/// state machine, and the snapshot history. All points passed in must
/// already be mapped into the bitmap's raster space (see
/// [`quickshot_core::geometry::map_to_raster`]).
///
/// Per gesture the session runs `Idle -> Drawing -> Idle`: pointer-down
/// anchors a shape, pointer-move redraws the live preview, pointer-up
/// flattens the preview into the committed layer and records a history
/// snapshot. A pointer leaving the drawing surface cancels the gesture
/// without committing.
#[derive(Debug)]
pub struct AnnotationSession {
    base: Pixmap,
    committed: Layer,
    live: Layer,
    gesture: ToolGesture,
    history: History,
}

impl AnnotationSession {
    /// Create a session around a captured bitmap.
    ///
    /// Both layers are allocated at the bitmap's native dimensions and the
    /// history is seeded with a snapshot of the blank committed layer.
    pub fn new(base: Pixmap) -> Result<Self, RasterError> {
        let committed = Layer::new(base.width(), base.height())?;
        let live = Layer::new(base.width(), base.height())?;
        let history = History::new(committed.snapshot());
        Ok(Self {
            base,
            committed,
            live,
            gesture: ToolGesture::new(),
            history,
        })
    }

    pub fn width(&self) -> u32 {
        self.base.width()
    }

    pub fn height(&self) -> u32 {
        self.base.height()
    }

    /// Whether a drawing gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.gesture.is_active()
    }

    pub fn tool(&self) -> ToolKind {
        self.gesture.tool()
    }

    pub fn style(&self) -> Style {
        self.gesture.style()
    }

    /// Select a tool. Ignored while drawing.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.gesture.set_tool(tool);
    }

    /// Set the stroke color. Ignored while drawing.
    pub fn set_color(&mut self, color: Rgba) {
        self.gesture.set_color(color);
    }

    /// Set the stroke thickness (clamped). Ignored while drawing.
    pub fn set_thickness(&mut self, thickness: u32) {
        self.gesture.set_thickness(thickness);
    }

    /// Begin a gesture at a raster point.
    pub fn pointer_down(&mut self, point: Point) {
        if self.gesture.is_active() {
            log::debug!("pointer down ignored, gesture already active");
            return;
        }
        self.gesture.begin(point);
    }

    /// Advance the gesture to a new raster point, updating the live preview.
    pub fn pointer_move(&mut self, point: Point) {
        if !self.gesture.is_active() {
            return;
        }
        self.render_live(point);
    }

    /// Finish the gesture: flatten the live preview into the committed layer
    /// and record a history snapshot.
    pub fn pointer_up(&mut self, point: Point) {
        if !self.gesture.is_active() {
            return;
        }
        self.render_live(point);
        self.gesture.cancel();
        self.committed.composite_over(&self.live);
        self.live.clear();
        self.history.push(self.committed.snapshot());
    }

    /// Cancel the gesture because the pointer left the drawing surface.
    ///
    /// Nothing is committed and no history entry is pushed; a stray partial
    /// shape never reaches the committed layer.
    pub fn pointer_leave(&mut self) {
        if !self.gesture.is_active() {
            return;
        }
        self.gesture.cancel();
        self.live.clear();
        log::debug!("gesture cancelled, pointer left the drawing surface");
    }

    /// Restore the previous committed-layer snapshot.
    ///
    /// Returns false at the oldest retained snapshot or while drawing.
    pub fn undo(&mut self) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        match self.history.undo() {
            Some(snapshot) => {
                self.committed.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Restore the next committed-layer snapshot after an undo.
    ///
    /// Returns false when nothing has been undone or while drawing.
    pub fn redo(&mut self) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        match self.history.redo() {
            Some(snapshot) => {
                self.committed.restore(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The captured bitmap.
    pub fn base(&self) -> &Pixmap {
        &self.base
    }

    /// The committed annotation layer.
    pub fn committed(&self) -> &Layer {
        &self.committed
    }

    /// Merge the captured bitmap and the committed layer into one bitmap.
    ///
    /// Unavailable mid-gesture, so the live layer can never leak into an
    /// export.
    pub fn flatten(&self) -> Result<Pixmap, RasterError> {
        if self.gesture.is_active() {
            return Err(RasterError::GestureActive);
        }
        compositor::flatten(&self.base, &self.committed)
    }

    /// Export the flattened bitmap as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, RasterError> {
        let flattened = self.flatten()?;
        compositor::encode_png(&flattened)
    }

    fn render_live(&mut self, point: Point) {
        match self.gesture.tool() {
            ToolKind::Freehand => {
                let style = self.gesture.style();
                if let Some((from, to)) = self.gesture.update(point) {
                    painter::draw_segment(self.live.pixmap_mut(), from, to, &style);
                }
            }
            _ => {
                self.gesture.update(point);
                self.live.clear();
                if let Some(shape) = self.gesture.preview_shape() {
                    painter::draw_shape(self.live.pixmap_mut(), &shape);
                }
            }
        }
    }
}
