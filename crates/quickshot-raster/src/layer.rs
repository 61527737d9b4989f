//! Raster drawing surfaces.

use crate::RasterError;
use quickshot_core::history::Snapshot;
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

/// A raster surface equal in size to the captured bitmap.
///
/// Two layers exist per session: the *committed* layer holding every
/// finalized annotation as pixels, and the *live* layer holding only the
/// in-progress shape preview.
#[derive(Debug, Clone)]
pub struct Layer {
    pixmap: Pixmap,
}

impl Layer {
    /// Create a transparent layer of the given dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::Allocation { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    /// Take a full pixel-content copy of this layer.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.width(), self.height(), self.pixmap.data().to_vec())
    }

    /// Overwrite this layer's pixels from a snapshot of equal dimensions.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        debug_assert_eq!(snapshot.width(), self.width());
        debug_assert_eq!(snapshot.height(), self.height());
        self.pixmap.data_mut().copy_from_slice(snapshot.data());
    }

    /// Alpha-composite another layer over this one ("over" semantics).
    pub fn composite_over(&mut self, top: &Layer) {
        self.pixmap.draw_pixmap(
            0,
            0,
            top.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_is_transparent() {
        let layer = Layer::new(4, 3).unwrap();
        assert_eq!(layer.width(), 4);
        assert_eq!(layer.height(), 3);
        assert!(layer.pixmap().data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            Layer::new(0, 10),
            Err(RasterError::Allocation { .. })
        ));
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut layer = Layer::new(2, 2).unwrap();
        layer.pixmap_mut().fill(Color::from_rgba8(10, 20, 30, 255));
        let snapshot = layer.snapshot();

        layer.clear();
        assert!(layer.pixmap().data().iter().all(|&b| b == 0));

        layer.restore(&snapshot);
        assert_eq!(layer.snapshot(), snapshot);
    }

    #[test]
    fn test_composite_over() {
        let mut bottom = Layer::new(2, 1).unwrap();
        bottom.pixmap_mut().fill(Color::from_rgba8(255, 0, 0, 255));

        let mut top = Layer::new(2, 1).unwrap();
        top.pixmap_mut().fill(Color::from_rgba8(0, 255, 0, 255));

        bottom.composite_over(&top);
        let px = bottom.pixmap().pixel(0, 0).unwrap();
        assert_eq!(px.green(), 255);
        assert_eq!(px.red(), 0);
    }

    #[test]
    fn test_composite_preserves_uncovered_pixels() {
        let mut bottom = Layer::new(2, 1).unwrap();
        bottom.pixmap_mut().fill(Color::from_rgba8(255, 0, 0, 255));

        // Transparent top layer leaves the bottom untouched.
        let top = Layer::new(2, 1).unwrap();
        bottom.composite_over(&top);
        let px = bottom.pixmap().pixel(1, 0).unwrap();
        assert_eq!(px.red(), 255);
        assert_eq!(px.alpha(), 255);
    }
}
