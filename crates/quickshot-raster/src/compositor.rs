//! Flattening and export encoding.

use crate::layer::Layer;
use crate::RasterError;
use tiny_skia::{Pixmap, PixmapPaint, Transform};

/// Merge the captured bitmap and the committed annotation layer into one
/// flattened bitmap.
///
/// The base is drawn first, the committed layer alpha-composited over it.
/// The live layer is never part of an export; it is guaranteed flattened into
/// the committed layer (or discarded) before export becomes reachable.
pub fn flatten(base: &Pixmap, committed: &Layer) -> Result<Pixmap, RasterError> {
    debug_assert_eq!(base.width(), committed.width());
    debug_assert_eq!(base.height(), committed.height());

    let mut output =
        Pixmap::new(base.width(), base.height()).ok_or(RasterError::Allocation {
            width: base.width(),
            height: base.height(),
        })?;
    output.draw_pixmap(
        0,
        0,
        base.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    output.draw_pixmap(
        0,
        0,
        committed.pixmap().as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    Ok(output)
}

/// Encode a flattened bitmap as a lossless RGBA PNG.
///
/// Recomputed on every call; export results are never cached.
pub fn encode_png(pixmap: &Pixmap) -> Result<Vec<u8>, RasterError> {
    let mut data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut data, pixmap.width(), pixmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixmap.data())?;
    }
    Ok(data)
}
