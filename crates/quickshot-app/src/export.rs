//! Export targets: clipboard and file save.

use quickshot_raster::RasterError;
use std::path::Path;
use thiserror::Error;
#[cfg(feature = "native")]
use tiny_skia::Pixmap;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No capture session is active.
    #[error("no active capture session")]
    NoSession,
    /// Flattening or encoding failed.
    #[error(transparent)]
    Raster(#[from] RasterError),
    /// The platform refused the clipboard write.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),
    /// Writing the image file failed.
    #[error("failed to write image file: {0}")]
    Io(#[from] std::io::Error),
}

/// Copy a flattened bitmap to the system clipboard.
///
/// The clipboard takes raw RGBA pixel data, not an encoded image.
#[cfg(feature = "native")]
pub fn copy_to_clipboard(pixmap: &Pixmap) -> Result<(), ExportError> {
    let image_data = arboard::ImageData {
        width: pixmap.width() as usize,
        height: pixmap.height() as usize,
        bytes: std::borrow::Cow::Borrowed(pixmap.data()),
    };
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;
    clipboard
        .set_image(image_data)
        .map_err(|e| ExportError::Clipboard(e.to_string()))?;
    log::info!(
        "image copied to clipboard ({}x{})",
        pixmap.width(),
        pixmap.height()
    );
    Ok(())
}

/// Write encoded PNG bytes to a file. Fire-and-forget from the flow's
/// perspective; there is no confirmation beyond the write itself.
pub fn save_to_file(path: &Path, png_data: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, png_data)?;
    log::info!("saved screenshot to {}", path.display());
    Ok(())
}
