//! Quickshot Raster Library
//!
//! CPU raster engine for the annotation pipeline: layered drawing surfaces,
//! stateless shape painters, the annotation session state machine, and the
//! flatten-and-encode compositor.

pub mod compositor;
pub mod layer;
pub mod painter;
pub mod session;

pub use compositor::{encode_png, flatten};
pub use layer::Layer;
pub use session::AnnotationSession;

use thiserror::Error;

/// Raster engine errors.
#[derive(Debug, Error)]
pub enum RasterError {
    /// A pixel surface of the given dimensions could not be allocated.
    #[error("failed to allocate a {width}x{height} raster surface")]
    Allocation { width: u32, height: u32 },
    /// PNG encoding failed.
    #[error("png encoding failed: {0}")]
    PngEncode(#[from] png::EncodingError),
    /// Export was requested while a drawing gesture is active.
    #[error("export is unavailable while a drawing gesture is active")]
    GestureActive,
}
