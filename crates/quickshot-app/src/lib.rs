//! Quickshot Application Shell
//!
//! Glue between the host environment and the raster engine: the capture
//! request/decode pipeline, export targets (clipboard and file save), and the
//! session controller that guards the single-capture flow and tears sessions
//! down safely.

pub mod capture;
pub mod controller;
pub mod export;

pub use capture::{CaptureError, CaptureKind, CaptureProvider, CaptureRequest, decode_capture};
pub use controller::{SessionController, StatusMessage};
#[cfg(feature = "native")]
pub use export::copy_to_clipboard;
pub use export::{ExportError, save_to_file};

/// Initialize logging for host shells that do not bring their own logger.
#[cfg(feature = "native")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
