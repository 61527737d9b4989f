//! Session flow control.
//!
//! Drives one capture-through-export interaction: requests a capture from
//! the host, seeds an annotation session from the delivered frame, and runs
//! exports. A generation counter guards every completion so a capture or
//! clipboard result that arrives after the session was dismissed can never
//! mutate torn-down state.

use crate::capture::{CaptureError, CaptureProvider, CaptureRequest, decode_capture};
use crate::export::{self, ExportError};
use quickshot_raster::AnnotationSession;
use std::fmt;
use std::path::{Path, PathBuf};

/// User-facing status line for the capture popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    Copied,
    CopyFailed,
    CaptureFailed,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Copied => write!(f, "Copied to clipboard!"),
            StatusMessage::CopyFailed => write!(f, "Copy failed. Try saving."),
            StatusMessage::CaptureFailed => write!(f, "Could not capture the page."),
        }
    }
}

struct ActiveSession {
    session: AnnotationSession,
    request: CaptureRequest,
}

/// Controls the single-capture flow for one host surface.
pub struct SessionController<P: CaptureProvider> {
    provider: P,
    /// Bumped on every dismissal; completions carrying an older generation
    /// are dropped.
    generation: u64,
    pending: Option<CaptureRequest>,
    active: Option<ActiveSession>,
    status: Option<StatusMessage>,
}

impl<P: CaptureProvider> SessionController<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            generation: 0,
            pending: None,
            active: None,
            status: None,
        }
    }

    /// The generation completions must echo back.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.status
    }

    pub fn session(&self) -> Option<&AnnotationSession> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn session_mut(&mut self) -> Option<&mut AnnotationSession> {
        self.active.as_mut().map(|a| &mut a.session)
    }

    /// Ask the host to capture. At most one request may be in flight; a
    /// second request before the first resolves is rejected.
    pub fn begin_capture(&mut self, request: CaptureRequest) -> Result<u64, CaptureError> {
        if self.pending.is_some() {
            return Err(CaptureError::Busy);
        }
        self.provider.request_capture(&request)?;
        self.pending = Some(request);
        Ok(self.generation)
    }

    /// Completion callback for a capture request.
    ///
    /// Results tagged with a stale generation are dropped silently: the
    /// session they belonged to no longer exists. A failed or undecodable
    /// capture tears the flow down.
    pub fn deliver_capture(
        &mut self,
        generation: u64,
        payload: Result<Vec<u8>, String>,
    ) -> Result<(), CaptureError> {
        if generation != self.generation {
            log::debug!("dropping capture result delivered to a dismissed session");
            return Ok(());
        }
        let Some(request) = self.pending.take() else {
            log::debug!("dropping capture result with no pending request");
            return Ok(());
        };

        let buffer = match payload {
            Ok(buffer) => buffer,
            Err(message) => {
                log::error!("capture failed: {message}");
                self.status = Some(StatusMessage::CaptureFailed);
                self.active = None;
                return Err(CaptureError::Failed(message));
            }
        };

        let base = match decode_capture(&buffer, &request) {
            Ok(base) => base,
            Err(error) => {
                log::error!("capture could not be decoded: {error}");
                self.status = Some(StatusMessage::CaptureFailed);
                self.active = None;
                return Err(error);
            }
        };

        let session = AnnotationSession::new(base)
            .map_err(|e| CaptureError::Failed(e.to_string()))?;
        self.active = Some(ActiveSession { session, request });
        self.status = None;
        Ok(())
    }

    /// Copy the flattened result to the clipboard.
    ///
    /// On failure the session stays open and the status prompts the user to
    /// use the save path instead.
    #[cfg(feature = "native")]
    pub fn copy_to_clipboard(&mut self) -> Result<(), ExportError> {
        let active = self.active.as_ref().ok_or(ExportError::NoSession)?;
        let flattened = active.session.flatten()?;
        match export::copy_to_clipboard(&flattened) {
            Ok(()) => {
                self.status = Some(StatusMessage::Copied);
                Ok(())
            }
            Err(error) => {
                log::error!("clipboard write failed: {error}");
                self.status = Some(StatusMessage::CopyFailed);
                Err(error)
            }
        }
    }

    /// Save the flattened result under the capture's default filename and
    /// end the session.
    pub fn save_to(&mut self, dir: &Path) -> Result<PathBuf, ExportError> {
        let active = self.active.as_ref().ok_or(ExportError::NoSession)?;
        let encoded = active.session.export_png()?;
        let path = dir.join(active.request.suggested_filename());
        export::save_to_file(&path, &encoded)?;
        self.dismiss();
        Ok(path)
    }

    /// Synchronously discard all session state.
    ///
    /// Any completion still in flight carries the old generation and will be
    /// dropped on delivery.
    pub fn dismiss(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.active = None;
        self.status = None;
    }
}
