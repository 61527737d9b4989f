//! Quickshot Core Library
//!
//! Platform-agnostic data structures and logic for the Quickshot
//! screen-capture annotation engine.

pub mod geometry;
pub mod history;
pub mod shapes;
pub mod style;
pub mod tools;

pub use geometry::{CaptureRegion, DisplayRect, map_to_raster};
pub use history::{History, MAX_HISTORY, Snapshot};
pub use shapes::{Arrow, Ellipse, Rectangle, Shape, Stroke};
pub use style::{Rgba, Style};
pub use tools::{GestureState, ToolGesture, ToolKind};
