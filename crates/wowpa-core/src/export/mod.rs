//! Output formats for published frames.

pub mod console;

pub use console::{format_frame_console, format_frame_summary};

use crate::error::Result;
use crate::position::OutputFrame;

/// One JSON line per frame.
pub fn format_frame_json(frame: &OutputFrame) -> Result<String> {
    Ok(serde_json::to_string(frame)?)
}
