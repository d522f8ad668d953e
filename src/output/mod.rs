//! Output module for presenting results
//!
//! This module handles:
//! - Writing tool results as pretty-printed JSON
//! - Rendering aggregated results as a human-readable report
//! - Converting HTML answer bodies into plain text

mod plain;

pub use plain::{answer_plain_text, render_aggregated, render_normalized};

use serde::Serialize;
use std::io::Write;

/// Writes a value as pretty-printed JSON followed by a newline
pub fn write_json<T: Serialize, W: Write>(writer: &mut W, value: &T) -> crate::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
