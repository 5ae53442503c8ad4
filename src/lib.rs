//! # gcode-clean
//!
//! Removes redundant `G1 X.. Y.. E..` moves from slicer output: points that sit
//! on the straight line between their neighbours, and points inside spans too
//! short to matter. The toolpath is unchanged; the controller just gets fewer
//! commands to plan.
//!
//! ```
//! use gcode_clean::{CleanOptions, clean_str};
//!
//! let cleaned = clean_str("G1 X0 Y0 E0\nG1 X1 Y0 E1\nG1 X2 Y0 E2\n", CleanOptions::default())?;
//! assert_eq!(cleaned.output, "G1 X0 Y0 E0\nG1 X2 Y0 E2\n");
//! # Ok::<(), gcode_clean::Error>(())
//! ```
//!
//! The same cleaner is exported to JavaScript as `clean_gcode`.

use std::path::PathBuf;

use wasm_bindgen::prelude::*;

pub mod files;
pub mod geometry;
pub mod lines;
pub mod motion;
pub mod rewrite;

pub use files::{CleanReport, clean_output_path, load_and_rewrite};
pub use geometry::{MAX_LINE_DEVIATION, MIN_SPAN_LENGTH, Position, Reason, Vector, evaluate};
pub use lines::Lines;
pub use rewrite::{
    CleanOptions, Cleaned, RewriteStats, Rewriter, clean_str, rewrite, rewrite_lines,
};

// --- LOGGING ---
#[cfg(target_arch = "wasm32")]
fn log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

#[cfg(not(target_arch = "wasm32"))]
fn log(_s: &str) {}
macro_rules! console_log {
    ($($t:tt)*) => (log(&format!($($t)*)))
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("File {} not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Line {line}: malformed number {text:?} in motion command")]
    MalformedNumber {
        line: usize,
        text: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Clean a G-code program from JavaScript.
///
/// `options` may be `undefined` or `{ verbose: bool }`. Resolves to
/// `{ output, stats }`; failures are thrown as a message string.
#[wasm_bindgen]
pub fn clean_gcode(code: String, options: JsValue) -> std::result::Result<JsValue, JsValue> {
    let options: CleanOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    let cleaned = clean_str(&code, options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    console_log!(
        "gcode-clean: {} lines in, {} out, {} redundant moves",
        cleaned.stats.lines_read,
        cleaned.stats.lines_written,
        cleaned.stats.removed
    );
    serde_wasm_bindgen::to_value(&cleaned).map_err(JsValue::from)
}
