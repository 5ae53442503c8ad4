//! File-to-file driver used by the command-line tool.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::rewrite::{CleanOptions, RewriteStats, rewrite};
use crate::{Error, Result};

const READ_BUFFER_BYTES: usize = 64 * 1024;
const WRITE_BUFFER_BYTES: usize = 8 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub output: PathBuf,
    pub stats: RewriteStats,
}

/// `dir/part.gcode` -> `dir/part.clean.gcode`; `dir/part` -> `dir/part.clean`.
pub fn clean_output_path(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) => {
            let mut suffix = std::ffi::OsString::from("clean.");
            suffix.push(ext);
            input.with_extension(suffix)
        }
        None => input.with_extension("clean"),
    }
}

/// Clean `input` into its sibling `.clean` file, overwriting any previous one.
pub fn load_and_rewrite(input: &Path, options: CleanOptions) -> Result<CleanReport> {
    if !input.is_file() {
        return Err(Error::InputNotFound(input.to_path_buf()));
    }
    let output = clean_output_path(input);

    info!("Opening file: {}", input.display());
    let reader = BufReader::with_capacity(READ_BUFFER_BYTES, File::open(input)?);

    info!("Writing file: {}", output.display());
    let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, File::create(&output)?);

    let stats = rewrite(reader, &mut writer, options.verbose)?;
    writer.flush()?;

    info!(
        lines_read = stats.lines_read,
        lines_written = stats.lines_written,
        removed = stats.removed,
        "Completed successfully."
    );
    Ok(CleanReport { output, stats })
}
