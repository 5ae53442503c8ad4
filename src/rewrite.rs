//! Single-pass rewriter that drops redundant motion commands.
//!
//! Every line is held back one step as the pending line. Whether it is kept
//! is only known once the next line has been read: if that next line is a
//! motion command completing a straight (or negligibly short) three-point
//! window, the pending line is the middle point and gets dropped, or turned
//! into a comment carrying the reason in verbose mode.

use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::geometry::{Position, evaluate};
use crate::lines::Lines;
use crate::motion::match_motion;

/// Runtime options shared by the CLI and the browser surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanOptions {
    /// Keep removed lines as `;`-comments with the removal reason.
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStats {
    pub lines_read: usize,
    pub lines_written: usize,
    pub motion_commands: usize,
    /// Motion commands dropped or, in verbose mode, commented out.
    pub removed: usize,
}

/// Output of [`clean_str`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cleaned {
    pub output: String,
    pub stats: RewriteStats,
}

/// The last recognised motion targets of the current unbroken run.
///
/// The newest point is never stored: it arrives with the line being fed and
/// only becomes `p1` once the window is updated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Window {
    p0: Option<Position>,
    p1: Option<Position>,
}

impl Window {
    fn reset(&mut self) {
        self.p0 = None;
        self.p1 = None;
    }

    /// The middle point was kept: slide everything forward.
    fn advance(&mut self, newest: Position) {
        self.p0 = self.p1;
        self.p1 = Some(newest);
    }

    /// The middle point was removed: the newest point takes its place.
    fn supersede(&mut self, newest: Position) {
        self.p1 = Some(newest);
    }
}

/// Line-at-a-time cleaner holding the window and the pending line.
pub struct Rewriter {
    verbose: bool,
    window: Window,
    pending: Option<Vec<u8>>,
    stats: RewriteStats,
}

impl Rewriter {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            window: Window::default(),
            pending: None,
            stats: RewriteStats::default(),
        }
    }

    pub fn with_options(options: CleanOptions) -> Self {
        Self::new(options.verbose)
    }

    pub fn stats(&self) -> RewriteStats {
        self.stats
    }

    /// Process one raw input line (without its terminator).
    ///
    /// The previously pending line is written, dropped or annotated before
    /// `line` replaces it.
    pub fn feed<W: Write + ?Sized>(&mut self, line: Vec<u8>, out: &mut W) -> Result<()> {
        self.stats.lines_read += 1;
        let line_number = self.stats.lines_read;

        match match_motion(&line) {
            Some(fields) => {
                self.stats.motion_commands += 1;
                let newest = fields.position(line_number)?;
                match evaluate(self.window.p0.as_ref(), self.window.p1.as_ref(), Some(&newest)) {
                    Some(reason) => {
                        // p1 came from the pending line, so it is always present here.
                        if let Some(previous) = self.pending.take() {
                            debug!(line = line_number - 1, %reason, "redundant motion command");
                            self.stats.removed += 1;
                            if self.verbose {
                                let mut annotated = Vec::with_capacity(previous.len() + 48);
                                annotated.push(b';');
                                annotated.extend_from_slice(previous.trim_ascii_end());
                                write!(annotated, " {reason}")?;
                                self.pending = Some(annotated);
                            }
                        }
                        self.window.supersede(newest);
                    }
                    None => self.window.advance(newest),
                }
            }
            None => self.window.reset(),
        }

        self.emit_pending(out)?;
        self.pending = Some(line);
        Ok(())
    }

    /// Flush the last pending line and return the totals.
    pub fn finish<W: Write + ?Sized>(mut self, out: &mut W) -> Result<RewriteStats> {
        self.emit_pending(out)?;
        Ok(self.stats)
    }

    fn emit_pending<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<()> {
        if let Some(line) = self.pending.take() {
            out.write_all(&line)?;
            out.write_all(b"\n")?;
            self.stats.lines_written += 1;
        }
        Ok(())
    }
}

/// Rewrite a sequence of lines into `out`.
///
/// Stops at the first read error or malformed number; whatever was already
/// written to `out` stays there.
pub fn rewrite_lines<I, W>(lines: I, out: &mut W, verbose: bool) -> Result<RewriteStats>
where
    I: IntoIterator<Item = io::Result<Vec<u8>>>,
    W: Write + ?Sized,
{
    let mut rewriter = Rewriter::new(verbose);
    for line in lines {
        rewriter.feed(line?, out)?;
    }
    rewriter.finish(out)
}

/// Rewrite everything readable from `input` into `out`.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`; each written line ends with `\n`.
pub fn rewrite<R: BufRead, W: Write + ?Sized>(
    input: R,
    out: &mut W,
    verbose: bool,
) -> Result<RewriteStats> {
    rewrite_lines(Lines::new(input), out, verbose)
}

/// Clean a whole program held in memory.
pub fn clean_str(code: &str, options: CleanOptions) -> Result<Cleaned> {
    let mut buf = Vec::with_capacity(code.len());
    let stats = rewrite(code.as_bytes(), &mut buf, options.verbose)?;
    let output = String::from_utf8(buf)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(Cleaned { output, stats })
}
