//! Recognition of the one command shape the cleaner rewrites:
//! `G1 X<num> Y<num> E<num>`, nothing before or after.

use std::sync::LazyLock;

use regex::bytes::Regex;

use crate::Error;
use crate::geometry::Position;

static MOTION_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^G1 X([-\d.]+) Y([-\d.]+) E([-\d.]+)$")
        .expect("motion command pattern is valid")
});

/// The raw X, Y and E texts captured from a matching line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionFields<'a> {
    pub x: &'a str,
    pub y: &'a str,
    pub e: &'a str,
}

/// Match a raw line against the motion command pattern.
///
/// Surrounding whitespace is ignored; anything else (extra axes, feed rate,
/// trailing comment, doubled spaces) makes the line a non-match. The line
/// may be in any encoding; only the captured fields have to be UTF-8.
pub fn match_motion(line: &[u8]) -> Option<MotionFields<'_>> {
    let caps = MOTION_COMMAND.captures(line.trim_ascii())?;
    let field = |i| std::str::from_utf8(caps.get(i)?.as_bytes()).ok();
    Some(MotionFields { x: field(1)?, y: field(2)?, e: field(3)? })
}

impl MotionFields<'_> {
    /// Parse the captured texts. `line` is only used for error reporting.
    pub fn position(&self, line: usize) -> Result<Position, Error> {
        let parse = |text: &str| {
            text.parse::<f64>().map_err(|source| Error::MalformedNumber {
                line,
                text: text.to_string(),
                source,
            })
        };
        Ok(Position::new([parse(self.x)?, parse(self.y)?, parse(self.e)?]))
    }
}
