//! Collinearity test over consecutive motion targets.
//!
//! A point is judged against its two neighbours: it is redundant when the
//! whole span is negligibly short, or when it sits on the straight line from
//! the oldest to the newest point. Extrusion is treated as a third axis, so a
//! point that keeps X/Y on the line but changes the extrusion rate is kept.

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Spans shorter than this (oldest to newest) are dropped regardless of shape.
pub const MIN_SPAN_LENGTH: f64 = 0.1;

/// Maximum distance of the middle point from the straight line.
pub const MAX_LINE_DEVIATION: f64 = 0.02;

/// Number of components in a [`Position`]: X, Y, E.
pub const POSITION_AXES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize>(pub [f64; N]);

/// Target state of one `G1 X.. Y.. E..` command.
pub type Position = Vector<POSITION_AXES>;

impl<const N: usize> Vector<N> {
    pub fn new(components: [f64; N]) -> Self {
        Self(components)
    }

    pub fn components(&self) -> &[f64; N] {
        &self.0
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|c| c * c).sum::<f64>().sqrt()
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Vector<N>;

    fn add(self, rhs: Vector<N>) -> Vector<N> {
        Vector(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Vector<N>;

    fn sub(self, rhs: Vector<N>) -> Vector<N> {
        Vector(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Vector<N>;

    fn mul(self, rhs: f64) -> Vector<N> {
        Vector(self.0.map(|c| c * rhs))
    }
}

/// Why a middle point was judged redundant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reason {
    /// The outer span is shorter than [`MIN_SPAN_LENGTH`].
    TooShort { length: f64 },
    /// The middle point is within [`MAX_LINE_DEVIATION`] of the outer line.
    StraightLine { ratio: f64, error: f64 },
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::TooShort { length } => write!(f, "length={length:.2} (too short)"),
            Reason::StraightLine { ratio, error } => {
                write!(f, "ratio={ratio:.2} error={error:.2} (straight line)")
            }
        }
    }
}

/// Decide whether `p1` is redundant between `p0` (oldest) and `p2` (newest).
///
/// Returns `None` when any point is missing or when `p1` strays too far from
/// the line `p0 -> p2`. Note the length check looks at the outer span only,
/// not at the individual sub-segments.
pub fn evaluate<const N: usize>(
    p0: Option<&Vector<N>>,
    p1: Option<&Vector<N>>,
    p2: Option<&Vector<N>>,
) -> Option<Reason> {
    let (p0, p1, p2) = (*p0?, *p1?, *p2?);

    let v1 = p1 - p0;
    let v2 = p2 - p0;
    let len1 = v1.norm();
    let len2 = v2.norm();

    if len2 < MIN_SPAN_LENGTH {
        return Some(Reason::TooShort { length: len2 });
    }

    // Where the middle point would fall on the outer segment.
    let ratio = len1 / len2;
    let error = (v1 - v2 * ratio).norm();
    if error > MAX_LINE_DEVIATION {
        return None;
    }
    Some(Reason::StraightLine { ratio, error })
}
