//! Vector widths and lane storage formats.
//!
//! Buffers are flat slices of lane values grouped by an [`ElementWidth`].
//! Three-wide vectors occupy four physical slots per group; the fourth slot
//! is padding and is never read as data.

use std::fmt;

use half::f16;

use crate::precision::PrecisionClass;

/// Logical vector width of the verified buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementWidth {
    Scalar,
    Two,
    Three,
    Four,
}

impl ElementWidth {
    pub const ALL: [ElementWidth; 4] = [
        ElementWidth::Scalar,
        ElementWidth::Two,
        ElementWidth::Three,
        ElementWidth::Four,
    ];

    /// Number of logical lanes per group.
    #[inline(always)]
    pub fn lanes(self) -> usize {
        match self {
            ElementWidth::Scalar => 1,
            ElementWidth::Two => 2,
            ElementWidth::Three => 3,
            ElementWidth::Four => 4,
        }
    }

    /// Number of physical slots per group.
    #[inline(always)]
    pub fn stride(self) -> usize {
        match self {
            ElementWidth::Scalar => 1,
            ElementWidth::Two => 2,
            ElementWidth::Three | ElementWidth::Four => 4,
        }
    }

    /// Flat slot index of `lane` within `group`.
    #[inline(always)]
    pub fn slot(self, group: usize, lane: usize) -> usize {
        group * self.stride() + lane
    }

    /// Suffix used in check names: empty for scalars, otherwise the width.
    pub fn suffix(self) -> &'static str {
        match self {
            ElementWidth::Scalar => "",
            ElementWidth::Two => "2",
            ElementWidth::Three => "3",
            ElementWidth::Four => "4",
        }
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lanes())
    }
}

/// A scalar lane value stored in a verified buffer.
pub trait Lane: Copy + Send + Sync + fmt::Debug {
    /// Precision class of this storage format.
    const CLASS: PrecisionClass;

    /// Decodes the lane to `f64` without loss.
    fn to_f64(self) -> f64;

    /// Encodes `value`, rounding to nearest.
    fn from_f64(value: f64) -> Self;

    /// Raw encoding for reduced-precision formats, reported next to the
    /// decoded value. `None` for formats reported as-is.
    fn raw_bits(self) -> Option<u16> {
        None
    }
}

impl Lane for f32 {
    const CLASS: PrecisionClass = PrecisionClass::Single;

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Lane for f16 {
    const CLASS: PrecisionClass = PrecisionClass::Half;

    #[inline(always)]
    fn to_f64(self) -> f64 {
        f16::to_f64(self)
    }

    #[inline(always)]
    fn from_f64(value: f64) -> Self {
        f16::from_f64(value)
    }

    #[inline(always)]
    fn raw_bits(self) -> Option<u16> {
        Some(self.to_bits())
    }
}
