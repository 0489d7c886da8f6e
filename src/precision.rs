//! Precision modes and numeric precision classes.
//!
//! A [`PrecisionMode`] selects how generous the ULP allowance is, a
//! [`PrecisionClass`] selects which lane format the allowance is measured in.
//! References are always evaluated in `f64` and only rounded to the class
//! when sizing an interval.

use std::fmt;

use half::f16;

/// Accuracy contract the kernel under test was compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecisionMode {
    /// Full-precision compute; tight ULP bound.
    Strict,
    /// Relaxed compute; wider ULP bound and subnormals may flush to zero.
    Relaxed,
}

impl PrecisionMode {
    pub const ALL: [PrecisionMode; 2] = [PrecisionMode::Strict, PrecisionMode::Relaxed];

    pub fn is_relaxed(self) -> bool {
        matches!(self, PrecisionMode::Relaxed)
    }
}

impl fmt::Display for PrecisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecisionMode::Strict => write!(f, "strict"),
            PrecisionMode::Relaxed => write!(f, "relaxed"),
        }
    }
}

/// Storage format of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecisionClass {
    /// IEEE 754 binary16.
    Half,
    /// IEEE 754 binary32.
    Single,
}

impl PrecisionClass {
    pub const ALL: [PrecisionClass; 2] = [PrecisionClass::Single, PrecisionClass::Half];

    /// Rounds `value` to the nearest value representable in this class.
    pub fn round(self, value: f64) -> f64 {
        match self {
            PrecisionClass::Half => f16::from_f64(value).to_f64(),
            PrecisionClass::Single => value as f32 as f64,
        }
    }

    /// Distance from `|value|` to the next representable magnitude above it.
    ///
    /// `value` is rounded to the class first. At the largest finite magnitude,
    /// and for infinities, the gap below the maximum is returned instead.
    /// NaN yields NaN.
    pub fn ulp(self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }

        match self {
            PrecisionClass::Half => {
                let a = f16::from_f64(value.abs());
                if !a.is_finite() || a == f16::MAX {
                    let below = f16::from_bits(f16::MAX.to_bits() - 1);
                    return f16::MAX.to_f64() - below.to_f64();
                }
                f16::from_bits(a.to_bits() + 1).to_f64() - a.to_f64()
            }
            PrecisionClass::Single => {
                let a = (value as f32).abs();
                if !a.is_finite() || a == f32::MAX {
                    let below = f32::from_bits(f32::MAX.to_bits() - 1);
                    return f32::MAX as f64 - below as f64;
                }
                f32::from_bits(a.to_bits() + 1) as f64 - a as f64
            }
        }
    }

    /// True when `value`, rounded to this class, is a nonzero subnormal.
    pub fn is_subnormal(self, value: f64) -> bool {
        match self {
            PrecisionClass::Half => {
                let h = f16::from_f64(value);
                h.is_finite() && !h.is_normal() && h.to_f64() != 0.0
            }
            PrecisionClass::Single => (value as f32).is_subnormal(),
        }
    }

    /// Type name used in check names, e.g. `Float3` or `Half`.
    pub fn type_name(self) -> &'static str {
        match self {
            PrecisionClass::Half => "Half",
            PrecisionClass::Single => "Float",
        }
    }
}

impl fmt::Display for PrecisionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecisionClass::Half => write!(f, "f16"),
            PrecisionClass::Single => write!(f, "f32"),
        }
    }
}
