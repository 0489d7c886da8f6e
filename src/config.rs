//! Tolerance configuration for verification passes.

use crate::error::{invalid_config, Result};
use crate::precision::{PrecisionClass, PrecisionMode};

/// ULP allowance for single-precision lanes in strict mode.
pub const STRICT_SINGLE_ULPS: f64 = 4.0;
/// ULP allowance for single-precision lanes in relaxed mode.
pub const RELAXED_SINGLE_ULPS: f64 = 128.0;
/// ULP allowance for half-precision lanes in strict mode.
pub const STRICT_HALF_ULPS: f64 = 3.0;
/// Relaxed compute does not loosen half-precision results.
pub const RELAXED_HALF_ULPS: f64 = 3.0;

/// Absolute slack layered on single-precision checks.
pub const SINGLE_EXTRA_TOLERANCE: f64 = 0.0005;
/// Absolute slack layered on half-precision checks (2^-11).
pub const HALF_EXTRA_TOLERANCE: f64 = 0.000_488_281_25;

/// ULP allowances and extra tolerances for every (mode, class) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerifierConfig {
    pub strict_single_ulps: f64,
    pub relaxed_single_ulps: f64,
    pub strict_half_ulps: f64,
    pub relaxed_half_ulps: f64,
    pub single_extra_tolerance: f64,
    pub half_extra_tolerance: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            strict_single_ulps: STRICT_SINGLE_ULPS,
            relaxed_single_ulps: RELAXED_SINGLE_ULPS,
            strict_half_ulps: STRICT_HALF_ULPS,
            relaxed_half_ulps: RELAXED_HALF_ULPS,
            single_extra_tolerance: SINGLE_EXTRA_TOLERANCE,
            half_extra_tolerance: HALF_EXTRA_TOLERANCE,
        }
    }
}

impl VerifierConfig {
    /// ULPs of the rounded reference accepted on either side of the center.
    pub fn ulp_allowance(&self, mode: PrecisionMode, class: PrecisionClass) -> f64 {
        match (mode, class) {
            (PrecisionMode::Strict, PrecisionClass::Single) => self.strict_single_ulps,
            (PrecisionMode::Relaxed, PrecisionClass::Single) => self.relaxed_single_ulps,
            (PrecisionMode::Strict, PrecisionClass::Half) => self.strict_half_ulps,
            (PrecisionMode::Relaxed, PrecisionClass::Half) => self.relaxed_half_ulps,
        }
    }

    /// Absolute slack for decode and quantization noise of `class` lanes.
    pub fn extra_tolerance(&self, class: PrecisionClass) -> f64 {
        match class {
            PrecisionClass::Half => self.half_extra_tolerance,
            PrecisionClass::Single => self.single_extra_tolerance,
        }
    }

    /// Checks that every tolerance is finite and non-negative, and that
    /// relaxed allowances never undercut strict ones.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("strict_single_ulps", self.strict_single_ulps),
            ("relaxed_single_ulps", self.relaxed_single_ulps),
            ("strict_half_ulps", self.strict_half_ulps),
            ("relaxed_half_ulps", self.relaxed_half_ulps),
            ("single_extra_tolerance", self.single_extra_tolerance),
            ("half_extra_tolerance", self.half_extra_tolerance),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid_config(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        for class in PrecisionClass::ALL {
            let strict = self.ulp_allowance(PrecisionMode::Strict, class);
            let relaxed = self.ulp_allowance(PrecisionMode::Relaxed, class);
            if relaxed < strict {
                return Err(invalid_config(format!(
                    "relaxed {class} allowance ({relaxed} ulps) is below strict ({strict} ulps)"
                )));
            }
        }

        Ok(())
    }
}
