//! Acceptable-result intervals ("floaties").
//!
//! A [`Floaty`] is a center value plus a symmetric absolute bound. It is built
//! from a double-precision reference and answers whether an observed kernel
//! output [`could_be`](Floaty::could_be) correct.

use std::fmt;

use crate::config::VerifierConfig;
use crate::precision::{PrecisionClass, PrecisionMode};
use crate::reference::FunctionKind;

/// Interval of acceptable outputs for one reference evaluation.
///
/// A NaN center means the only acceptable observation is NaN. An infinite
/// center has a zero bound and accepts only that same infinity. All NaN
/// floaties compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Floaty {
    center: f64,
    bound: f64,
}

impl Floaty {
    /// Interval that accepts any NaN and nothing else.
    pub const NAN: Floaty = Floaty {
        center: f64::NAN,
        bound: 0.0,
    };

    /// Wraps `reference` into the interval allowed for `class` lanes under `mode`.
    ///
    /// The bound is the configured ULP allowance measured at the reference
    /// rounded to `class`, plus the rounding distance itself, so the correctly
    /// rounded value and its neighbours always fall inside.
    pub fn build(
        reference: f64,
        mode: PrecisionMode,
        class: PrecisionClass,
        config: &VerifierConfig,
    ) -> Floaty {
        if reference.is_nan() {
            return Floaty::NAN;
        }
        if reference.is_infinite() {
            return Floaty {
                center: reference,
                bound: 0.0,
            };
        }

        let rounded = class.round(reference);
        let ulps = config.ulp_allowance(mode, class);
        let mut bound = ulps * class.ulp(rounded) + (reference - rounded).abs();

        // Relaxed kernels may flush subnormal results to zero.
        if mode.is_relaxed() && class.is_subnormal(reference) {
            bound = bound.max(reference.abs());
        }

        Floaty {
            center: reference,
            bound,
        }
    }

    /// Evaluates `kind` at `input` and wraps the result.
    ///
    /// In relaxed mode a subnormal input may reach the kernel as zero, so the
    /// interval then also covers the result at zero.
    pub fn for_input(
        kind: FunctionKind,
        input: f64,
        mode: PrecisionMode,
        class: PrecisionClass,
        config: &VerifierConfig,
    ) -> Floaty {
        let expected = Floaty::build(kind.evaluate(input), mode, class, config);

        if mode.is_relaxed() && class.is_subnormal(input) {
            let flushed = Floaty::build(kind.evaluate(0.0), mode, class, config);
            return expected.union(&flushed);
        }

        expected
    }

    /// Smallest interval covering both `self` and `other`.
    ///
    /// NaN intervals are not merged; `self` is returned unchanged.
    pub fn union(&self, other: &Floaty) -> Floaty {
        if self.is_nan() || other.is_nan() || !self.center.is_finite() || !other.center.is_finite()
        {
            return *self;
        }

        let min = self.min().min(other.min());
        let max = self.max().max(other.max());
        let center = min + (max - min) / 2.0;

        Floaty {
            center,
            bound: (max - center).max(center - min),
        }
    }

    /// Returns true iff `|observed - center| <= bound + extra_tolerance`, or
    /// both the center and `observed` are NaN.
    pub fn could_be(&self, observed: f64, extra_tolerance: f64) -> bool {
        if self.center.is_nan() || observed.is_nan() {
            return self.center.is_nan() && observed.is_nan();
        }
        if self.center.is_infinite() {
            return observed == self.center;
        }

        (observed - self.center).abs() <= self.bound + extra_tolerance
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn bound(&self) -> f64 {
        self.bound
    }

    pub fn min(&self) -> f64 {
        self.center - self.bound
    }

    pub fn max(&self) -> f64 {
        self.center + self.bound
    }

    pub fn is_nan(&self) -> bool {
        self.center.is_nan()
    }
}

impl PartialEq for Floaty {
    fn eq(&self, other: &Self) -> bool {
        if self.is_nan() || other.is_nan() {
            return self.is_nan() && other.is_nan();
        }
        self.center == other.center && self.bound == other.bound
    }
}

impl fmt::Display for Floaty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nan() {
            return write!(f, "NaN");
        }
        write!(
            f,
            "{:.10} ({:.3e} either side, range {:.10} to {:.10})",
            self.center,
            self.bound,
            self.min(),
            self.max()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn strict_single(reference: f64) -> Floaty {
        Floaty::build(
            reference,
            PrecisionMode::Strict,
            PrecisionClass::Single,
            &VerifierConfig::default(),
        )
    }

    #[test]
    fn test_nan_reference() {
        let floaty = strict_single(f64::NAN);
        assert!(floaty.is_nan());
        assert!(floaty.could_be(f64::NAN, 0.0));
        assert!(floaty.could_be(f64::NAN, 1.0e9));
        assert!(!floaty.could_be(0.0, 1.0e9));
        assert!(!floaty.could_be(f64::INFINITY, 1.0e9));
    }

    #[test]
    fn test_nan_observation_against_finite_center() {
        let floaty = strict_single(1.0);
        assert!(!floaty.could_be(f64::NAN, 1.0e9));
    }

    #[test]
    fn test_infinite_reference() {
        let floaty = strict_single(f64::INFINITY);
        assert!(floaty.could_be(f64::INFINITY, 0.0));
        assert!(!floaty.could_be(f64::NEG_INFINITY, 0.0));
        assert!(!floaty.could_be(f64::MAX, 1.0));
    }

    #[test]
    fn test_infinite_observation_against_finite_center() {
        let floaty = strict_single(FRAC_PI_2);
        assert!(!floaty.could_be(f64::INFINITY, 0.0005));
        assert!(!floaty.could_be(f64::NEG_INFINITY, 0.0005));
    }

    #[test]
    fn test_bound_is_a_few_ulps() {
        let floaty = strict_single(FRAC_PI_2);
        let ulp = PrecisionClass::Single.ulp(FRAC_PI_2);
        assert!(floaty.bound() >= 4.0 * ulp);
        assert!(floaty.bound() < 5.0 * ulp);
    }

    #[test]
    fn test_contains_rounded_neighbours() {
        let floaty = strict_single(FRAC_PI_2);
        let rounded = FRAC_PI_2 as f32;
        let up = f32::from_bits(rounded.to_bits() + 1) as f64;
        let down = f32::from_bits(rounded.to_bits() - 1) as f64;

        assert!(floaty.could_be(rounded as f64, 0.0));
        assert!(floaty.could_be(up, 0.0));
        assert!(floaty.could_be(down, 0.0));
    }

    #[test]
    fn test_relaxed_accepts_flushed_subnormal() {
        let config = VerifierConfig::default();
        let tiny = 1.0e-40;

        let strict = Floaty::build(tiny, PrecisionMode::Strict, PrecisionClass::Single, &config);
        let relaxed = Floaty::build(tiny, PrecisionMode::Relaxed, PrecisionClass::Single, &config);

        assert!(!strict.could_be(0.0, 0.0));
        assert!(relaxed.could_be(0.0, 0.0));
    }

    #[test]
    fn test_union_covers_both() {
        let a = strict_single(1.0);
        let b = strict_single(2.0);
        let u = a.union(&b);

        assert!(u.min() <= a.min());
        assert!(u.max() >= b.max());
        assert!(u.could_be(1.0, 0.0));
        assert!(u.could_be(2.0, 0.0));
        assert!(u.could_be(1.5, 0.0));
    }

    #[test]
    fn test_union_keeps_nan() {
        let u = Floaty::NAN.union(&strict_single(1.0));
        assert!(u.is_nan());
    }

    #[test]
    fn test_nan_floaties_are_equal() {
        assert_eq!(Floaty::NAN, strict_single(f64::NAN));
        assert_ne!(Floaty::NAN, strict_single(0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Floaty::NAN.to_string(), "NaN");
        let text = strict_single(0.0).to_string();
        assert!(text.starts_with("0.0000000000"));
        assert!(text.contains("either side"));
    }
}
