//! Double-precision reference evaluation.

use std::fmt;

use num::Float;

/// Inverse cosine honoring the [-1, 1] domain.
///
/// NaN and out-of-domain inputs (including infinities) yield NaN. Within the
/// domain the result lies in [0, π] and is non-increasing in `x`.
#[inline]
pub fn acos<T: Float>(x: T) -> T {
    if x.is_nan() || x.abs() > T::one() {
        return T::nan();
    }
    x.acos()
}

/// Transcendental function being verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Acos,
}

impl FunctionKind {
    /// Mathematically correct result of the function at `x`, in `f64`.
    #[inline]
    pub fn evaluate(self, x: f64) -> f64 {
        match self {
            FunctionKind::Acos => acos(x),
        }
    }

    /// Closed interval of inputs with a non-NaN result.
    pub fn domain(self) -> (f64, f64) {
        match self {
            FunctionKind::Acos => (-1.0, 1.0),
        }
    }

    /// Camel-case name used in check names.
    pub fn name(self) -> &'static str {
        match self {
            FunctionKind::Acos => "Acos",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKind::Acos => write!(f, "acos"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_known_values() {
        assert_eq!(FunctionKind::Acos.evaluate(1.0), 0.0);
        assert_eq!(FunctionKind::Acos.evaluate(-1.0), PI);
        assert_eq!(FunctionKind::Acos.evaluate(0.0), FRAC_PI_2);
        assert!((FunctionKind::Acos.evaluate(0.5) - PI / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_out_of_domain_is_nan() {
        for x in [2.0, -1.000_000_1, 42.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(FunctionKind::Acos.evaluate(x).is_nan(), "acos({x}) should be NaN");
        }
    }

    #[test]
    fn test_generic_over_f32() {
        assert_eq!(acos(1.0f32), 0.0);
        assert!(acos(1.5f32).is_nan());
    }

    #[test]
    fn test_domain() {
        assert_eq!(FunctionKind::Acos.domain(), (-1.0, 1.0));
    }
}
