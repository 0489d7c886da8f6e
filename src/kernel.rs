//! Portable approximate ("native") arccosine kernel.
//!
//! This is the producer side of a verification pass: a fast, reduced-accuracy
//! `acos` that trades a few ULPs for speed, the way device math libraries
//! implement their native variants.
//!
//! # Method
//!
//! `acos(x) = π/2 - asin(x)`. `asin` is approximated on |x| < 0.5 by
//! `x + x·z·P(z)` with `z = x²`. For |x| ≥ 0.5 the half-angle identity
//! `asin(|x|) = π/2 - 2·asin(√((1-|x|)/2))` brings the argument back into
//! that range. Inputs outside [-1, 1] yield NaN.

use half::f16;
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::{ParallelSlice, ParallelSliceMut},
};

use crate::lanes::Lane;

// Coefficients of asin(x)/x - 1 as a polynomial in z = x^2.
// P(z) = c0 + c1*z + c2*z^2 + c3*z^3 + c4*z^4 + c5*z^5 + c6*z^6
#[allow(clippy::excessive_precision)]
const P0: f32 = 0.16666666666666666_f32;
#[allow(clippy::excessive_precision)]
const P1: f32 = 0.07500000000000000_f32;
#[allow(clippy::excessive_precision)]
const P2: f32 = 0.04464285714285714_f32;
#[allow(clippy::excessive_precision)]
const P3: f32 = 0.03038181818181818_f32;
#[allow(clippy::excessive_precision)]
const P4: f32 = 0.02237216981132075_f32;
#[allow(clippy::excessive_precision)]
const P5: f32 = 0.01735973154362416_f32;
#[allow(clippy::excessive_precision)]
const P6: f32 = 0.01339831339831340_f32;

/// Chunk size for the parallel variants.
pub const PAR_CHUNK: usize = 4096;

/// Approximate `asin(d)` for a single-precision lane.
#[inline(always)]
pub fn native_asin(d: f32) -> f32 {
    let abs_d = d.abs();
    if abs_d.is_nan() || abs_d > 1.0 {
        return f32::NAN;
    }

    let reduce = abs_d >= 0.5;
    let x = if reduce {
        ((1.0 - abs_d) / 2.0).sqrt()
    } else {
        abs_d
    };

    let x2 = x * x;

    // Horner's method
    let mut p = P6;
    p = p.mul_add(x2, P5);
    p = p.mul_add(x2, P4);
    p = p.mul_add(x2, P3);
    p = p.mul_add(x2, P2);
    p = p.mul_add(x2, P1);
    p = p.mul_add(x2, P0);

    // poly_result = x + x * x^2 * P(x^2)
    let poly_result = (p * x2).mul_add(x, x);

    let abs_res = if reduce {
        (-2.0f32).mul_add(poly_result, std::f32::consts::FRAC_PI_2)
    } else {
        poly_result
    };

    abs_res.copysign(d)
}

/// Approximate `acos(d)` for a single-precision lane.
#[inline(always)]
pub fn native_acos(d: f32) -> f32 {
    std::f32::consts::FRAC_PI_2 - native_asin(d)
}

/// Element-wise approximate arccosine over lane buffers.
///
/// Every physical slot is processed, padding included; the kernel has no
/// notion of vector width.
pub trait NativeAcos {
    type Output;

    fn native_acos(self) -> Self::Output;
    fn par_native_acos(self) -> Self::Output;
}

#[inline(always)]
fn lane_acos<T: Lane>(x: T) -> T {
    T::from_f64(native_acos(x.to_f64() as f32) as f64)
}

fn native_acos_slice<T: Lane>(a: &[T]) -> Vec<T> {
    a.iter().map(|&x| lane_acos(x)).collect()
}

fn parallel_native_acos_slice<T: Lane + Default>(a: &[T]) -> Vec<T> {
    let mut c = vec![T::default(); a.len()];

    c.par_chunks_mut(PAR_CHUNK)
        .zip(a.par_chunks(PAR_CHUNK))
        .for_each(|(c_chunk, a_chunk)| {
            for (out, &x) in c_chunk.iter_mut().zip(a_chunk) {
                *out = lane_acos(x);
            }
        });

    c
}

impl NativeAcos for &[f32] {
    type Output = Vec<f32>;

    #[inline(always)]
    fn native_acos(self) -> Self::Output {
        native_acos_slice(self)
    }

    #[inline(always)]
    fn par_native_acos(self) -> Self::Output {
        parallel_native_acos_slice(self)
    }
}

impl NativeAcos for &[f16] {
    type Output = Vec<f16>;

    #[inline(always)]
    fn native_acos(self) -> Self::Output {
        native_acos_slice(self)
    }

    #[inline(always)]
    fn par_native_acos(self) -> Self::Output {
        parallel_native_acos_slice(self)
    }
}
