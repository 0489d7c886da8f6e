//! Seeded random input buffers.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::lanes::{ElementWidth, Lane};

/// Value written to slots that carry no logical lane.
pub const PADDING_FILL: f64 = 42.0;

/// Builds a buffer of `groups` vector groups with uniform random lanes in
/// `[min, max]`, encoded as `T`.
///
/// The same `seed` always yields the same buffer. Padding slots of
/// three-wide groups are filled with [`PADDING_FILL`]. A degenerate or
/// non-finite range fills every lane with the lower bound.
pub fn random_buffer<T: Lane>(
    seed: u64,
    width: ElementWidth,
    groups: usize,
    min: f64,
    max: f64,
) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };

    let mut buffer = vec![T::from_f64(PADDING_FILL); groups * width.stride()];
    for group in 0..groups {
        for lane in 0..width.lanes() {
            let value = if lo < hi && (hi - lo).is_finite() {
                rng.random_range(lo..=hi)
            } else {
                lo
            };
            buffer[width.slot(group, lane)] = T::from_f64(value);
        }
    }

    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use half::f16;

    #[test]
    fn test_deterministic_for_seed() {
        let a: Vec<f32> = random_buffer(0x657f3d94, ElementWidth::Four, 64, -1.0, 1.0);
        let b: Vec<f32> = random_buffer(0x657f3d94, ElementWidth::Four, 64, -1.0, 1.0);
        let c: Vec<f32> = random_buffer(0xd87e02d8, ElementWidth::Four, 64, -1.0, 1.0);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_values_in_range() {
        let buffer: Vec<f16> = random_buffer(7, ElementWidth::Two, 500, -1.0, 1.0);
        assert_eq!(buffer.len(), 1000);
        assert!(buffer.iter().all(|h| (-1.0..=1.0).contains(&h.to_f64())));
    }

    #[test]
    fn test_three_wide_padding() {
        let buffer: Vec<f32> = random_buffer(11, ElementWidth::Three, 8, -1.0, 1.0);
        assert_eq!(buffer.len(), 32);
        for group in 0..8 {
            assert_eq!(buffer[group * 4 + 3], 42.0);
            assert!(buffer[group * 4..group * 4 + 3].iter().all(|x| x.abs() <= 1.0));
        }
    }

    #[test]
    fn test_swapped_and_degenerate_range() {
        let swapped: Vec<f32> = random_buffer(3, ElementWidth::Scalar, 100, 1.0, -1.0);
        assert!(swapped.iter().all(|x| x.abs() <= 1.0));

        let constant: Vec<f32> = random_buffer(3, ElementWidth::Scalar, 4, 0.25, 0.25);
        assert_eq!(constant, vec![0.25; 4]);
    }
}
