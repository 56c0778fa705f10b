//! Halton Sequences

use super::radical_inverse::*;
use crate::pbrt::*;

/// Fills `r` with the `n`-th point of the Halton sequence built from `primes`,
/// rotated by `offset` and wrapped back into [0, 1).
///
/// Index 0 is the origin of every Halton sequence, so callers usually pass a
/// 1-based index.
///
/// * `primes` - One prime base per dimension.
/// * `offset` - Per dimension rotation (Cranley-Patterson) applied to the point.
/// * `n`      - Index of the point.
/// * `r`      - Output; must have the same length as `primes`.
pub fn halton(primes: &[u32], offset: &[f64], n: u64, r: &mut [f64]) {
    debug_assert_eq!(primes.len(), r.len());
    debug_assert_eq!(primes.len(), offset.len());

    for ((ri, &prime), &off) in r.iter_mut().zip(primes.iter()).zip(offset.iter()) {
        let v = radical_inverse(prime, n);
        *ri = if off == 0.0 { v } else { fract(v + off).clamp_unit() };
    }
}

/// Returns the `n`-th point of the 2-D Halton sequence.
///
/// * `primes` - Prime bases.
/// * `offset` - Per dimension rotation.
/// * `n`      - Index of the point.
pub fn halton_2d(primes: [u32; 2], offset: [f64; 2], n: u64) -> [f64; 2] {
    let mut r = [0.0; 2];
    halton(&primes, &offset, n, &mut r);
    r
}

/// Returns the `n`-th point of the 3-D Halton sequence.
///
/// * `primes` - Prime bases.
/// * `offset` - Per dimension rotation.
/// * `n`      - Index of the point.
pub fn halton_3d(primes: [u32; 3], offset: [f64; 3], n: u64) -> [f64; 3] {
    let mut r = [0.0; 3];
    halton(&primes, &offset, n, &mut r);
    r
}

/// A Halton sequence over a fixed set of prime bases. Sample `i` maps to the
/// sequence point `i * leap + 1`, so sample 0 never lands on the origin and
/// sequences sharing primes but using different leaps stay decorrelated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HaltonSequence<const N: usize> {
    /// Prime base for each dimension.
    pub primes: [u32; N],

    /// Per dimension rotation.
    pub offset: [f64; N],

    /// Stride between consecutive samples in the underlying sequence.
    pub leap: u64,
}

impl<const N: usize> HaltonSequence<N> {
    /// Create a new `HaltonSequence` without rotation or leap.
    ///
    /// * `primes` - Prime base for each dimension.
    pub fn new(primes: [u32; N]) -> Self {
        Self {
            primes,
            offset: [0.0; N],
            leap: 1,
        }
    }

    /// Returns a copy of the sequence that skips `leap - 1` points between
    /// consecutive samples.
    ///
    /// * `leap` - The stride; should be coprime with every base.
    pub fn leaped(self, leap: u64) -> Self {
        debug_assert!(leap > 0);
        Self { leap, ..self }
    }

    /// Returns a copy of the sequence rotated by `offset`.
    ///
    /// * `offset` - Per dimension rotation.
    pub fn with_offset(self, offset: [f64; N]) -> Self {
        Self { offset, ..self }
    }

    /// Returns the sequence index used for a 0-based sample.
    ///
    /// * `sample` - The 0-based sample index.
    #[inline]
    pub fn sequence_index(&self, sample: u64) -> u64 {
        sample.wrapping_mul(self.leap).wrapping_add(1)
    }

    /// Returns the point for a 0-based sample.
    ///
    /// * `sample` - The 0-based sample index.
    pub fn sample(&self, sample: u64) -> [f64; N] {
        let mut r = [0.0; N];
        halton(&self.primes, &self.offset, self.sequence_index(sample), &mut r);
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn first_points_2_3() {
        let seq = HaltonSequence::new([2, 3]);
        assert_eq!(seq.sample(0)[0], 0.5);
        assert!(approx_eq!(f64, seq.sample(0)[1], 1.0 / 3.0, ulps = 4));
        assert_eq!(seq.sample(1)[0], 0.25);
        assert!(approx_eq!(f64, seq.sample(1)[1], 2.0 / 3.0, ulps = 4));
    }

    #[test]
    fn leap_skips_points() {
        let plain = HaltonSequence::new([5, 7, 11]);
        let leaped = plain.leaped(13);
        assert_eq!(leaped.sample(0), plain.sample(0));
        assert_eq!(leaped.sample(1), plain.sample(13));
        assert_eq!(leaped.sample(2), plain.sample(26));
    }

    #[test]
    fn offset_wraps() {
        let r = halton_2d([2, 3], [0.5, 2.0 / 3.0], 1);
        // 0.5 + 0.5 wraps to 0.
        assert_eq!(r[0], 0.0);
        assert!(approx_eq!(f64, r[1], 0.0, epsilon = 1e-12) || approx_eq!(f64, r[1], 1.0, epsilon = 1e-12));
    }

    #[test]
    fn free_functions_match_sequence() {
        let seq = HaltonSequence::new([2, 3, 5]);
        assert_eq!(halton_3d([2, 3, 5], [0.0; 3], 10), seq.sample(9));
    }

    proptest! {
        #[test]
        fn points_in_unit_interval(n in 0..1_000_000u64, o0 in 0.0..1.0f64, o1 in 0.0..1.0f64, o2 in 0.0..1.0f64) {
            let seq = HaltonSequence::new([5, 7, 3]).with_offset([o0, o1, o2]);
            for v in seq.sample(n).iter() {
                prop_assert!((0.0..1.0).contains(v));
            }
        }

        #[test]
        fn deterministic(n in 0..1_000_000u64) {
            let seq = HaltonSequence::new([2, 3]).leaped(5);
            prop_assert_eq!(seq.sample(n), seq.sample(n));
        }
    }
}
