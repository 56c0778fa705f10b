//! Clamp

use num_traits::Num;

/// Clamps a value x to [min, max].
///
/// * `x`   - The number to clamp.
/// * `min` - Minimum value.
/// * `max` - Maximum value.
pub fn clamp<T>(x: T, min: T, max: T) -> T
where
    T: Num + PartialOrd + Copy,
{
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// Interface for clamping sample values to the half open unit interval.
pub trait ClampUnit {
    /// Clamps the value to [0, 1 - ε] so it can be stored as a sample.
    fn clamp_unit(self) -> Self;
}

impl ClampUnit for f32 {
    #[inline(always)]
    fn clamp_unit(self) -> Self {
        clamp(self, 0.0, super::FLOAT_ONE_MINUS_EPSILON)
    }
}

impl ClampUnit for f64 {
    #[inline(always)]
    fn clamp_unit(self) -> Self {
        clamp(self, 0.0, super::DOUBLE_ONE_MINUS_EPSILON)
    }
}
