//! Radical Inverse

use crate::pbrt::*;

/// Returns the radical inverse of `a` in the given base, i.e. the digits of
/// `a` mirrored about the radix point. The result lies in [0, 1).
///
/// * `base` - The base; must be >= 2.
/// * `a`    - The integer to invert.
pub fn radical_inverse(base: u32, a: u64) -> f64 {
    debug_assert!(base >= 2, "radical inverse base must be >= 2");

    if base == 2 {
        // 0x1p-64
        return (a.reverse_bits() as f64 * hexf64!("0x1p-64")).clamp_unit();
    }

    let base = base as u64;
    let inv_base = 1.0 / base as f64;
    let mut reversed_digits = 0_u64;
    let mut inv_base_n = 1.0_f64;
    let mut a = a;
    while a != 0 {
        let next = a / base;
        let digit = a - next * base;
        reversed_digits = reversed_digits * base + digit;
        inv_base_n *= inv_base;
        a = next;
    }

    (reversed_digits as f64 * inv_base_n).clamp_unit()
}
