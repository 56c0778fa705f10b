//! Depth of field web pattern.
//!
//! Lens samples are laid out on concentric rings around a centre sample.
//! Ring `r` holds `r * density` samples, so a web of `n` rings holds
//! `((n² + n) / 2) * density + 1` samples in total.
//!
//! Samples are visited in ascending ring order with a fixed offset rather than
//! following a low discrepancy sequence. This guarantees no lens position is
//! visited twice within a short run, which converges faster during preview, at
//! the cost of weaker long run discrepancy.

use core::pbrt::*;

/// Number of samples in the first ring of jittered depth of field.
pub const DOF_WEB_DENSITY: u64 = 6;

/// Ring count used when the sample count is unbounded, so the jitter converges.
pub const DOF_INFINITE_RING_COUNT: u64 = 6;

/// Returns the total number of samples in a web with `ring_count` rings.
///
/// * `density`    - Samples in the first ring.
/// * `ring_count` - Number of rings around the centre.
pub fn web_sample_count(density: u64, ring_count: u64) -> u64 {
    ((ring_count * ring_count + ring_count) / 2) * density + 1
}

/// Returns the smallest ring count whose web holds at least `sample_count`
/// samples. Inverse of `web_sample_count()`.
///
/// * `density`      - Samples in the first ring.
/// * `sample_count` - Number of samples to cover.
pub fn web_ring_count(density: u64, sample_count: u64) -> u64 {
    let x = 2.0 * (sample_count as Float - 1.0) / density as Float;
    // Positive root of n² + n - x = 0.
    let discriminant = 1.0 + 4.0 * x;
    let rings = (0.5 * (safe_sqrt(discriminant) - 1.0)).ceil();
    max(rings, 0.0) as u64
}

/// Returns the polar lens position `(radius, angle)` for a sample.
///
/// Radius is in [0, 1] and angle in [0, 2π). A ring count of 0 disables the
/// pattern and always returns `(0, 0)`.
///
/// * `sample`           - 1-based sample index.
/// * `ring_count`       - Number of rings of the web.
/// * `dof_sample_count` - Total samples of the web.
/// * `density`          - Samples in the first ring.
pub fn dof_web_sample(sample: u64, ring_count: u64, dof_sample_count: u64, density: u64) -> (Float, Float) {
    if ring_count == 0 {
        return (0.0, 0.0);
    }
    debug_assert!(dof_sample_count > 0);

    let s = (sample.saturating_sub(1) * (density - 1)) % dof_sample_count;

    let mut ring = 0_u64;
    let mut ring_sample_count = 1_u64;
    let mut ring_sample = 0_u64;
    let mut samples_passed = 1_u64;
    while s >= samples_passed {
        ring += 1;
        ring_sample_count = ring * density;
        ring_sample = (s - samples_passed + 1) % ring_sample_count;
        samples_passed += ring_sample_count;
    }

    let radius = ring as Float / ring_count as Float;
    let theta = TWO_PI * ring_sample as Float / ring_sample_count as Float;
    (radius, theta)
}
