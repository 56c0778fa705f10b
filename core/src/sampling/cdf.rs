//! Cumulative distribution functions built from response curves.

use crate::pbrt::*;

/// Probabilities closer than this to 0 or 1 are clamped when inverting a CDF.
const CDF_INVERT_EPSILON: Float = 1e-5;

/// Interface to an externally owned response curve.
pub trait CurveMapping {
    /// Evaluates the curve.
    ///
    /// * `channel` - Curve channel to evaluate.
    /// * `x`       - Position along the curve in [0, 1].
    fn evaluate(&self, channel: usize, x: Float) -> Float;
}

impl<F> CurveMapping for F
where
    F: Fn(usize, Float) -> Float,
{
    fn evaluate(&self, channel: usize, x: Float) -> Float {
        self(channel, x)
    }
}

/// Discretizes a curve into a normalized CDF with `size` bins. Bin 0 is 0, the
/// last bin is exactly 1.
///
/// * `curve` - The response curve; only channel 0 is used.
/// * `size`  - Number of bins; must be > 1.
pub fn cdf_from_curve_mapping<C: CurveMapping + ?Sized>(curve: &C, size: usize) -> Vec<Float> {
    assert!(size > 1, "CDF needs at least 2 bins, got {}", size);

    let mut cdf = vec![0.0; size];
    let inv_last = 1.0 / (size - 1) as Float;
    for u in 0..size - 1 {
        let x = (u + 1) as Float * inv_last;
        cdf[u + 1] = cdf[u] + curve.evaluate(0, x);
    }

    // Normalize.
    let total = cdf[size - 1];
    for v in cdf.iter_mut() {
        *v /= total;
    }

    // Guard against drift.
    cdf[size - 1] = 1.0;
    cdf
}

/// Returns a table of `size` entries mapping a uniform probability to the
/// normalized position where `cdf` reaches it.
///
/// * `cdf`  - A CDF starting at exactly 0 and ending at exactly 1.
/// * `size` - Number of entries in the inverted table; must be > 1.
pub fn cdf_invert(cdf: &[Float], size: usize) -> Vec<Float> {
    assert!(
        cdf.len() > 1 && cdf[0] == 0.0 && cdf[cdf.len() - 1] == 1.0,
        "malformed CDF"
    );
    assert!(size > 1);

    let last = (cdf.len() - 1) as Float;
    let inv_size = 1.0 / (size - 1) as Float;
    let mut inverted = vec![0.0; size];
    for (u, inv) in inverted.iter_mut().enumerate() {
        let x = clamp(u as Float * inv_size, CDF_INVERT_EPSILON, 1.0 - CDF_INVERT_EPSILON);
        if let Some(i) = (1..cdf.len()).find(|&i| cdf[i] >= x) {
            let t = (x - cdf[i]) / (cdf[i] - cdf[i - 1]);
            *inv = (i as Float + t) / last;
        }
    }
    inverted
}

/// An inverted CDF table supporting constant time importance sampling.
#[derive(Clone, Debug, PartialEq)]
pub struct InverseCdf {
    /// Inverted CDF values.
    table: Vec<Float>,
}

impl InverseCdf {
    /// Builds the inverted table for a response curve.
    ///
    /// * `curve`      - The response curve.
    /// * `cdf_size`   - Number of bins used to discretize the curve.
    /// * `table_size` - Number of entries in the inverted table.
    pub fn from_curve_mapping<C: CurveMapping + ?Sized>(curve: &C, cdf_size: usize, table_size: usize) -> Self {
        let cdf = cdf_from_curve_mapping(curve, cdf_size);
        Self::from(cdf_invert(&cdf, table_size))
    }

    /// Returns the inverted table.
    pub fn table(&self) -> &[Float] {
        &self.table
    }

    /// Maps a uniform sample to a value distributed like the source curve by
    /// linearly interpolating the table.
    ///
    /// * `u` - The uniform sample in [0, 1].
    pub fn sample(&self, u: Float) -> Float {
        let last = self.table.len() - 1;
        let pos = clamp(u, 0.0, 1.0) * last as Float;
        let i = min(pos as usize, last - 1);
        lerp(pos - i as Float, self.table[i], self.table[i + 1])
    }
}

impl From<Vec<Float>> for InverseCdf {
    /// Wraps an already inverted table.
    ///
    /// * `table` - The table; needs at least 2 entries.
    fn from(table: Vec<Float>) -> Self {
        assert!(table.len() > 1, "inverse CDF table needs at least 2 entries");
        Self { table }
    }
}
