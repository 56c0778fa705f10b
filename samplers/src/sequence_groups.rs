//! Descriptor table of the Halton groups that fill the dimension buffer.
//!
//! Groups that share prime bases use a different leap or index fold so that
//! no two groups read the same sequence point. Some groups write the same raw
//! value into several semantically distinct dimensions; renders depend on this
//! exact layout, so it is kept as is.

use crate::dimension::SamplingDimension::{self, *};
use crate::dimension::*;
use crate::settings::InteractiveSettings;
use core::low_discrepancy::*;
use core::pbrt::*;

/// How a group derives its sample index from the controller state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IndexFold {
    /// Use the sample index unchanged.
    None,

    /// Repeat the index for every up-scaled pixel and loop over the
    /// interactive anti-aliasing bucket.
    Filter,

    /// Loop over the interactive raytrace bucket.
    Raytrace,

    /// Loop over the interactive volume bucket.
    Volume,
}

/// State a group needs to compute its sample index.
#[derive(Copy, Clone, Debug)]
pub struct IndexContext {
    /// Current 0-based sample index.
    pub sample: u64,

    /// Interactive looping is active.
    pub interactive_mode: bool,

    /// Film up-scaling factor (>= 1).
    pub scaling_factor: u64,

    /// Interactive bucket sizes.
    pub interactive: InteractiveSettings,
}

impl IndexFold {
    /// Returns the 0-based index a group samples its sequence at.
    ///
    /// * `ctx` - Controller state.
    pub fn apply(self, ctx: &IndexContext) -> u64 {
        match self {
            Self::None => ctx.sample,
            Self::Filter => {
                let sample = ctx.sample / square(max(1, ctx.scaling_factor));
                if ctx.interactive_mode {
                    sample % ctx.interactive.sample_aa
                } else {
                    sample
                }
            }
            Self::Raytrace if ctx.interactive_mode => ctx.sample % ctx.interactive.sample_raytrace,
            Self::Volume if ctx.interactive_mode => ctx.sample % ctx.interactive.sample_volume,
            Self::Raytrace | Self::Volume => ctx.sample,
        }
    }
}

/// Destination of one component of a group's Halton point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DimensionOutput {
    /// Buffer slot.
    pub dimension: SamplingDimension,

    /// Component of the Halton point.
    pub component: usize,

    /// Offset added before wrapping to [0, 1). A non-zero offset moves the
    /// first sample to the structural centre of the pattern.
    pub offset: f64,
}

/// Shorthand constructor used by the table.
const fn out(dimension: SamplingDimension, component: usize, offset: f64) -> DimensionOutput {
    DimensionOutput {
        dimension,
        component,
        offset,
    }
}

/// A Halton generation group.
#[derive(Copy, Clone, Debug)]
pub struct SequenceGroup {
    /// Prime bases; the group dimension is the slice length (2 or 3).
    pub primes: &'static [u32],

    /// Index transform applied before leaping.
    pub fold: IndexFold,

    /// Leap stride.
    pub leap: u64,

    /// Buffer slots written by the group.
    pub outputs: &'static [DimensionOutput],
}

const HALF: f64 = 1.0 / 2.0;
const TWO_THIRDS: f64 = 2.0 / 3.0;
const FOUR_FIFTHS: f64 = 4.0 / 5.0;

/// The groups in evaluation order.
pub static SEQUENCE_GROUPS: [SequenceGroup; 6] = [
    // Primes 2, 3 as in temporal anti-aliasing. The filter offset makes the
    // first sample land on the pixel centre.
    SequenceGroup {
        primes: &[2, 3],
        fold: IndexFold::Filter,
        leap: 1,
        outputs: &[
            out(FilterU, 0, HALF),
            out(FilterV, 1, TWO_THIRDS),
            out(Time, 0, 0.0),
            out(Closure, 1, 0.0),
            out(RaytraceX, 0, 0.0),
        ],
    },
    SequenceGroup {
        primes: &[5, 7, 3],
        fold: IndexFold::None,
        leap: 1,
        outputs: &[
            out(LensU, 0, 0.0),
            out(LensV, 1, 0.0),
            out(LightProbe, 0, 0.0),
            out(Transparency, 1, 0.0),
            out(AoU, 0, 0.0),
            out(AoV, 1, 0.0),
            out(AoW, 2, 0.0),
            out(CurvesU, 0, 0.0),
        ],
    },
    // Leaped so the primes of the lens group can be reused.
    SequenceGroup {
        primes: &[5, 7, 11],
        fold: IndexFold::Raytrace,
        leap: 13,
        outputs: &[
            out(ShadowU, 0, 0.0),
            out(ShadowV, 1, 0.0),
            out(ShadowW, 2, 0.0),
            out(RaytraceU, 0, 0.0),
            out(RaytraceV, 1, 0.0),
            out(RaytraceW, 2, 0.0),
        ],
    },
    SequenceGroup {
        primes: &[2, 3, 5],
        fold: IndexFold::None,
        leap: 1,
        outputs: &[
            out(ShadowI, 0, HALF),
            out(ShadowJ, 1, TWO_THIRDS),
            out(ShadowK, 2, FOUR_FIFTHS),
        ],
    },
    SequenceGroup {
        primes: &[2, 3, 5],
        fold: IndexFold::Volume,
        leap: 1,
        outputs: &[
            out(VolumeU, 0, HALF),
            out(VolumeV, 1, TWO_THIRDS),
            out(VolumeW, 2, FOUR_FIFTHS),
        ],
    },
    SequenceGroup {
        primes: &[2, 3],
        fold: IndexFold::None,
        leap: 5,
        outputs: &[
            out(ShadowX, 0, 0.0),
            out(ShadowY, 1, 0.0),
            out(SssU, 0, 0.0),
            out(SssV, 1, 0.0),
        ],
    },
];

/// Slots that no group writes; always 0.
pub const UNUSED_DIMENSIONS: [SamplingDimension; 3] = [Unused0, Unused1, Unused2];

impl SequenceGroup {
    /// Returns the raw Halton point for the group, components past the group
    /// dimension are 0.
    ///
    /// * `ctx` - Controller state.
    pub fn point(&self, ctx: &IndexContext) -> [f64; 3] {
        let n = self.fold.apply(ctx).wrapping_mul(self.leap).wrapping_add(1);
        let mut r = [0.0; 3];
        let offset = [0.0; 3];
        let dims = self.primes.len();
        halton(self.primes, &offset[..dims], n, &mut r[..dims]);
        r
    }

    /// Writes the group's outputs into the buffer.
    ///
    /// * `ctx`  - Controller state.
    /// * `data` - The dimension buffer.
    pub fn fill(&self, ctx: &IndexContext, data: &mut SamplingData) {
        let r = self.point(ctx);
        for o in self.outputs {
            let v = r[o.component];
            let v = if o.offset == 0.0 { v } else { fract(v + o.offset) };
            data.set(o.dimension, (v as Float).clamp_unit());
        }
    }
}
