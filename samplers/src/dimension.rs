//! Sampling dimensions and the per-sample dimension buffer.

use core::geometry::*;
use core::pbrt::*;
use std::ops::Index;

/// Number of named sampling dimensions.
pub const SAMPLING_DIMENSION_COUNT: usize = 32;

/// Named slots of the dimension buffer. The discriminant is the slot index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum SamplingDimension {
    FilterU = 0,
    FilterV = 1,
    LensU = 2,
    LensV = 3,
    Time = 4,
    ShadowU = 5,
    ShadowV = 6,
    ShadowW = 7,
    ShadowX = 8,
    ShadowY = 9,
    Closure = 10,
    LightProbe = 11,
    Transparency = 12,
    SssU = 13,
    SssV = 14,
    RaytraceU = 15,
    RaytraceV = 16,
    RaytraceW = 17,
    RaytraceX = 18,
    AoU = 19,
    AoV = 20,
    CurvesU = 21,
    VolumeU = 22,
    VolumeV = 23,
    VolumeW = 24,
    ShadowI = 25,
    ShadowJ = 26,
    ShadowK = 27,
    Unused0 = 28,
    Unused1 = 29,
    Unused2 = 30,
    AoW = 31,
}

impl SamplingDimension {
    /// All dimensions in slot order.
    pub const ALL: [SamplingDimension; SAMPLING_DIMENSION_COUNT] = [
        Self::FilterU,
        Self::FilterV,
        Self::LensU,
        Self::LensV,
        Self::Time,
        Self::ShadowU,
        Self::ShadowV,
        Self::ShadowW,
        Self::ShadowX,
        Self::ShadowY,
        Self::Closure,
        Self::LightProbe,
        Self::Transparency,
        Self::SssU,
        Self::SssV,
        Self::RaytraceU,
        Self::RaytraceV,
        Self::RaytraceW,
        Self::RaytraceX,
        Self::AoU,
        Self::AoV,
        Self::CurvesU,
        Self::VolumeU,
        Self::VolumeV,
        Self::VolumeW,
        Self::ShadowI,
        Self::ShadowJ,
        Self::ShadowK,
        Self::Unused0,
        Self::Unused1,
        Self::Unused2,
        Self::AoW,
    ];

    /// Returns the slot index of the dimension.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl From<SamplingDimension> for usize {
    fn from(dim: SamplingDimension) -> Self {
        dim.index()
    }
}

/// The dimension buffer published once per sample, plus the "updated" signal
/// readers poll.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplingData {
    /// One value in [0, 1) per dimension.
    dimensions: [Float; SAMPLING_DIMENSION_COUNT],

    /// Set when a new sample has been published and not yet consumed.
    updated: bool,
}

impl Default for SamplingData {
    fn default() -> Self {
        Self {
            dimensions: [0.0; SAMPLING_DIMENSION_COUNT],
            updated: false,
        }
    }
}

impl SamplingData {
    /// Returns the value of a dimension.
    ///
    /// * `dim` - The dimension.
    #[inline]
    pub fn get(&self, dim: SamplingDimension) -> Float {
        self.dimensions[dim.index()]
    }

    /// Sets the value of a dimension.
    ///
    /// * `dim`   - The dimension.
    /// * `value` - Value in [0, 1).
    #[inline]
    pub(crate) fn set(&mut self, dim: SamplingDimension, value: Float) {
        self.dimensions[dim.index()] = value;
    }

    /// Returns two consecutive dimensions. `starting_dim` must not be the
    /// last slot.
    ///
    /// * `starting_dim` - The first dimension.
    pub fn get_2d(&self, starting_dim: SamplingDimension) -> Point2f {
        let i = starting_dim.index();
        assert!(
            i + 1 < SAMPLING_DIMENSION_COUNT,
            "no 2D sample starts at {:?}",
            starting_dim
        );
        Point2f::new(self.dimensions[i], self.dimensions[i + 1])
    }

    /// Returns three consecutive dimensions. `starting_dim` must not be one
    /// of the last two slots.
    ///
    /// * `starting_dim` - The first dimension.
    pub fn get_3d(&self, starting_dim: SamplingDimension) -> Vector3f {
        let i = starting_dim.index();
        assert!(
            i + 2 < SAMPLING_DIMENSION_COUNT,
            "no 3D sample starts at {:?}",
            starting_dim
        );
        Vector3f::new(self.dimensions[i], self.dimensions[i + 1], self.dimensions[i + 2])
    }

    /// Returns all dimensions in slot order.
    pub fn as_slice(&self) -> &[Float] {
        &self.dimensions
    }

    /// Marks the buffer as published.
    pub(crate) fn push_update(&mut self) {
        self.updated = true;
    }

    /// Returns true if a published buffer has not been consumed yet.
    pub fn is_updated(&self) -> bool {
        self.updated
    }

    /// Consumes the "updated" signal. Returns whether it was set.
    pub fn take_update(&mut self) -> bool {
        std::mem::replace(&mut self.updated, false)
    }
}

impl Index<SamplingDimension> for SamplingData {
    type Output = Float;

    fn index(&self, dim: SamplingDimension) -> &Self::Output {
        &self.dimensions[dim.index()]
    }
}
