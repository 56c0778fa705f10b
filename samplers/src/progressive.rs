//! Progressive sampling state.
//!
//! `Sampling` is owned by one render session. The session configures it once
//! per synchronization pass with `init()` (or `init_bake()`), calls
//! `end_sync()` when the pass is over and `step()` once per render sample.
//! Each step publishes a fully written `SamplingData` that every pipeline stage
//! reads for that sample; readers copy what they need before the next step.

use crate::dimension::*;
use crate::dof_web::*;
use crate::planner::*;
use crate::sequence_groups::*;
use crate::settings::*;
use core::geometry::*;
use core::pbrt::*;

/// Sample count, sample index and dimension buffer of a render session.
#[derive(Clone, Debug)]
pub struct Sampling {
    /// How the session is rendered.
    mode: RenderMode,

    /// Interactive bucket sizes.
    interactive: InteractiveSettings,

    /// Temporal reprojection enabled in the scene.
    taa_reprojection: bool,

    /// 0 based current sample. Might not increase sequentially in the viewport.
    sample: u64,

    /// Target sample count.
    sample_count: u64,

    /// Rings of the depth of field web.
    dof_ring_count: u64,

    /// Samples in the depth of field web.
    dof_sample_count: u64,

    /// Motion blur time steps.
    motion_blur_steps: u64,

    /// Samples since the last reset. Always increases sequentially.
    viewport_sample: u64,

    /// Reset requested for the next synchronization.
    reset: bool,

    /// Image stability is prioritized over quality while set.
    interactive_mode: bool,

    /// Radiance clamps.
    clamp_data: ClampData,

    /// Published dimension buffer.
    data: SamplingData,
}

impl Sampling {
    /// Create a new `Sampling` with the default interactive bucket sizes.
    ///
    /// * `mode` - How the session is rendered.
    pub fn new(mode: RenderMode) -> Self {
        Self::with_interactive_settings(mode, InteractiveSettings::default())
    }

    /// Create a new `Sampling`.
    ///
    /// * `mode`        - How the session is rendered.
    /// * `interactive` - Interactive bucket sizes.
    pub fn with_interactive_settings(mode: RenderMode, interactive: InteractiveSettings) -> Self {
        assert!(
            interactive.is_valid(),
            "interactive sample counts must be at least 1: {:?}",
            interactive
        );

        Self {
            mode,
            interactive,
            taa_reprojection: true,
            sample: 0,
            sample_count: 64,
            dof_ring_count: 0,
            dof_sample_count: 1,
            motion_blur_steps: 1,
            viewport_sample: 0,
            reset: false,
            interactive_mode: false,
            clamp_data: ClampData::default(),
            data: SamplingData::default(),
        }
    }

    /// Plans the samples of a synchronization pass.
    ///
    /// * `scene` - Scene settings.
    /// * `world` - World lighting, for the sun clamp.
    pub fn init(&mut self, scene: &SceneSamplingSettings, world: &dyn WorldLighting) {
        let plan = SamplePlan::new(scene, self.mode, world.sun_threshold());

        self.sample_count = plan.sample_count;
        self.motion_blur_steps = plan.motion_blur_steps;
        self.dof_ring_count = plan.dof_ring_count;
        self.dof_sample_count = plan.dof_sample_count;
        self.clamp_data = plan.clamp;
        self.taa_reprojection = scene.taa_reprojection;
    }

    /// Plans the samples of a light probe bake and restarts the sequence.
    ///
    /// * `probe` - The light probe being baked.
    pub fn init_bake(&mut self, probe: &dyn LightProbe) {
        assert!(self.mode.is_baking(), "init_bake() outside of a baking session");

        self.sample_count = max(1, probe.grid_bake_samples()) as u64;
        self.sample = 0;

        // Bakes have no depth of field or motion blur.
        self.motion_blur_steps = 1;
        self.dof_ring_count = 0;
        self.dof_sample_count = 1;
        debug!("Planned {} bake samples", self.sample_count);
    }

    /// Finishes a synchronization pass: applies a pending reset and decides
    /// whether the viewport loops over its first samples.
    pub fn end_sync(&mut self) {
        if self.reset {
            debug!("Sampling reset after {} viewport samples", self.viewport_sample);
            self.viewport_sample = 0;
        }

        if !self.mode.is_viewport() {
            return;
        }

        self.interactive_mode = self.viewport_sample < self.interactive.mode_threshold;

        let interactive_mode_disabled = !self.taa_reprojection || self.mode.is_viewport_image_render();
        if interactive_mode_disabled {
            self.interactive_mode = false;
            self.sample = self.viewport_sample;
        } else if self.interactive_mode {
            let interactive_sample_count = self.interactive.sample_max;
            if self.viewport_sample < interactive_sample_count {
                // Loop over the same starting samples.
                self.sample %= interactive_sample_count;
            } else {
                // Break out of the loop and resume the normal pattern.
                self.sample = interactive_sample_count;
            }
        }
    }

    /// Fills and publishes the dimension buffer for the current sample, then
    /// advances to the next one.
    ///
    /// * `scaling_factor` - Current film up-scaling factor.
    pub fn step(&mut self, scaling_factor: u64) {
        let ctx = IndexContext {
            sample: self.sample,
            interactive_mode: self.interactive_mode,
            scaling_factor,
            interactive: self.interactive,
        };

        for group in SEQUENCE_GROUPS.iter() {
            group.fill(&ctx, &mut self.data);
        }
        for dim in UNUSED_DIMENSIONS {
            self.data.set(dim, 0.0);
        }

        // These values are often fed to `sqrt`.
        for (i, v) in self.data.as_slice().iter().enumerate() {
            debug_assert!(
                (0.0..1.0).contains(v),
                "dimension {:?} out of range: {}",
                SamplingDimension::ALL[i],
                v
            );
        }

        self.data.push_update();
        trace!("Published sample {} (viewport sample {})", self.sample, self.viewport_sample);

        self.viewport_sample += 1;
        self.sample += 1;

        self.reset = false;
    }

    /// Requests a viewport reset at the next synchronization.
    pub fn reset(&mut self) {
        assert!(self.mode.is_viewport(), "reset() outside of the viewport");
        self.reset = true;
    }

    /// Returns true if a reset is pending.
    pub fn is_reset(&self) -> bool {
        assert!(self.mode.is_viewport(), "is_reset() outside of the viewport");
        self.reset
    }

    /// Returns the polar lens position `(radius, angle)` of the current sample
    /// on the depth of field web.
    pub fn dof_disk_sample_get(&self) -> (Float, Float) {
        dof_web_sample(self.sample, self.dof_ring_count, self.dof_sample_count, DOF_WEB_DENSITY)
    }

    /// Returns true when `sample_index` starts a new motion blur step.
    pub fn do_render_sync(&self) -> bool {
        self.sample % (self.sample_count / self.motion_blur_steps) == 0
    }

    /// Returns true once every planned sample has been rendered.
    pub fn finished(&self) -> bool {
        self.sample >= self.sample_count
    }

    /// Returns true once the viewport has converged.
    pub fn finished_viewport(&self) -> bool {
        self.viewport_sample >= self.sample_count && !self.interactive_mode
    }

    /// Returns the value of one dimension of the published sample.
    ///
    /// * `dim` - The dimension.
    pub fn rng_get(&self, dim: SamplingDimension) -> Float {
        self.data.get(dim)
    }

    /// Returns two consecutive dimensions of the published sample.
    ///
    /// * `starting_dim` - The first dimension.
    pub fn rng_2d_get(&self, starting_dim: SamplingDimension) -> Point2f {
        self.data.get_2d(starting_dim)
    }

    /// Returns three consecutive dimensions of the published sample.
    ///
    /// * `starting_dim` - The first dimension.
    pub fn rng_3d_get(&self, starting_dim: SamplingDimension) -> Vector3f {
        self.data.get_3d(starting_dim)
    }

    /// Returns the published dimension buffer.
    pub fn data(&self) -> &SamplingData {
        &self.data
    }

    /// Returns the dimension buffer if a sample was published since the last
    /// call, consuming the "updated" signal.
    pub fn poll_update(&mut self) -> Option<&SamplingData> {
        if self.data.take_update() {
            Some(&self.data)
        } else {
            None
        }
    }

    /// Returns the render mode.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Returns the 0-based index of the sample `step()` generates next.
    pub fn sample_index(&self) -> u64 {
        self.sample
    }

    /// Returns the planned sample count.
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Returns the samples produced since the last reset.
    pub fn viewport_sample_count(&self) -> u64 {
        self.viewport_sample
    }

    /// Returns true while the viewport loops over its first samples.
    pub fn interactive_mode(&self) -> bool {
        self.interactive_mode
    }

    /// Returns the number of motion blur time steps.
    pub fn motion_blur_steps(&self) -> u64 {
        self.motion_blur_steps
    }

    /// Returns the number of rings of the depth of field web.
    pub fn dof_ring_count(&self) -> u64 {
        self.dof_ring_count
    }

    /// Returns the number of samples of the depth of field web.
    pub fn dof_sample_count(&self) -> u64 {
        self.dof_sample_count
    }

    /// Returns the radiance clamps.
    pub fn clamp_data(&self) -> &ClampData {
        &self.clamp_data
    }
}
