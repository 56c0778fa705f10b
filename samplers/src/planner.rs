//! Sample count planning.

use crate::dof_web::*;
use crate::settings::*;
use core::pbrt::*;

/// Sample count standing in for "refine forever" in the viewport.
pub const INFINITE_SAMPLE_COUNT: u64 = 0xFFFFFF;

/// Value used for disabled radiance clamps.
pub const CLAMP_DISABLED: Float = 1e20;

/// Radiance clamp thresholds. Disabled clamps hold `CLAMP_DISABLED`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClampData {
    pub sun_threshold: Float,
    pub surface_direct: Float,
    pub surface_indirect: Float,
    pub volume_direct: Float,
    pub volume_indirect: Float,
}

impl Default for ClampData {
    fn default() -> Self {
        Self {
            sun_threshold: CLAMP_DISABLED,
            surface_direct: CLAMP_DISABLED,
            surface_indirect: CLAMP_DISABLED,
            volume_direct: CLAMP_DISABLED,
            volume_indirect: CLAMP_DISABLED,
        }
    }
}

/// Maps a raw clamp value to a threshold; <= 0 disables the clamp.
///
/// * `value` - Raw clamp value.
#[inline]
fn clamp_value_load(value: Float) -> Float {
    if value > 0.0 {
        value
    } else {
        CLAMP_DISABLED
    }
}

impl ClampData {
    /// Builds clamp thresholds from scene settings.
    ///
    /// * `scene`         - Scene settings.
    /// * `sun_threshold` - Sun clamp from the world lighting.
    pub fn new(scene: &SceneSamplingSettings, sun_threshold: Float) -> Self {
        Self {
            sun_threshold: clamp_value_load(sun_threshold),
            surface_direct: clamp_value_load(scene.clamp_surface_direct),
            surface_indirect: clamp_value_load(scene.clamp_surface_indirect),
            volume_direct: clamp_value_load(scene.clamp_volume_direct),
            volume_indirect: clamp_value_load(scene.clamp_volume_indirect),
        }
    }
}

/// The sample budget for one synchronization pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplePlan {
    /// Total number of samples, including every motion blur step.
    pub sample_count: u64,

    /// Number of motion blur time steps.
    pub motion_blur_steps: u64,

    /// Rings of the depth of field web; 0 when jitter is disabled.
    pub dof_ring_count: u64,

    /// Samples in the depth of field web; 1 when jitter is disabled.
    pub dof_sample_count: u64,

    /// Radiance clamp thresholds.
    pub clamp: ClampData,
}

impl SamplePlan {
    /// Plans the samples for a scene.
    ///
    /// * `scene`         - Scene settings.
    /// * `mode`          - How the session is rendered.
    /// * `sun_threshold` - Sun clamp from the world lighting.
    pub fn new(scene: &SceneSamplingSettings, mode: RenderMode, sun_threshold: Float) -> Self {
        // A non-zero view-layer value overrides the scene render samples.
        let render_sample_count = if scene.view_layer_samples > 0 {
            scene.view_layer_samples
        } else {
            scene.taa_render_samples
        };

        let mut sample_count = if mode.is_viewport() {
            scene.taa_samples
        } else {
            render_sample_count
        };

        if mode.is_image_render() {
            sample_count = max(1, sample_count);
        }

        if sample_count == 0 {
            debug_assert!(mode.is_viewport());
            sample_count = INFINITE_SAMPLE_COUNT;
        }

        if mode.is_viewport() && scene.preview_pixel_size > 1 {
            // Touch every film pixel at least once.
            sample_count = max(sample_count, square(scene.preview_pixel_size));
        }

        let motion_blur_steps = if !mode.is_viewport() && scene.motion_blur {
            if scene.motion_blur_steps == 0 {
                warn!("Motion blur enabled with 0 steps; using 1");
            }
            max(1, scene.motion_blur_steps)
        } else {
            1
        };
        sample_count = divide_ceil(sample_count, motion_blur_steps);

        let (dof_ring_count, dof_sample_count) = if scene.dof_jitter {
            let rings = if sample_count == INFINITE_SAMPLE_COUNT {
                DOF_INFINITE_RING_COUNT
            } else {
                web_ring_count(DOF_WEB_DENSITY, sample_count)
            };
            let dof_samples = web_sample_count(DOF_WEB_DENSITY, rings);
            // Fill the web pattern entirely.
            sample_count = divide_ceil(sample_count, dof_samples) * dof_samples;
            (rings, dof_samples)
        } else {
            (0, 1)
        };

        // Full web pattern for each time step.
        sample_count *= motion_blur_steps;

        let plan = Self {
            sample_count,
            motion_blur_steps,
            dof_ring_count,
            dof_sample_count,
            clamp: ClampData::new(scene, sun_threshold),
        };
        debug!("Planned samples for {} mode: {:?}", mode, plan);
        plan
    }

    /// Samples per motion blur step.
    pub fn samples_per_step(&self) -> u64 {
        self.sample_count / self.motion_blur_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_without_dof_or_blur() {
        let scene = SceneSamplingSettings {
            taa_samples: 16,
            ..Default::default()
        };
        let plan = SamplePlan::new(&scene, RenderMode::Viewport, 0.0);
        assert_eq!(plan.sample_count, 16);
        assert_eq!(plan.motion_blur_steps, 1);
        assert_eq!(plan.dof_ring_count, 0);
        assert_eq!(plan.dof_sample_count, 1);
    }

    #[test]
    fn final_render_with_motion_blur() {
        let scene = SceneSamplingSettings {
            view_layer_samples: 0,
            taa_render_samples: 64,
            motion_blur: true,
            motion_blur_steps: 2,
            ..Default::default()
        };
        let plan = SamplePlan::new(&scene, RenderMode::Render, 0.0);
        assert_eq!(plan.sample_count, 64);
        assert_eq!(plan.motion_blur_steps, 2);
        assert_eq!(plan.samples_per_step(), 32);
    }

    #[test]
    fn view_layer_override() {
        let scene = SceneSamplingSettings {
            view_layer_samples: 5,
            taa_render_samples: 64,
            ..Default::default()
        };
        assert_eq!(SamplePlan::new(&scene, RenderMode::Render, 0.0).sample_count, 5);
        // The override does not apply to the viewport.
        assert_eq!(SamplePlan::new(&scene, RenderMode::Viewport, 0.0).sample_count, 16);
    }

    #[test]
    fn motion_blur_ignored_in_viewport() {
        let scene = SceneSamplingSettings {
            motion_blur: true,
            motion_blur_steps: 4,
            ..Default::default()
        };
        assert_eq!(SamplePlan::new(&scene, RenderMode::Viewport, 0.0).motion_blur_steps, 1);
    }

    #[test]
    fn image_render_has_at_least_one_sample() {
        let scene = SceneSamplingSettings {
            taa_samples: 0,
            taa_render_samples: 0,
            ..Default::default()
        };
        assert_eq!(SamplePlan::new(&scene, RenderMode::Render, 0.0).sample_count, 1);
        assert_eq!(SamplePlan::new(&scene, RenderMode::ViewportImage, 0.0).sample_count, 1);
    }

    #[test]
    fn zero_viewport_samples_refine_forever() {
        let scene = SceneSamplingSettings {
            taa_samples: 0,
            ..Default::default()
        };
        assert_eq!(
            SamplePlan::new(&scene, RenderMode::Viewport, 0.0).sample_count,
            INFINITE_SAMPLE_COUNT
        );
    }

    #[test]
    fn infinite_viewport_caps_dof_rings() {
        let scene = SceneSamplingSettings {
            taa_samples: 0,
            dof_jitter: true,
            ..Default::default()
        };
        let plan = SamplePlan::new(&scene, RenderMode::Viewport, 0.0);
        assert_eq!(plan.dof_ring_count, DOF_INFINITE_RING_COUNT);
        assert_eq!(plan.dof_sample_count, 127);
        assert_eq!(plan.sample_count % 127, 0);
        assert!(plan.sample_count >= INFINITE_SAMPLE_COUNT);
    }

    #[test]
    fn dof_rounds_to_full_web() {
        let scene = SceneSamplingSettings {
            taa_samples: 16,
            dof_jitter: true,
            ..Default::default()
        };
        let plan = SamplePlan::new(&scene, RenderMode::Viewport, 0.0);
        assert_eq!(plan.dof_ring_count, 2);
        assert_eq!(plan.dof_sample_count, 19);
        assert_eq!(plan.sample_count, 19);
    }

    #[test]
    fn preview_pixel_size_touches_every_pixel() {
        let scene = SceneSamplingSettings {
            taa_samples: 2,
            preview_pixel_size: 4,
            ..Default::default()
        };
        assert_eq!(SamplePlan::new(&scene, RenderMode::Viewport, 0.0).sample_count, 16);
        assert_eq!(SamplePlan::new(&scene, RenderMode::Render, 0.0).sample_count, 64);
    }

    #[test]
    fn clamps() {
        let scene = SceneSamplingSettings {
            clamp_surface_direct: 0.0,
            clamp_surface_indirect: 10.0,
            clamp_volume_direct: -1.0,
            clamp_volume_indirect: 3.0,
            ..Default::default()
        };
        let clamp = SamplePlan::new(&scene, RenderMode::Render, 5.0).clamp;
        assert_eq!(clamp.sun_threshold, 5.0);
        assert_eq!(clamp.surface_direct, CLAMP_DISABLED);
        assert_eq!(clamp.surface_indirect, 10.0);
        assert_eq!(clamp.volume_direct, CLAMP_DISABLED);
        assert_eq!(clamp.volume_indirect, 3.0);
        assert_eq!(SamplePlan::new(&scene, RenderMode::Render, 0.0).clamp.sun_threshold, CLAMP_DISABLED);
    }

    #[test]
    fn counts_divide_evenly() {
        for samples in (1..5000).step_by(7) {
            for steps in 1..8 {
                for (dof, blur) in [(false, false), (false, true), (true, false), (true, true)] {
                    let scene = SceneSamplingSettings {
                        taa_render_samples: samples,
                        motion_blur: blur,
                        motion_blur_steps: steps,
                        dof_jitter: dof,
                        ..Default::default()
                    };
                    let plan = SamplePlan::new(&scene, RenderMode::Render, 0.0);
                    assert_eq!(plan.sample_count % plan.motion_blur_steps, 0, "{:?}", plan);
                    assert_eq!(plan.samples_per_step() % plan.dof_sample_count, 0, "{:?}", plan);
                    assert!(plan.sample_count >= samples);
                    if !dof {
                        assert_eq!(plan.dof_ring_count, 0);
                        assert_eq!(plan.dof_sample_count, 1);
                    }
                }
            }
        }
    }
}
