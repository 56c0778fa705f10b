//! Inputs read from the host renderer when planning samples.

use core::paramset::*;
use core::pbrt::*;
use std::fmt;
use std::str::FromStr;

/// How the current render session is driven.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Interactive viewport refinement.
    Viewport,

    /// Image capture of the viewport ("viewport render").
    ViewportImage,

    /// Final image render.
    Render,

    /// Light-probe baking.
    Bake,
}

impl RenderMode {
    /// Returns true for both interactive viewport modes.
    pub fn is_viewport(self) -> bool {
        matches!(self, Self::Viewport | Self::ViewportImage)
    }

    /// Returns true when the session produces an image rather than a live view.
    pub fn is_image_render(self) -> bool {
        !matches!(self, Self::Viewport)
    }

    /// Returns true for viewport image captures.
    pub fn is_viewport_image_render(self) -> bool {
        self == Self::ViewportImage
    }

    /// Returns true for light-probe baking sessions.
    pub fn is_baking(self) -> bool {
        self == Self::Bake
    }
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::Viewport
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewport" => Ok(Self::Viewport),
            "viewport_render" => Ok(Self::ViewportImage),
            "render" => Ok(Self::Render),
            "bake" => Ok(Self::Bake),
            _ => Err(format!("Unknown render mode '{}'", s)),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Viewport => "viewport",
            Self::ViewportImage => "viewport_render",
            Self::Render => "render",
            Self::Bake => "bake",
        };
        write!(f, "{}", s)
    }
}

impl TryFrom<&ParamSet> for RenderMode {
    type Error = String;

    /// Reads the `mode` string parameter.
    ///
    /// * `params` - Parameter set.
    fn try_from(params: &ParamSet) -> Result<Self, Self::Error> {
        params.find_one_string("mode", String::from("viewport")).parse()
    }
}

/// Scene and view-layer values that drive sample planning.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneSamplingSettings {
    /// Viewport sample count; 0 means refine forever.
    pub taa_samples: u64,

    /// Final render sample count.
    pub taa_render_samples: u64,

    /// View-layer override of the render sample count; 0 means no override.
    pub view_layer_samples: u64,

    /// Motion blur enabled.
    pub motion_blur: bool,

    /// Number of motion blur time steps.
    pub motion_blur_steps: u64,

    /// Jitter the camera for depth of field.
    pub dof_jitter: bool,

    /// Temporal reprojection, which allows interactive looping in the viewport.
    pub taa_reprojection: bool,

    /// Viewport preview pixel size (resolution divider).
    pub preview_pixel_size: u64,

    /// Radiance clamp of direct surface lighting; <= 0 disables it.
    pub clamp_surface_direct: Float,

    /// Radiance clamp of indirect surface lighting; <= 0 disables it.
    pub clamp_surface_indirect: Float,

    /// Radiance clamp of direct volume lighting; <= 0 disables it.
    pub clamp_volume_direct: Float,

    /// Radiance clamp of indirect volume lighting; <= 0 disables it.
    pub clamp_volume_indirect: Float,
}

impl Default for SceneSamplingSettings {
    fn default() -> Self {
        Self {
            taa_samples: 16,
            taa_render_samples: 64,
            view_layer_samples: 0,
            motion_blur: false,
            motion_blur_steps: 1,
            dof_jitter: false,
            taa_reprojection: true,
            preview_pixel_size: 1,
            clamp_surface_direct: 0.0,
            clamp_surface_indirect: 10.0,
            clamp_volume_direct: 0.0,
            clamp_volume_indirect: 0.0,
        }
    }
}

impl TryFrom<&ParamSet> for SceneSamplingSettings {
    type Error = String;

    /// Reads scene settings, falling back to defaults for absent parameters.
    ///
    /// * `params` - Parameter set.
    fn try_from(params: &ParamSet) -> Result<Self, Self::Error> {
        let d = Self::default();
        Ok(Self {
            taa_samples: params.find_one_count("taa_samples", d.taa_samples)?,
            taa_render_samples: params.find_one_count("taa_render_samples", d.taa_render_samples)?,
            view_layer_samples: params.find_one_count("view_layer_samples", d.view_layer_samples)?,
            motion_blur: params.find_one_bool("motion_blur", d.motion_blur),
            motion_blur_steps: params.find_one_count("motion_blur_steps", d.motion_blur_steps)?,
            dof_jitter: params.find_one_bool("dof_jitter", d.dof_jitter),
            taa_reprojection: params.find_one_bool("taa_reprojection", d.taa_reprojection),
            preview_pixel_size: params.find_one_count("preview_pixel_size", d.preview_pixel_size)?,
            clamp_surface_direct: params.find_one_float("clamp_surface_direct", d.clamp_surface_direct),
            clamp_surface_indirect: params.find_one_float("clamp_surface_indirect", d.clamp_surface_indirect),
            clamp_volume_direct: params.find_one_float("clamp_volume_direct", d.clamp_volume_direct),
            clamp_volume_indirect: params.find_one_float("clamp_volume_indirect", d.clamp_volume_indirect),
        })
    }
}

/// Bucket sizes used while the viewport loops over its first samples.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InteractiveSettings {
    /// Samples the anti-aliasing filter loops over.
    pub sample_aa: u64,

    /// Samples the shadow and raytrace dimensions loop over.
    pub sample_raytrace: u64,

    /// Samples the volume dimensions loop over.
    pub sample_volume: u64,

    /// Length of the sample index loop.
    pub sample_max: u64,

    /// Viewport samples after which interactive mode ends.
    pub mode_threshold: u64,
}

impl Default for InteractiveSettings {
    fn default() -> Self {
        Self {
            sample_aa: 8,
            sample_raytrace: 32,
            sample_volume: 32,
            sample_max: 8,
            mode_threshold: 3,
        }
    }
}

impl InteractiveSettings {
    /// Returns true if every bucket holds at least one sample.
    pub fn is_valid(&self) -> bool {
        self.sample_aa > 0 && self.sample_raytrace > 0 && self.sample_volume > 0 && self.sample_max > 0
    }
}

impl TryFrom<&ParamSet> for InteractiveSettings {
    type Error = String;

    /// Reads interactive bucket sizes; every value must be at least 1.
    ///
    /// * `params` - Parameter set.
    fn try_from(params: &ParamSet) -> Result<Self, Self::Error> {
        let d = Self::default();
        let settings = Self {
            sample_aa: params.find_one_count("interactive_sample_aa", d.sample_aa)?,
            sample_raytrace: params.find_one_count("interactive_sample_raytrace", d.sample_raytrace)?,
            sample_volume: params.find_one_count("interactive_sample_volume", d.sample_volume)?,
            sample_max: params.find_one_count("interactive_sample_max", d.sample_max)?,
            mode_threshold: params.find_one_count("interactive_mode_threshold", d.mode_threshold)?,
        };
        if !settings.is_valid() {
            return Err(String::from("Interactive sample counts must be at least 1"));
        }
        Ok(settings)
    }
}

/// Access to the world lighting setup.
pub trait WorldLighting {
    /// Returns the sun radiance clamp threshold; <= 0 disables it.
    fn sun_threshold(&self) -> Float;
}

/// Access to a light probe being baked.
pub trait LightProbe {
    /// Returns the configured number of bake samples.
    fn grid_bake_samples(&self) -> Int;
}

/// Plain light probe bake settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LightProbeSettings {
    /// Number of bake samples.
    pub grid_bake_samples: Int,
}

impl LightProbe for LightProbeSettings {
    fn grid_bake_samples(&self) -> Int {
        self.grid_bake_samples
    }
}

impl From<&ParamSet> for LightProbeSettings {
    /// Reads `grid_bake_samples`; defaults to 0 which plans a single sample.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        Self {
            grid_bake_samples: params.find_one_int("grid_bake_samples", 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_mode_flags() {
        assert!(RenderMode::Viewport.is_viewport());
        assert!(!RenderMode::Viewport.is_image_render());
        assert!(RenderMode::ViewportImage.is_viewport());
        assert!(RenderMode::ViewportImage.is_image_render());
        assert!(RenderMode::ViewportImage.is_viewport_image_render());
        assert!(!RenderMode::Render.is_viewport());
        assert!(RenderMode::Bake.is_baking());
    }

    #[test]
    fn render_mode_round_trips_through_strings() {
        for mode in [RenderMode::Viewport, RenderMode::ViewportImage, RenderMode::Render, RenderMode::Bake] {
            assert_eq!(mode.to_string().parse::<RenderMode>(), Ok(mode));
        }
        assert!("final".parse::<RenderMode>().is_err());
    }

    #[test]
    fn scene_settings_from_params() {
        let mut params = ParamSet::new();
        params.add_int("taa_render_samples", &[128]);
        params.add_bool("motion_blur", &[true]);
        params.add_int("motion_blur_steps", &[4]);
        params.add_float("clamp_volume_direct", &[2.5]);

        let settings = SceneSamplingSettings::try_from(&params).unwrap();
        assert_eq!(settings.taa_samples, 16);
        assert_eq!(settings.taa_render_samples, 128);
        assert!(settings.motion_blur);
        assert_eq!(settings.motion_blur_steps, 4);
        assert_eq!(settings.clamp_volume_direct, 2.5);
        assert!(params.unused().is_empty());
    }

    #[test]
    fn negative_samples_are_rejected() {
        let mut params = ParamSet::new();
        params.add_int("taa_samples", &[-1]);
        assert!(SceneSamplingSettings::try_from(&params).is_err());
    }

    #[test]
    fn interactive_settings_reject_zero_buckets() {
        let mut params = ParamSet::new();
        params.add_int("interactive_sample_aa", &[0]);
        assert!(InteractiveSettings::try_from(&params).is_err());
        assert_eq!(InteractiveSettings::try_from(&ParamSet::new()), Ok(InteractiveSettings::default()));
    }

    #[test]
    fn render_mode_from_params() {
        let mut params = ParamSet::new();
        assert_eq!(RenderMode::try_from(&params), Ok(RenderMode::Viewport));
        params.add_string("mode", &[String::from("bake")]);
        assert_eq!(RenderMode::try_from(&params), Ok(RenderMode::Bake));
    }
}
