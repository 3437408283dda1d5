//! Halo configuration parameters.

use crate::error::ConfigError;

/// Configuration for the diffusion halo.
///
/// Bundles the geometry of the confinement volume, the transport
/// coefficient, and the numerical knobs of the image sum and output grid.
/// Validated once via [`HaloConfig::validate`] by every consumer that
/// constructs from it; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq)]
pub struct HaloConfig {
    /// Radius `R` of the source disk; the output grid spans `[-R, R]` per axis.
    pub radius: f64,

    /// Half-thickness `L` of the confinement slab along the z axis. Image
    /// sources are mirrored at `z = ±L`.
    pub half_thickness: f64,

    /// Reference height `z0` at which sources inject and the field is read.
    pub source_height: f64,

    /// Isotropic diffusion coefficient `kappa`.
    pub diffusivity: f64,

    /// Half-width of the image-source window: the kernel sums indices
    /// `n` in `[-image_window, +image_window]`. Larger windows reduce
    /// truncation error near the slab boundary at linear cost.
    pub image_window: u32,

    /// Nodes per axis of the square output grid.
    pub grid_size: u32,
}

impl HaloConfig {
    /// Default image window half-width (101 images total).
    pub const DEFAULT_IMAGE_WINDOW: u32 = 50;

    /// Default grid resolution.
    pub const DEFAULT_GRID_SIZE: u32 = 150;

    /// Create a config with default numerical knobs for the given physics.
    pub fn new(radius: f64, half_thickness: f64, source_height: f64, diffusivity: f64) -> Self {
        Self {
            radius,
            half_thickness,
            source_height,
            diffusivity,
            image_window: Self::DEFAULT_IMAGE_WINDOW,
            grid_size: Self::DEFAULT_GRID_SIZE,
        }
    }

    /// Check the configuration invariants.
    ///
    /// `radius`, `half_thickness`, and `diffusivity` must be strictly
    /// positive and finite; `grid_size` must be at least 2. Runs before
    /// any evaluation so invalid configurations never produce a partial
    /// field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("radius", self.radius),
            ("half_thickness", self.half_thickness),
            ("diffusivity", self.diffusivity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name });
            }
        }
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall {
                grid_size: self.grid_size,
            });
        }
        Ok(())
    }

    /// Grid node spacing: `2R / (grid_size - 1)`.
    pub fn grid_spacing(&self) -> f64 {
        2.0 * self.radius / (self.grid_size - 1) as f64
    }
}
