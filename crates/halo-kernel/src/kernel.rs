//! The diffusion Green's function with a truncated image sum.

use halo_core::{ConfigError, HaloConfig, SourceRecord};

/// Lower bound on elapsed time `t - t_birth`.
///
/// The free Green's function diverges as `tau -> 0`; flooring tau keeps
/// every evaluation finite. This deliberately smooths the singularity at
/// `t = t_birth` AND assigns a finite (near-singular, localized) value to
/// non-causal sources with `t_birth > t` — they are NOT excluded here.
/// Callers that want strict causality must filter such sources before
/// accumulation.
pub const TAU_FLOOR: f64 = 1e-6;

/// Evaluator for the diffusion Green's function inside a slab of
/// half-thickness `L`, with boundaries represented by the method of images.
///
/// For an observation point `(x, y)` at the reference height and a source
/// at `(x0, y0, z0)` emitting at `t_birth`, the value at time `t` is
///
/// ```text
/// G = sum_{n=-N..N} (-1)^n * W / (4 pi kappa tau)^(3/2)
///       * exp(-((x-x0)^2 + (y-y0)^2 + z_n^2) / (4 kappa tau))
/// ```
///
/// with `z_n = 2nL + (-1)^n z0` and `tau = max(t - t_birth, TAU_FLOOR)`.
/// `W` is the per-source weight supplied by the caller (unit strength or a
/// spectrum value). The window half-width `N` trades truncation error for
/// cost; it is an accuracy knob, not a correctness parameter.
///
/// Pure: evaluation has no side effects and no internal state beyond the
/// copied configuration.
#[derive(Clone, Debug)]
pub struct ImageKernel {
    half_thickness: f64,
    source_height: f64,
    diffusivity: f64,
    image_window: i64,
}

impl ImageKernel {
    /// Build a kernel from a validated configuration.
    ///
    /// Fails fast with [`ConfigError`] on non-positive diffusivity or
    /// geometry, before any evaluation can happen.
    pub fn new(config: &HaloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            half_thickness: config.half_thickness,
            source_height: config.source_height,
            diffusivity: config.diffusivity,
            image_window: i64::from(config.image_window),
        })
    }

    /// Elapsed time with the floor applied.
    fn tau(&self, t: f64, t_birth: f64) -> f64 {
        (t - t_birth).max(TAU_FLOOR)
    }

    /// Evaluate the kernel at `(x, y)` for one source at time `t`, scaled
    /// by `weight`.
    ///
    /// Every exponent argument is non-positive by construction, so the
    /// result is finite for any finite inputs; with a non-negative weight
    /// and a window wide enough for the geometry it is non-negative.
    pub fn evaluate(&self, x: f64, y: f64, source: &SourceRecord, t: f64, weight: f64) -> f64 {
        let tau = self.tau(t, source.t_birth);
        let four_kt = 4.0 * self.diffusivity * tau;
        let norm = weight / (std::f64::consts::PI * four_kt).powf(1.5);

        let dx = x - source.x;
        let dy = y - source.y;
        let planar_sq = dx * dx + dy * dy;

        let mut sum = 0.0;
        for n in -self.image_window..=self.image_window {
            let sign = if n.rem_euclid(2) == 0 { 1.0 } else { -1.0 };
            let z_n = 2.0 * n as f64 * self.half_thickness + sign * self.source_height;
            let offset_sq = planar_sq + z_n * z_n;
            sum += sign * (-offset_sq / four_kt).exp();
        }
        norm * sum
    }

    /// Evaluate the kernel for one source at every point of a coordinate
    /// list, accumulating `weight`-scaled contributions into `out`.
    ///
    /// `xs`, `ys`, and `out` must have equal length; this is the batched
    /// form the accumulator drives, hoisting the per-source terms out of
    /// the per-node loop.
    pub fn accumulate_into(
        &self,
        xs: &[f64],
        ys: &[f64],
        source: &SourceRecord,
        t: f64,
        weight: f64,
        out: &mut [f64],
    ) {
        debug_assert_eq!(xs.len(), ys.len());
        debug_assert_eq!(xs.len(), out.len());

        let tau = self.tau(t, source.t_birth);
        let four_kt = 4.0 * self.diffusivity * tau;
        let norm = weight / (std::f64::consts::PI * four_kt).powf(1.5);

        // The planar and vertical parts of the exponent separate, so the
        // image sum is a per-source constant across all grid nodes.
        let mut image_sum = 0.0;
        for n in -self.image_window..=self.image_window {
            let sign = if n.rem_euclid(2) == 0 { 1.0 } else { -1.0 };
            let z_n = 2.0 * n as f64 * self.half_thickness + sign * self.source_height;
            image_sum += sign * (-(z_n * z_n) / four_kt).exp();
        }
        let vertical = norm * image_sum;

        for ((o, &x), &y) in out.iter_mut().zip(xs).zip(ys) {
            let dx = x - source.x;
            let dy = y - source.y;
            *o += vertical * (-(dx * dx + dy * dy) / four_kt).exp();
        }
    }
}
