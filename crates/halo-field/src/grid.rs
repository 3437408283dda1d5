//! The regular output lattice.

use halo_core::{ConfigError, HaloConfig};

/// A square, axis-aligned, uniformly spaced 2-D lattice.
///
/// Both axes span the same closed interval with the same node count, so
/// the grid is fully described by `(min, max, size)`. Node `i` along an
/// axis sits at `min + i * spacing` with `spacing = (max - min)/(size-1)`.
/// Immutable after construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    min: f64,
    max: f64,
    size: usize,
}

impl Grid {
    /// Create a grid spanning `[min, max]` per axis with `size` nodes per axis.
    pub fn new(min: f64, max: f64, size: u32) -> Result<Self, ConfigError> {
        if size < 2 {
            return Err(ConfigError::GridTooSmall { grid_size: size });
        }
        if !(min.is_finite() && max.is_finite() && max > min) {
            return Err(ConfigError::NonPositive {
                name: "grid extent",
            });
        }
        Ok(Self {
            min,
            max,
            size: size as usize,
        })
    }

    /// Create the default grid for a halo: `[-R, R]` per axis.
    pub fn from_config(config: &HaloConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(-config.radius, config.radius, config.grid_size)
    }

    /// Nodes per axis.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total node count (`size * size`).
    pub fn node_count(&self) -> usize {
        self.size * self.size
    }

    /// Lower bound of both axes.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of both axes.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Node spacing along either axis.
    pub fn spacing(&self) -> f64 {
        (self.max - self.min) / (self.size - 1) as f64
    }

    /// Physical coordinate of node `i` along either axis.
    pub fn coord(&self, i: usize) -> f64 {
        debug_assert!(i < self.size);
        self.min + i as f64 * self.spacing()
    }

    /// Flattened node coordinates in row-major order (row = y index,
    /// column = x index, column varying fastest).
    ///
    /// Returns `(xs, ys)`, each of length [`Grid::node_count`]. This is
    /// the layout every [`Field`](crate::Field) uses.
    pub fn node_coords(&self) -> (Vec<f64>, Vec<f64>) {
        let n = self.node_count();
        let mut xs = Vec::with_capacity(n);
        let mut ys = Vec::with_capacity(n);
        for row in 0..self.size {
            let y = self.coord(row);
            for col in 0..self.size {
                xs.push(self.coord(col));
                ys.push(y);
            }
        }
        (xs, ys)
    }

    /// Map a continuous coordinate to fractional index space, clamped to
    /// `[0, size - 1]`. Out-of-domain coordinates clamp to the boundary;
    /// there is no extrapolation.
    pub fn fractional_index(&self, coord: f64) -> f64 {
        let idx = (coord - self.min) / (self.max - self.min) * (self.size - 1) as f64;
        idx.clamp(0.0, (self.size - 1) as f64)
    }
}
