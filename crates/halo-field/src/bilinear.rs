//! Point queries against an accumulated field.

use crate::field::Field;
use crate::grid::Grid;

/// Bilinear interpolation over the most recently accumulated [`Field`].
///
/// Construction consumes the finished field, which is the ordering
/// barrier: a sampler can only exist once accumulation is complete, so a
/// partially accumulated field is never readable.
///
/// Out-of-domain queries are clamped to the boundary value — never
/// extrapolated and never an error. At the boundary the interpolation
/// degenerates to linear (edge) or constant (corner), as fewer distinct
/// neighbour nodes remain.
#[derive(Clone, Debug)]
pub struct GridSampler {
    grid: Grid,
    field: Field,
}

impl GridSampler {
    /// Wrap a finished field for point queries.
    pub fn new(field: Field) -> Self {
        Self {
            grid: field.grid(),
            field,
        }
    }

    /// The wrapped field.
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Release the field.
    pub fn into_field(self) -> Field {
        self.field
    }

    /// Interpolated field value at `(x, y)`.
    ///
    /// Exact (within floating tolerance) when `(x, y)` is a grid node.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let size = self.grid.size();
        let fx = self.grid.fractional_index(x);
        let fy = self.grid.fractional_index(y);

        // Lower-left node of the enclosing cell; the min keeps the +1
        // neighbour in range when the query clamps to the far edge.
        let col = (fx as usize).min(size - 2);
        let row = (fy as usize).min(size - 2);
        let tx = fx - col as f64;
        let ty = fy - row as f64;

        let v00 = self.field.at(row, col);
        let v01 = self.field.at(row, col + 1);
        let v10 = self.field.at(row + 1, col);
        let v11 = self.field.at(row + 1, col + 1);

        let bottom = v00 + tx * (v01 - v00);
        let top = v10 + tx * (v11 - v10);
        bottom + ty * (top - bottom)
    }

    /// Interpolated values for a batch of query points.
    pub fn sample_many(&self, points: &[(f64, f64)]) -> Vec<f64> {
        points.iter().map(|&(x, y)| self.sample(x, y)).collect()
    }
}
