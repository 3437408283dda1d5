//! The accumulated scalar field.

use crate::grid::Grid;

/// A dense scalar field over a [`Grid`], one value per node, row-major
/// (row = y index, column = x index).
///
/// Produced in full by the accumulator for a fixed query time and energy;
/// there is no incremental update path. Values are non-negative under
/// valid inputs.
#[derive(Clone, Debug)]
pub struct Field {
    grid: Grid,
    values: Vec<f64>,
}

impl Field {
    /// An all-zero field over `grid`.
    pub fn zeros(grid: Grid) -> Self {
        Self {
            values: vec![0.0; grid.node_count()],
            grid,
        }
    }

    /// Wrap precomputed node values. Panics if the length does not match
    /// the grid; callers other than tests should obtain fields from the
    /// accumulator.
    pub fn from_values(grid: Grid, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            grid.node_count(),
            "field length must match grid node count"
        );
        Self { grid, values }
    }

    /// The grid this field is defined on.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Flattened node values, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at node `(row, col)` = (y index, x index).
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.grid.size() + col]
    }

    /// Add another field node-wise. Both fields must share a grid.
    /// Summing per-batch partial fields this way is exactly the source-set
    /// concatenation of the batches.
    pub fn add_assign(&mut self, other: &Field) {
        assert_eq!(self.grid, other.grid, "fields must share a grid");
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += b;
        }
    }

    /// Base-10 log of every node with non-positive values clamped to
    /// `floor` first.
    ///
    /// Zero accumulated density is legitimate (e.g. an empty source set),
    /// so a renderer taking logs must censor it rather than propagate
    /// `-inf`; this helper is that censoring.
    pub fn log10_floored(&self, floor: f64) -> Vec<f64> {
        assert!(floor > 0.0, "log floor must be positive");
        self.values.iter().map(|&v| v.max(floor).log10()).collect()
    }
}
