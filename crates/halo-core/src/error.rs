//! Error types for halo construction and source ingestion.

use std::fmt;

/// Errors arising from an invalid [`HaloConfig`](crate::HaloConfig).
///
/// Raised at construction time by the kernel, grid, and accumulator —
/// always before any field evaluation begins, so a partially accumulated
/// field is never observable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A physical parameter that must be strictly positive is not.
    NonPositive {
        /// Name of the offending parameter (`"diffusivity"`, `"radius"`,
        /// `"half_thickness"`).
        name: &'static str,
    },
    /// The grid needs at least two nodes per axis to define a spacing.
    GridTooSmall {
        /// The rejected node count.
        grid_size: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositive { name } => {
                write!(f, "{name} must be strictly positive")
            }
            Self::GridTooSmall { grid_size } => {
                write!(f, "grid_size must be >= 2, got {grid_size}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors arising from source-set construction.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceError {
    /// A source record carries a NaN or infinite coordinate, time, or energy.
    NonFinite {
        /// Index of the offending record in the input.
        index: usize,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { index } => {
                write!(f, "source record {index} has a non-finite component")
            }
        }
    }
}

impl std::error::Error for SourceError {}
