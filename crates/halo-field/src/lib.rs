//! Grid construction, field accumulation, and bilinear sampling.
//!
//! This crate turns the per-source kernel of `halo-kernel` into a dense
//! scalar field over a regular grid: [`FieldAccumulator`] reduces the
//! contributions of every source into one [`Field`], and [`GridSampler`]
//! resolves point queries against it by bilinear interpolation.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod accumulate;
mod bilinear;
mod field;
mod grid;

pub use accumulate::FieldAccumulator;
pub use bilinear::GridSampler;
pub use field::Field;
pub use grid::Grid;
