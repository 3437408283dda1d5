//! Halo: steady-state density fields of diffusing particles injected by a
//! population of impulsive point sources in a finite disk.
//!
//! The diffusion Green's function is evaluated in closed form, with the
//! slab boundary along the confinement axis represented by a truncated
//! method-of-images sum. Superposing the kernel over every source yields
//! a dense 2-D field on a regular grid, which is then queried at arbitrary
//! points by bilinear interpolation.
//!
//! This is the top-level facade crate re-exporting the public API of the
//! Halo sub-crates. For most users, depending on `halo` alone is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use halo::prelude::*;
//!
//! // Physics: 10 kpc disk, 4 kpc halo half-thickness, sources in the plane.
//! let mut config = HaloConfig::new(10.0, 4.0, 0.0, 4.429e-5);
//! config.grid_size = 64;
//!
//! // A reproducible population of 100 sources over the last 100 kyr.
//! let sources = DiskSampler::new(config.radius, 1e5, 42).sample(100);
//!
//! // Accumulate the field at t = 100 kyr and query it off-grid.
//! let accumulator = FieldAccumulator::new(&config).unwrap();
//! let field = accumulator.accumulate(&sources, 1e5, None);
//! let sampler = GridSampler::new(field);
//! let density = sampler.sample(1.25, -3.6);
//! assert!(density >= 0.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `halo-core` | Configuration, source records, spectra, errors |
//! | [`kernel`] | `halo-kernel` | The image-sum Green's function evaluator |
//! | [`field`] | `halo-field` | Grid, field accumulation, bilinear sampling |
//! | [`sample`] | `halo-sample` | Seeded disk sampling of source populations |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Configuration, source records, spectra, and error types (`halo-core`).
pub use halo_core as types;

/// The image-sum diffusion Green's function (`halo-kernel`).
pub use halo_kernel as kernel;

/// Grid, field accumulation, and bilinear sampling (`halo-field`).
pub use halo_field as field;

/// Seeded source-population sampling (`halo-sample`).
pub use halo_sample as sample;

/// The types most callers need, importable in one line.
pub mod prelude {
    pub use halo_core::{
        ConfigError, HaloConfig, PowerLawSpectrum, SourceError, SourceRecord, SourceSet,
        Spectrum, UnitSpectrum,
    };
    pub use halo_field::{Field, FieldAccumulator, Grid, GridSampler};
    pub use halo_kernel::{ImageKernel, TAU_FLOOR};
    pub use halo_sample::DiskSampler;
}
