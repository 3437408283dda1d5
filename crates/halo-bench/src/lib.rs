//! Benchmark profiles for the Halo workspace.
//!
//! Pre-built configurations and populations so every benchmark measures
//! the same scenario: the default 150-node grid over a 10 kpc disk with a
//! seeded source population.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use halo_core::{HaloConfig, SourceSet};
use halo_sample::DiskSampler;

/// The reference physics configuration: 10 kpc disk, 4 kpc half-thickness,
/// sources in the plane, the default image window and grid resolution.
pub fn reference_config() -> HaloConfig {
    HaloConfig::new(10.0, 4.0, 0.0, 4.429e-5)
}

/// Query time used by all profiles: the end of the emission window.
pub const QUERY_TIME: f64 = 1e5;

/// A seeded population of `count` sources over the reference disk.
pub fn reference_sources(count: usize, seed: u64) -> SourceSet {
    DiskSampler::new(reference_config().radius, QUERY_TIME, seed).sample(count)
}
