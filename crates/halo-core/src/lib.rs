//! Core types for the Halo diffusion-field workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! halo configuration struct, source records and the immutable source set,
//! the injection-spectrum trait, and the error types shared by the rest of
//! the workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod source;
mod spectrum;

pub use config::HaloConfig;
pub use error::{ConfigError, SourceError};
pub use source::{SourceRecord, SourceSet};
pub use spectrum::{PowerLawSpectrum, Spectrum, UnitSpectrum};
