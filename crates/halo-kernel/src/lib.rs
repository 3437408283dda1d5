//! Image-sum diffusion Green's function evaluator.
//!
//! The kernel is the closed-form response at a point to an instantaneous
//! point injection under isotropic diffusion, with the slab boundary at
//! `z = ±L` represented by the method of images: an alternating series of
//! mirrored virtual sources, truncated to a finite symmetric window.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod kernel;

pub use kernel::{ImageKernel, TAU_FLOOR};
