//! Injection-spectrum weighting.

/// A per-source scalar multiplier as a function of particle energy.
///
/// The accumulator applies `weight(E)` to every kernel evaluation when a
/// spectrum is attached and an energy is available; without one, every
/// source contributes with unit strength.
pub trait Spectrum: Send + Sync {
    /// Weight applied to a source injecting at `energy`.
    ///
    /// Must return a finite, non-negative value for any energy the caller
    /// queries — the field's non-negativity contract depends on it.
    fn weight(&self, energy: f64) -> f64;
}

/// Constant unit weight; equivalent to attaching no spectrum at all.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnitSpectrum;

impl Spectrum for UnitSpectrum {
    fn weight(&self, _energy: f64) -> f64 {
        1.0
    }
}

/// Power-law injection spectrum `(E / E_ref)^(-index)`.
///
/// The standard shape for impulsive cosmic-ray injection. `index` is the
/// spectral index (positive for a falling spectrum) and `e_ref` the
/// reference energy at which the weight is 1.
#[derive(Clone, Copy, Debug)]
pub struct PowerLawSpectrum {
    index: f64,
    e_ref: f64,
}

impl PowerLawSpectrum {
    /// Create a power-law spectrum with the given index and reference energy.
    pub fn new(index: f64, e_ref: f64) -> Self {
        Self { index, e_ref }
    }
}

impl Spectrum for PowerLawSpectrum {
    fn weight(&self, energy: f64) -> f64 {
        (energy / self.e_ref).powf(-self.index)
    }
}
