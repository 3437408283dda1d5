//! Source records and the immutable source set.

use crate::error::SourceError;

/// One impulsive point source: a position in the disk plane, an emission
/// time, and an optional particle energy.
///
/// Records are plain data, created once by an external sampler and
/// read-only for the rest of the run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SourceRecord {
    /// Disk-plane x coordinate.
    pub x: f64,
    /// Disk-plane y coordinate.
    pub y: f64,
    /// Emission time.
    pub t_birth: f64,
    /// Energy carried by this source, if assigned. When present it
    /// overrides the query energy for spectrum weighting.
    pub energy: Option<f64>,
}

impl SourceRecord {
    /// Create a record without an energy assignment.
    pub fn new(x: f64, y: f64, t_birth: f64) -> Self {
        Self {
            x,
            y,
            t_birth,
            energy: None,
        }
    }

    /// Attach an energy to this record.
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.t_birth.is_finite()
            && self.energy.is_none_or(f64::is_finite)
    }
}

/// An immutable collection of source records.
///
/// Construction rejects non-finite components; beyond that the set places
/// no constraint on its records (causality with respect to a later query
/// time is deliberately not enforced here — see the kernel's tau floor).
#[derive(Clone, Debug, Default)]
pub struct SourceSet {
    records: Vec<SourceRecord>,
}

impl SourceSet {
    /// Build a set from records, validating that every component is finite.
    pub fn new(records: Vec<SourceRecord>) -> Result<Self, SourceError> {
        if let Some(index) = records.iter().position(|r| !r.is_finite()) {
            return Err(SourceError::NonFinite { index });
        }
        Ok(Self { records })
    }

    /// The records, in insertion order.
    pub fn records(&self) -> &[SourceRecord] {
        &self.records
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty. An empty set accumulates to a zero field.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Concatenate two sets. Used by tests and by callers that merge
    /// independently sampled populations; accumulation order is irrelevant
    /// to the resulting field.
    pub fn concat(&self, other: &SourceSet) -> SourceSet {
        let mut records = self.records.clone();
        records.extend_from_slice(&other.records);
        SourceSet { records }
    }
}

impl FromIterator<SourceRecord> for SourceSet {
    /// Collect records without finiteness validation; prefer
    /// [`SourceSet::new`] for externally produced data.
    fn from_iter<I: IntoIterator<Item = SourceRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}
