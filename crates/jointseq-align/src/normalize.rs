//! Dataset normalization into length-sorted measurements.

use std::ops::Index;

use tracing::{debug, instrument};

use crate::error::AlignError;
use crate::measurement::Measurement;
use crate::record::{extract_length, Record};
use crate::search::SearchStrategy;
use crate::segment;

/// Measurements sorted ascending by length.
///
/// Equal lengths keep their input order. `original_index` values form a
/// permutation of `0..len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSequence(Vec<Measurement>);

impl NormalizedSequence {
    /// Normalize `records` by reading the length stored under `column`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::MissingField`] | A record has no `column` field |
    /// | [`AlignError::InvalidValue`] | A value is not a finite number |
    #[instrument(skip(records), fields(n = records.len()))]
    pub fn from_records<R: Record>(records: &[R], column: &str) -> Result<Self, AlignError> {
        let items = records
            .iter()
            .enumerate()
            .map(|(i, r)| extract_length(r, column, i).map(|len| Measurement::new(i, len)))
            .collect::<Result<Vec<_>, _>>()?;
        let seq = Self::from_unsorted(items);
        debug!(
            min = seq.0.first().map(|m| m.length),
            max = seq.0.last().map(|m| m.length),
            "dataset normalized"
        );
        Ok(seq)
    }

    /// Normalize a plain slice of lengths.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::InvalidValue`] if any length is NaN or infinite.
    pub fn from_lengths(lengths: &[f64]) -> Result<Self, AlignError> {
        Self::from_records(lengths, "length")
    }

    fn from_unsorted(mut items: Vec<Measurement>) -> Self {
        // Stable: equal lengths stay in input order.
        items.sort_by(|a, b| a.length.total_cmp(&b.length));
        Self(items)
    }

    /// Return the measurements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Measurement] {
        &self.0
    }

    /// Return the number of measurements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if there are no measurements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the measurements strictly between `start` and `end` in length.
    ///
    /// Both bounds are exclusive. Empty when `start >= end`.
    #[must_use]
    pub fn between(&self, start: f64, end: f64, strategy: SearchStrategy) -> &[Measurement] {
        segment::between(&self.0, start, end, strategy)
    }

    /// Iterate over the measurements in ascending length order.
    pub fn iter(&self) -> std::slice::Iter<'_, Measurement> {
        self.0.iter()
    }
}

impl Index<usize> for NormalizedSequence {
    type Output = Measurement;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl AsRef<[Measurement]> for NormalizedSequence {
    fn as_ref(&self) -> &[Measurement] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a NormalizedSequence {
    type Item = &'a Measurement;
    type IntoIter = std::slice::Iter<'a, Measurement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
