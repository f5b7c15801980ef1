//! Lookup strategies over length-sorted measurements.

use crate::measurement::Measurement;

/// How forward lookups over a sorted measurement slice are performed.
///
/// Both strategies return identical positions; they differ only in cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Scan element by element. O(n) per lookup.
    Linear,

    /// Bisect the sorted slice. O(log n) per lookup.
    #[default]
    Binary,
}

impl SearchStrategy {
    /// Return the first position `>= from` whose length is at least `threshold`.
    ///
    /// Returns `items.len()` when no such element exists. `items` must be
    /// sorted ascending by length.
    #[must_use]
    pub fn first_at_least(&self, items: &[Measurement], from: usize, threshold: f64) -> usize {
        let from = from.min(items.len());
        let tail = &items[from..];
        let offset = match self {
            Self::Linear => tail
                .iter()
                .position(|m| m.length >= threshold)
                .unwrap_or(tail.len()),
            Self::Binary => tail.partition_point(|m| m.length < threshold),
        };
        from + offset
    }

    /// Return the first position whose length is strictly greater than `threshold`.
    ///
    /// Returns `items.len()` when no such element exists.
    #[must_use]
    pub fn first_above(&self, items: &[Measurement], threshold: f64) -> usize {
        match self {
            Self::Linear => items
                .iter()
                .position(|m| m.length > threshold)
                .unwrap_or(items.len()),
            Self::Binary => items.partition_point(|m| m.length <= threshold),
        }
    }
}
