//! Result type for a sequencing run.

use crate::measurement::Match;

/// Outcome of [`SequencerConfig::calculate_matches`](crate::SequencerConfig::calculate_matches).
///
/// An empty `matches` list is a successful result: it means one of the
/// datasets was empty, pivot selection was insufficient, or no pivots aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SequenceResult {
    /// Correspondences in ascending base length order.
    pub matches: Vec<Match>,
    /// Number of pivots selected from the base dataset.
    pub base_pivots: usize,
    /// Number of pivots selected from the target dataset.
    pub target_pivots: usize,
    /// Number of matches contributed by pivot alignment.
    pub pivot_matches: usize,
    /// Number of intervals whose segments were aligned (both sides non-empty).
    pub segments_aligned: usize,
}

impl SequenceResult {
    /// Return the number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Return true if no correspondence was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Return the number of matches contributed by segment alignment.
    #[must_use]
    pub fn segment_matches(&self) -> usize {
        self.matches.len().saturating_sub(self.pivot_matches)
    }

    /// Return the matches as `(base_index, target_index)` tuples.
    #[must_use]
    pub fn index_pairs(&self) -> Vec<(usize, usize)> {
        self.matches
            .iter()
            .map(|m| (m.base_index, m.target_index))
            .collect()
    }
}
