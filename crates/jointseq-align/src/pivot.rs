//! Greedy selection of tolerance-separated pivot anchors.

use tracing::{debug, instrument};

use crate::error::AlignError;
use crate::measurement::Measurement;
use crate::normalize::NormalizedSequence;
use crate::search::SearchStrategy;

/// Pivots picked from a [`NormalizedSequence`], in ascending length order.
///
/// Consecutive pivots differ in length by at least the selector's tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotSet(Vec<Measurement>);

impl PivotSet {
    /// Return the pivots as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Measurement] {
        &self.0
    }

    /// Return the number of pivots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the set holds no pivots.
    ///
    /// A set returned by [`PivotSelector::select`] always holds at least one pivot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the inner vector.
    #[must_use]
    pub fn into_inner(self) -> Vec<Measurement> {
        self.0
    }
}

impl AsRef<[Measurement]> for PivotSet {
    fn as_ref(&self) -> &[Measurement] {
        &self.0
    }
}

/// Immutable pivot selection parameters. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotSelector {
    percentile: f64,
    required: usize,
    tolerance: f64,
    strategy: SearchStrategy,
}

impl PivotSelector {
    /// Create a selector.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::InvalidPercentile`] | `percentile` not in `(0, 1]` |
    /// | [`AlignError::InvalidRequired`] | `required` is zero |
    /// | [`AlignError::InvalidTolerance`] | `tolerance` negative or not finite |
    pub fn new(percentile: f64, required: usize, tolerance: f64) -> Result<Self, AlignError> {
        if !(percentile > 0.0 && percentile <= 1.0) {
            return Err(AlignError::InvalidPercentile { percentile });
        }
        if required == 0 {
            return Err(AlignError::InvalidRequired { required });
        }
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(AlignError::InvalidTolerance { tolerance });
        }
        Ok(Self {
            percentile,
            required,
            tolerance,
            strategy: SearchStrategy::default(),
        })
    }

    /// Set the lookup strategy used to skip to the next pivot.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Return the fraction of the dataset that must be covered by pivots.
    #[must_use]
    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    /// Return the absolute minimum pivot count.
    #[must_use]
    pub fn required(&self) -> usize {
        self.required
    }

    /// Return the minimum length gap between consecutive pivots.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Return the lookup strategy.
    #[must_use]
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Return the number of pivots a dataset of `n` joints must yield.
    ///
    /// `max(floor(percentile * n), required)`.
    #[must_use]
    pub fn candidate_count(&self, n: usize) -> usize {
        let by_share = (self.percentile * n as f64).floor() as usize;
        by_share.max(self.required)
    }

    /// Pick pivots from `seq`.
    ///
    /// The smallest joint is always the first pivot. Each following pivot is
    /// the first later joint whose length is at least the previous pivot's
    /// length plus the tolerance.
    ///
    /// Returns `None` when fewer than [`candidate_count`][Self::candidate_count]
    /// pivots qualify. This is not an error: callers treat it as "no alignment
    /// possible".
    #[must_use]
    #[instrument(skip(self, seq), fields(n = seq.len()))]
    pub fn select(&self, seq: &NormalizedSequence) -> Option<PivotSet> {
        let items = seq.as_slice();
        let first = items.first()?;

        let mut pivots = vec![*first];
        let mut idx = 0;
        loop {
            let threshold = items[idx].length + self.tolerance;
            let next = self.strategy.first_at_least(items, idx + 1, threshold);
            if next >= items.len() {
                break;
            }
            pivots.push(items[next]);
            idx = next;
        }

        let needed = self.candidate_count(items.len());
        debug!(found = pivots.len(), needed, "pivot scan complete");
        if pivots.len() < needed {
            return None;
        }
        Some(PivotSet(pivots))
    }
}
