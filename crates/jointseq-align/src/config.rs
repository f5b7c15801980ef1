//! Configuration builder for sequencing runs.

use crate::cancel::CancellationToken;
use crate::error::AlignError;
use crate::pivot::PivotSelector;
use crate::record::Record;
use crate::result::SequenceResult;
use crate::search::SearchStrategy;

/// Column read when no explicit length column is configured.
pub const DEFAULT_LENGTH_COLUMN: &str = "length";

/// Configuration for aligning a base dataset against a target dataset.
///
/// Construct via [`SequencerConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter       | Default                  |
/// |-----------------|--------------------------|
/// | `base_column`   | `"length"`               |
/// | `target_column` | `"length"`               |
/// | `strategy`      | `SearchStrategy::Binary` |
/// | `parallel`      | true                     |
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    pub(crate) selector: PivotSelector,
    pub(crate) base_column: String,
    pub(crate) target_column: String,
    pub(crate) strategy: SearchStrategy,
    pub(crate) parallel: bool,
}

impl SequencerConfig {
    /// Create a configuration from the pivot and tolerance parameters.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::InvalidPercentile`] | `pivot_percentile` not in `(0, 1]` |
    /// | [`AlignError::InvalidTolerance`] | `tolerance` not finite or not `> 0` |
    /// | [`AlignError::InvalidRequired`] | `pivot_required` is zero |
    pub fn new(
        pivot_percentile: f64,
        tolerance: f64,
        pivot_required: usize,
    ) -> Result<Self, AlignError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(AlignError::InvalidTolerance { tolerance });
        }
        let selector = PivotSelector::new(pivot_percentile, pivot_required, tolerance)?;
        Ok(Self {
            selector,
            base_column: DEFAULT_LENGTH_COLUMN.to_string(),
            target_column: DEFAULT_LENGTH_COLUMN.to_string(),
            strategy: SearchStrategy::default(),
            parallel: true,
        })
    }

    /// Set the column holding the length in base records.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::EmptyColumnName`] if `column` is empty.
    pub fn with_base_column(mut self, column: impl Into<String>) -> Result<Self, AlignError> {
        self.base_column = non_empty(column.into(), "base")?;
        Ok(self)
    }

    /// Set the column holding the length in target records.
    ///
    /// # Errors
    ///
    /// Returns [`AlignError::EmptyColumnName`] if `column` is empty.
    pub fn with_target_column(mut self, column: impl Into<String>) -> Result<Self, AlignError> {
        self.target_column = non_empty(column.into(), "target")?;
        Ok(self)
    }

    /// Set the lookup strategy used for pivot skipping and segment bounds.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable parallel segment alignment.
    ///
    /// Results are identical either way. When enabled, intervals run on the
    /// global rayon pool.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Return the fraction of each dataset that must be covered by pivots.
    #[must_use]
    pub fn pivot_percentile(&self) -> f64 {
        self.selector.percentile()
    }

    /// Return the match tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.selector.tolerance()
    }

    /// Return the absolute minimum pivot count per dataset.
    #[must_use]
    pub fn pivot_required(&self) -> usize {
        self.selector.required()
    }

    /// Return the base length column.
    #[must_use]
    pub fn base_column(&self) -> &str {
        &self.base_column
    }

    /// Return the target length column.
    #[must_use]
    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    /// Return the lookup strategy.
    #[must_use]
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Return whether segments are aligned in parallel.
    #[must_use]
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Return the pivot selector these parameters describe.
    #[must_use]
    pub fn pivot_selector(&self) -> PivotSelector {
        self.selector.with_strategy(self.strategy)
    }

    /// Align `target` against `base`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::MissingField`] | A record lacks its configured length column |
    /// | [`AlignError::InvalidValue`] | A length is not a finite number |
    pub fn calculate_matches<B: Record, T: Record>(
        &self,
        base: &[B],
        target: &[T],
    ) -> Result<SequenceResult, AlignError> {
        crate::sequencer::run(base, target, self, None)
    }

    /// Align `target` against `base`, stopping early if `token` is cancelled.
    ///
    /// A cancelled run returns no partial matches.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::MissingField`] | A record lacks its configured length column |
    /// | [`AlignError::InvalidValue`] | A length is not a finite number |
    /// | [`AlignError::Cancelled`] | `token` was cancelled before the run finished |
    pub fn calculate_matches_with_cancel<B: Record, T: Record>(
        &self,
        base: &[B],
        target: &[T],
        token: &CancellationToken,
    ) -> Result<SequenceResult, AlignError> {
        crate::sequencer::run(base, target, self, Some(token))
    }
}

fn non_empty(column: String, side: &'static str) -> Result<String, AlignError> {
    if column.is_empty() {
        return Err(AlignError::EmptyColumnName { side });
    }
    Ok(column)
}
