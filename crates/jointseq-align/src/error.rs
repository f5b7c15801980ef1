//! Error types for normalization, configuration, and sequencing.

/// Errors from dataset normalization, configuration validation, and alignment runs.
#[derive(Debug, thiserror::Error)]
pub enum AlignError {
    /// Returned when a record does not contain the configured length column.
    #[error("missing length column \"{column}\" in record {record}")]
    MissingField {
        /// Name of the length column that was looked up.
        column: String,
        /// Zero-based position of the record in the input dataset.
        record: usize,
    },

    /// Returned when a length value is not a finite number.
    #[error("Invalid length value \"{raw}\" in column \"{column}\" at record {record}")]
    InvalidValue {
        /// Name of the length column.
        column: String,
        /// Zero-based position of the record in the input dataset.
        record: usize,
        /// The raw value as found in the record.
        raw: String,
    },

    /// Returned when the pivot percentile is outside `(0, 1]` or not finite.
    #[error("pivot percentile must be in (0, 1], got {percentile}")]
    InvalidPercentile {
        /// The rejected percentile.
        percentile: f64,
    },

    /// Returned when the tolerance is not a finite positive number.
    #[error("tolerance must be a finite value greater than zero, got {tolerance}")]
    InvalidTolerance {
        /// The rejected tolerance.
        tolerance: f64,
    },

    /// Returned when the required pivot count is zero.
    #[error("required pivot count must be at least 1, got {required}")]
    InvalidRequired {
        /// The rejected count.
        required: usize,
    },

    /// Returned when a length column name is empty.
    #[error("{side} length column name must not be empty")]
    EmptyColumnName {
        /// Which dataset the column belongs to ("base" or "target").
        side: &'static str,
    },

    /// Returned when a run is cancelled before it completes.
    #[error("alignment cancelled")]
    Cancelled,
}

impl AlignError {
    /// Return true for errors caused by malformed input records.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidValue { .. })
    }
}
