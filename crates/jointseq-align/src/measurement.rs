//! Measurement and match value types.

/// A joint reduced to its length and its position in the input dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Zero-based position of the record in the input dataset.
    pub original_index: usize,
    /// The scalar length of the joint.
    pub length: f64,
}

impl Measurement {
    /// Create a new measurement.
    #[must_use]
    pub fn new(original_index: usize, length: f64) -> Self {
        Self {
            original_index,
            length,
        }
    }
}

/// A correspondence between a base joint and a target joint, in original positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Match {
    /// Position of the joint in the base dataset.
    pub base_index: usize,
    /// Position of the joint in the target dataset.
    pub target_index: usize,
}

impl Match {
    /// Create a new match.
    #[must_use]
    pub fn new(base_index: usize, target_index: usize) -> Self {
        Self {
            base_index,
            target_index,
        }
    }

    pub(crate) fn between(base: &Measurement, target: &Measurement) -> Self {
        Self::new(base.original_index, target.original_index)
    }
}

impl From<(usize, usize)> for Match {
    fn from((base_index, target_index): (usize, usize)) -> Self {
        Self::new(base_index, target_index)
    }
}
