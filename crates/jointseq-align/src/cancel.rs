//! Cooperative cancellation for long alignment runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::AlignError;

/// Shared flag checked by the sequencer between stages and intervals.
///
/// Clones observe the same flag, so a token can be handed to another thread
/// and cancelled from there.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Return true once [`cancel`][Self::cancel] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn checkpoint(&self) -> Result<(), AlignError> {
        if self.is_cancelled() {
            return Err(AlignError::Cancelled);
        }
        Ok(())
    }
}
