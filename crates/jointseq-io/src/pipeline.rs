//! File-driven sequencing: read both datasets, then align them.

use std::path::Path;

use jointseq_align::{CancellationToken, SequenceResult, SequencerConfig};
use tracing::{info, instrument};

use crate::reader::DatasetReader;
use crate::IoError;

/// Outcome of aligning two dataset files.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRun {
    /// Number of records in the base dataset.
    pub n_base: usize,
    /// Number of records in the target dataset.
    pub n_target: usize,
    /// Matches and run statistics.
    pub result: SequenceResult,
}

/// Read `base` and `target` and align them with `config`.
///
/// When `token` is given, the run stops with
/// [`AlignError::Cancelled`](jointseq_align::AlignError::Cancelled) once it is cancelled.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | Any [`DatasetReader`] error | Either file cannot be read |
/// | [`IoError::Align`] | A record lacks its length column, holds an invalid length, or the run was cancelled |
#[instrument(skip_all, fields(base = %base.display(), target = %target.display()))]
pub fn align_files(
    base: &Path,
    target: &Path,
    config: &SequencerConfig,
    token: Option<&CancellationToken>,
) -> Result<AlignedRun, IoError> {
    let base_ds = DatasetReader::new(base).read()?;
    let target_ds = DatasetReader::new(target).read()?;

    let result = match token {
        Some(token) => {
            config.calculate_matches_with_cancel(base_ds.records(), target_ds.records(), token)?
        }
        None => config.calculate_matches(base_ds.records(), target_ds.records())?,
    };

    info!(
        n_base = base_ds.len(),
        n_target = target_ds.len(),
        n_matches = result.len(),
        "files aligned"
    );
    Ok(AlignedRun {
        n_base: base_ds.len(),
        n_target: target_ds.len(),
        result,
    })
}
