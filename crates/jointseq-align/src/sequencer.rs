//! Pivot-anchored sequencing: coarse pivot alignment, then per-interval segment alignment.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::aligner::PairwiseAligner;
use crate::cancel::CancellationToken;
use crate::config::SequencerConfig;
use crate::error::AlignError;
use crate::measurement::{Match, Measurement};
use crate::normalize::NormalizedSequence;
use crate::record::Record;
use crate::result::SequenceResult;

/// A pair of aligned pivots: `(base, target)`.
type Anchor = (Measurement, Measurement);

/// Run the full sequencing pipeline.
///
/// Stages, in order:
/// 1. Empty input on either side returns an empty result.
/// 2. Both datasets are normalized (errors propagate).
/// 3. Pivots are selected on each side; insufficiency returns an empty result.
/// 4. Pivots are aligned; no pivot match returns an empty result.
/// 5. For every pair of consecutive anchors, the joints strictly between them
///    are aligned independently, in parallel when configured.
///
/// Matches are merged by interval index, so the output is ordered by base
/// length no matter which interval finished first.
#[instrument(skip_all, fields(n_base = base.len(), n_target = target.len(), tolerance = config.tolerance()))]
pub(crate) fn run<B: Record, T: Record>(
    base: &[B],
    target: &[T],
    config: &SequencerConfig,
    token: Option<&CancellationToken>,
) -> Result<SequenceResult, AlignError> {
    let checkpoint = || token.map_or(Ok(()), CancellationToken::checkpoint);

    if base.is_empty() || target.is_empty() {
        debug!("empty dataset, nothing to align");
        return Ok(SequenceResult::default());
    }

    let base_seq = NormalizedSequence::from_records(base, config.base_column())?;
    let target_seq = NormalizedSequence::from_records(target, config.target_column())?;
    checkpoint()?;

    let selector = config.pivot_selector();
    let (Some(base_pivots), Some(target_pivots)) =
        (selector.select(&base_seq), selector.select(&target_seq))
    else {
        warn!(
            needed_base = selector.candidate_count(base_seq.len()),
            needed_target = selector.candidate_count(target_seq.len()),
            "insufficient pivots, no alignment possible"
        );
        return Ok(SequenceResult::default());
    };

    let mut result = SequenceResult {
        base_pivots: base_pivots.len(),
        target_pivots: target_pivots.len(),
        ..SequenceResult::default()
    };
    if base_pivots.len() < config.pivot_required()
        || target_pivots.len() < config.pivot_required()
    {
        warn!(
            base_pivots = result.base_pivots,
            target_pivots = result.target_pivots,
            "fewer pivots than required"
        );
        return Ok(result);
    }

    let aligner = PairwiseAligner::new(config.tolerance());
    let pivot_alignment = aligner.align(base_pivots.as_slice(), target_pivots.as_slice());
    checkpoint()?;
    if pivot_alignment.is_empty() {
        warn!(
            base_pivots = result.base_pivots,
            target_pivots = result.target_pivots,
            "pivots did not align"
        );
        return Ok(result);
    }

    let anchors: Vec<Anchor> = pivot_alignment
        .pairs()
        .iter()
        .map(|p| (base_pivots.as_slice()[p.base], target_pivots.as_slice()[p.target]))
        .collect();
    debug!(anchors = anchors.len(), "pivot alignment complete");

    let strategy = config.strategy();
    let align_interval = |w: &[Anchor]| -> Result<Option<Vec<Match>>, AlignError> {
        checkpoint()?;
        let (lo, hi) = (w[0], w[1]);
        let base_segment = base_seq.between(lo.0.length, hi.0.length, strategy);
        let target_segment = target_seq.between(lo.1.length, hi.1.length, strategy);
        if base_segment.is_empty() || target_segment.is_empty() {
            return Ok(None);
        }
        let matches = aligner
            .align(base_segment, target_segment)
            .to_matches(base_segment, target_segment);
        checkpoint()?;
        Ok(Some(matches))
    };

    // Indexed collect keeps interval order regardless of completion order.
    let segments: Vec<Option<Vec<Match>>> = if config.parallel() {
        anchors
            .par_windows(2)
            .map(align_interval)
            .collect::<Result<_, _>>()?
    } else {
        anchors
            .windows(2)
            .map(align_interval)
            .collect::<Result<_, _>>()?
    };

    result.pivot_matches = anchors.len();
    result.segments_aligned = segments.iter().filter(|s| s.is_some()).count();
    result.matches = merge(&anchors, segments);

    info!(
        matches = result.matches.len(),
        pivot_matches = result.pivot_matches,
        segments_aligned = result.segments_aligned,
        "sequencing complete"
    );
    Ok(result)
}

/// Interleave anchor matches with the segment matches that follow each anchor.
///
/// `segments[i]` holds the matches between `anchors[i]` and `anchors[i + 1]`.
fn merge(anchors: &[Anchor], segments: Vec<Option<Vec<Match>>>) -> Vec<Match> {
    let segment_total: usize = segments.iter().flatten().map(Vec::len).sum();
    let mut merged = Vec::with_capacity(anchors.len() + segment_total);
    let mut segments = segments.into_iter();

    for (b, t) in anchors {
        merged.push(Match::between(b, t));
        if let Some(Some(seg)) = segments.next() {
            merged.extend(seg);
        }
    }

    let mut seen = HashSet::with_capacity(merged.len());
    merged.retain(|m| seen.insert(*m));
    merged
}
