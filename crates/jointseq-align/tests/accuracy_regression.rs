//! Accuracy regression tests for jointseq-align.
//!
//! Reference scenarios pin the end-to-end behaviour of `calculate_matches`;
//! the property checks run on seeded synthetic scans so failures reproduce.

use std::collections::HashMap;

use jointseq_align::{
    AlignError, Match, NormalizedSequence, PairwiseAligner, SearchStrategy, SequencerConfig,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn records(column: &str, values: &[&str]) -> Vec<HashMap<String, String>> {
    values
        .iter()
        .map(|v| HashMap::from([(column.to_string(), (*v).to_string())]))
        .collect()
}

/// Two scans of the same structure: `target` is `base` shuffled, jittered by
/// up to `noise`, with roughly `drop_rate` of the joints missing.
fn synthetic_scans(
    seed: u64,
    n: usize,
    gap: (f64, f64),
    noise: f64,
    drop_rate: f64,
) -> (Vec<f64>, Vec<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut acc = 10.0;
    let mut base = Vec::with_capacity(n);
    for _ in 0..n {
        acc += rng.gen_range(gap.0..gap.1);
        base.push(acc);
    }
    base.shuffle(&mut rng);

    let mut target = Vec::with_capacity(n);
    for &v in &base {
        if rng.gen_range(0.0..1.0) < drop_rate {
            continue;
        }
        let jitter = if noise > 0.0 {
            rng.gen_range(-noise..noise)
        } else {
            0.0
        };
        target.push(v + jitter);
    }
    target.shuffle(&mut rng);
    (base, target)
}

fn assert_tolerance_bound(base: &[f64], target: &[f64], matches: &[Match], tolerance: f64) {
    for m in matches {
        let diff = (base[m.base_index] - target[m.target_index]).abs();
        assert!(
            diff <= tolerance,
            "match {m:?} differs by {diff}, tolerance {tolerance}"
        );
    }
}

fn assert_monotonic(base: &[f64], target: &[f64], matches: &[Match]) {
    for w in matches.windows(2) {
        let (a, b) = (w[0], w[1]);
        assert!(
            base[a.base_index] <= base[b.base_index],
            "base order broken between {a:?} and {b:?}"
        );
        assert!(
            target[a.target_index] <= target[b.target_index],
            "crossing correspondence between {a:?} and {b:?}"
        );
    }
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_a_pairs_in_order() {
    let base = [2.0, 4.5, 6.0, 8.5, 10.0];
    let target = [2.1, 4.6, 6.1, 8.6, 10.1];
    let result = SequencerConfig::new(0.5, 0.5, 2)
        .unwrap()
        .calculate_matches(&base, &target)
        .unwrap();
    assert_eq!(
        result.index_pairs(),
        vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]
    );
}

#[test]
fn scenario_b_single_joint() {
    let result = SequencerConfig::new(0.5, 0.5, 1)
        .unwrap()
        .calculate_matches(&[2.0], &[2.0])
        .unwrap();
    assert_eq!(result.index_pairs(), vec![(0, 0)]);
}

#[test]
fn scenario_c_invalid_length_value() {
    let base = records("length", &["1.0", "invalid", "3.0"]);
    let target = records("length", &["1.0", "2.0", "3.0"]);
    let err = SequencerConfig::new(0.5, 0.5, 2)
        .unwrap()
        .calculate_matches(&base, &target)
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert!(matches!(err, AlignError::InvalidValue { record: 1, .. }));
    assert!(err.to_string().contains("Invalid length value"));
}

#[test]
fn scenario_d_custom_column_names() {
    let base = records("baseLength", &["2", "4.5", "6", "8.5", "10"]);
    let target = records("targetLength", &["2.1", "4.6", "6.1", "8.6", "10.1"]);
    let result = SequencerConfig::new(0.5, 0.5, 2)
        .unwrap()
        .with_base_column("baseLength")
        .unwrap()
        .with_target_column("targetLength")
        .unwrap()
        .calculate_matches(&base, &target)
        .unwrap();
    assert_eq!(result.len(), 5);

    // The default column is not present in these records.
    let err = SequencerConfig::new(0.5, 0.5, 2)
        .unwrap()
        .calculate_matches(&base, &target)
        .unwrap_err();
    assert!(matches!(err, AlignError::MissingField { ref column, .. } if column == "length"));
}

#[test]
fn empty_input_law() {
    let cfg = SequencerConfig::new(0.5, 0.5, 1).unwrap();
    let some = [1.0, 2.0, 3.0];
    let none: [f64; 0] = [];
    assert!(cfg.calculate_matches(&none, &some).unwrap().is_empty());
    assert!(cfg.calculate_matches(&some, &none).unwrap().is_empty());
    assert!(cfg.calculate_matches(&none, &none).unwrap().is_empty());
}

#[test]
fn reordered_target_is_recovered() {
    let base = [4.0, 1.0, 3.0, 2.0, 5.0];
    let target = [1.02, 5.01, 2.03, 4.04, 2.98];
    let result = SequencerConfig::new(0.5, 0.3, 2)
        .unwrap()
        .calculate_matches(&base, &target)
        .unwrap();
    let mut pairs = result.index_pairs();
    pairs.sort_unstable();
    assert_eq!(pairs, vec![(0, 3), (1, 0), (2, 4), (3, 2), (4, 1)]);
}

// ---------------------------------------------------------------------------
// Properties on synthetic scans
// ---------------------------------------------------------------------------

#[test]
fn repeated_runs_are_identical() {
    let (base, target) = synthetic_scans(7, 500, (0.05, 0.9), 0.08, 0.05);
    let cfg = SequencerConfig::new(0.1, 0.25, 2).unwrap();
    let first = cfg.calculate_matches(&base, &target).unwrap();
    for _ in 0..3 {
        assert_eq!(cfg.calculate_matches(&base, &target).unwrap(), first);
    }
}

#[test]
fn matches_respect_tolerance_and_order() {
    for seed in [1_u64, 2, 3, 4, 5] {
        let (base, target) = synthetic_scans(seed, 300, (0.05, 1.0), 0.1, 0.1);
        let tolerance = 0.3;
        let result = SequencerConfig::new(0.05, tolerance, 2)
            .unwrap()
            .calculate_matches(&base, &target)
            .unwrap();
        assert!(!result.is_empty(), "seed {seed}: no matches");
        assert!(result.segments_aligned > 0, "seed {seed}: no segment was aligned");
        assert_tolerance_bound(&base, &target, &result.matches, tolerance);
        assert_monotonic(&base, &target, &result.matches);
    }
}

#[test]
fn each_joint_matched_at_most_once() {
    let (base, target) = synthetic_scans(11, 400, (0.05, 0.8), 0.1, 0.2);
    let result = SequencerConfig::new(0.05, 0.3, 2)
        .unwrap()
        .calculate_matches(&base, &target)
        .unwrap();
    let mut bases: Vec<usize> = result.matches.iter().map(|m| m.base_index).collect();
    let mut targets: Vec<usize> = result.matches.iter().map(|m| m.target_index).collect();
    bases.sort_unstable();
    bases.dedup();
    targets.sort_unstable();
    targets.dedup();
    assert_eq!(bases.len(), result.len());
    assert_eq!(targets.len(), result.len());
    assert!(result.len() <= target.len());
}

#[test]
fn well_separated_scans_fully_recovered() {
    // Gaps exceed twice the tolerance plus noise: every joint has exactly one partner.
    let (base, target) = synthetic_scans(21, 250, (1.0, 2.5), 0.1, 0.0);
    let result = SequencerConfig::new(0.5, 0.3, 2)
        .unwrap()
        .calculate_matches(&base, &target)
        .unwrap();
    assert_eq!(result.len(), base.len());
    for m in &result.matches {
        assert!((base[m.base_index] - target[m.target_index]).abs() <= 0.1 + 1e-12);
    }
}

#[test]
fn execution_modes_agree() {
    let (base, target) = synthetic_scans(99, 800, (0.02, 0.6), 0.05, 0.1);
    let cfg = SequencerConfig::new(0.05, 0.2, 2).unwrap();
    let reference = cfg.clone().calculate_matches(&base, &target).unwrap();
    for (strategy, parallel) in [
        (SearchStrategy::Binary, false),
        (SearchStrategy::Linear, true),
        (SearchStrategy::Linear, false),
    ] {
        let other = cfg
            .clone()
            .with_strategy(strategy)
            .with_parallel(parallel)
            .calculate_matches(&base, &target)
            .unwrap();
        assert_eq!(other, reference, "{strategy:?} parallel={parallel}");
    }
}

#[test]
fn normalization_is_idempotent() {
    let (base, _) = synthetic_scans(5, 100, (0.1, 1.0), 0.0, 0.0);
    let once = NormalizedSequence::from_lengths(&base).unwrap();
    let sorted: Vec<f64> = once.iter().map(|m| m.length).collect();
    let twice = NormalizedSequence::from_lengths(&sorted).unwrap();
    for (i, m) in twice.iter().enumerate() {
        assert_eq!(m.original_index, i);
        assert_eq!(m.length, sorted[i]);
    }
}

#[test]
fn rolling_score_matches_full_table() {
    let (base, target) = synthetic_scans(3, 120, (0.05, 0.5), 0.1, 0.1);
    let b = NormalizedSequence::from_lengths(&base).unwrap();
    let t = NormalizedSequence::from_lengths(&target).unwrap();
    let aligner = PairwiseAligner::new(0.2);
    let full = aligner.align(b.as_slice(), t.as_slice()).total();
    let rolling = aligner.score(b.as_slice(), t.as_slice());
    assert_eq!(full.score, rolling.score);
    assert!((full.quality - rolling.quality).abs() < 1e-9);
}
