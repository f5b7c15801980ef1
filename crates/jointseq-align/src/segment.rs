//! Extraction of the joints lying strictly between two anchor lengths.

use crate::measurement::Measurement;
use crate::search::SearchStrategy;

/// Return the contiguous run of `items` with `start < length < end`.
///
/// `items` must be sorted ascending by length. Both bounds are exclusive, so
/// joints sharing an anchor's exact length never enter the segment. Returns an
/// empty slice when `start >= end` or nothing qualifies.
#[must_use]
pub fn between(
    items: &[Measurement],
    start: f64,
    end: f64,
    strategy: SearchStrategy,
) -> &[Measurement] {
    if start >= end {
        return &[];
    }
    let lo = strategy.first_above(items, start);
    let hi = strategy.first_at_least(items, lo, end);
    &items[lo..hi]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(lengths: &[f64]) -> Vec<Measurement> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, &l)| Measurement::new(i, l))
            .collect()
    }

    fn lengths(seg: &[Measurement]) -> Vec<f64> {
        seg.iter().map(|m| m.length).collect()
    }

    #[test]
    fn bounds_are_exclusive() {
        let xs = items(&[1.0, 2.0, 2.5, 3.0, 4.0, 5.0]);
        for s in [SearchStrategy::Linear, SearchStrategy::Binary] {
            assert_eq!(lengths(between(&xs, 2.0, 4.0, s)), vec![2.5, 3.0]);
        }
    }

    #[test]
    fn duplicate_anchor_lengths_excluded() {
        let xs = items(&[1.0, 1.0, 1.5, 2.0, 2.0]);
        assert_eq!(lengths(between(&xs, 1.0, 2.0, SearchStrategy::Binary)), vec![1.5]);
    }

    #[test]
    fn original_positions_preserved() {
        let xs = items(&[1.0, 2.0, 3.0, 4.0]);
        let seg = between(&xs, 1.0, 4.0, SearchStrategy::Binary);
        let idx: Vec<usize> = seg.iter().map(|m| m.original_index).collect();
        assert_eq!(idx, vec![1, 2]);
    }

    #[test]
    fn empty_when_nothing_between() {
        let xs = items(&[1.0, 2.0, 3.0]);
        assert!(between(&xs, 1.0, 2.0, SearchStrategy::Binary).is_empty());
        assert!(between(&xs, 3.0, 10.0, SearchStrategy::Linear).is_empty());
    }

    #[test]
    fn empty_when_bounds_inverted_or_equal() {
        let xs = items(&[1.0, 2.0, 3.0]);
        assert!(between(&xs, 3.0, 1.0, SearchStrategy::Binary).is_empty());
        assert!(between(&xs, 2.0, 2.0, SearchStrategy::Binary).is_empty());
    }
}
