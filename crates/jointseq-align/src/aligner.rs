//! Tolerance-matched pairwise alignment of two measurement sequences.

use tracing::instrument;

use crate::measurement::{Match, Measurement};

/// A matched pair of positions into the two aligned slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedPair {
    /// Position in the base slice.
    pub base: usize,
    /// Position in the target slice.
    pub target: usize,
}

/// Score of the best correspondence: number of matches, then closeness.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlignmentScore {
    /// Number of matched pairs.
    pub score: usize,
    /// Sum of `tolerance - |diff|` over the matched pairs.
    pub quality: f64,
}

impl AlignmentScore {
    /// Highest score wins; equal scores fall back to quality.
    fn beats(&self, other: &Self) -> bool {
        self.score > other.score || (self.score == other.score && self.quality > other.quality)
    }
}

/// Best correspondence between two sequences, ascending in both positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pairs: Vec<AlignedPair>,
    total: AlignmentScore,
}

impl Alignment {
    /// Return the matched pairs in ascending order.
    #[must_use]
    pub fn pairs(&self) -> &[AlignedPair] {
        &self.pairs
    }

    /// Return the score of the alignment.
    #[must_use]
    pub fn total(&self) -> AlignmentScore {
        self.total
    }

    /// Return the number of matched pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Return true if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Map the pairs back to original dataset positions.
    ///
    /// `base` and `target` must be the slices this alignment was computed from.
    #[must_use]
    pub fn to_matches(&self, base: &[Measurement], target: &[Measurement]) -> Vec<Match> {
        self.pairs
            .iter()
            .map(|p| Match::between(&base[p.base], &target[p.target]))
            .collect()
    }
}

/// Move recorded in a DP cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Boundary cell.
    None,
    /// `base[i-1]` matched with `target[j-1]`.
    Diagonal,
    /// `base[i-1]` left unmatched.
    SkipBase,
    /// `target[j-1]` left unmatched.
    SkipTarget,
}

/// Immutable aligner configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairwiseAligner {
    tolerance: f64,
}

impl PairwiseAligner {
    /// Create an aligner matching joints whose lengths differ by at most `tolerance`.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Return the match tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Return the matched closeness `tolerance - diff`, or `None` if out of tolerance.
    fn closeness(&self, a: f64, b: f64) -> Option<f64> {
        let diff = (a - b).abs();
        (diff <= self.tolerance).then(|| self.tolerance - diff)
    }

    /// Pick the winner among the three candidates for one cell.
    ///
    /// A later candidate only displaces an earlier one when it strictly beats
    /// it, so exact ties resolve diagonal, then skip-base, then skip-target.
    fn choose(
        &self,
        diag: AlignmentScore,
        above: AlignmentScore,
        left: AlignmentScore,
        base_len: f64,
        target_len: f64,
    ) -> (AlignmentScore, Step) {
        let mut best = (above, Step::SkipBase);
        if let Some(close) = self.closeness(base_len, target_len) {
            best = (
                AlignmentScore {
                    score: diag.score + 1,
                    quality: diag.quality + close,
                },
                Step::Diagonal,
            );
            if above.beats(&best.0) {
                best = (above, Step::SkipBase);
            }
        }
        if left.beats(&best.0) {
            best = (left, Step::SkipTarget);
        }
        best
    }

    /// Compute only the best score and quality.
    ///
    /// Uses a rolling two-row buffer: O(m * n) time, O(n) space. Always equals
    /// [`align`][Self::align]`(..).total()`.
    #[must_use]
    pub fn score(&self, base: &[Measurement], target: &[Measurement]) -> AlignmentScore {
        let n = target.len();
        let mut prev = vec![AlignmentScore::default(); n + 1];
        let mut curr = vec![AlignmentScore::default(); n + 1];

        for b in base {
            curr[0] = AlignmentScore::default();
            for j in 1..=n {
                let (cell, _) = self.choose(
                    prev[j - 1],
                    prev[j],
                    curr[j - 1],
                    b.length,
                    target[j - 1].length,
                );
                curr[j] = cell;
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        // After the final swap `prev` holds the last completed row.
        prev[n]
    }

    /// Compute the best correspondence between `base` and `target`.
    ///
    /// Fills the full `(m+1) x (n+1)` table with a move per cell, then traces
    /// back from `(m, n)`. O(m * n) time and space. Empty input on either side
    /// yields an empty alignment.
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(m = base.len(), n = target.len()))]
    pub fn align(&self, base: &[Measurement], target: &[Measurement]) -> Alignment {
        let m = base.len();
        let n = target.len();
        let width = n + 1;

        let mut cells = vec![AlignmentScore::default(); (m + 1) * width];
        let mut steps = vec![Step::None; (m + 1) * width];

        for i in 1..=m {
            for j in 1..=n {
                let idx = i * width + j;
                let (cell, step) = self.choose(
                    cells[idx - width - 1],
                    cells[idx - width],
                    cells[idx - 1],
                    base[i - 1].length,
                    target[j - 1].length,
                );
                cells[idx] = cell;
                steps[idx] = step;
            }
        }

        let mut pairs = Vec::new();
        let (mut i, mut j) = (m, n);
        while i > 0 && j > 0 {
            match steps[i * width + j] {
                Step::Diagonal => {
                    pairs.push(AlignedPair {
                        base: i - 1,
                        target: j - 1,
                    });
                    i -= 1;
                    j -= 1;
                }
                Step::SkipBase => i -= 1,
                Step::SkipTarget => j -= 1,
                Step::None => break,
            }
        }
        pairs.reverse();

        Alignment {
            pairs,
            total: cells[m * width + n],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(lengths: &[f64]) -> Vec<Measurement> {
        lengths
            .iter()
            .enumerate()
            .map(|(i, &l)| Measurement::new(i, l))
            .collect()
    }

    fn pairs(alignment: &Alignment) -> Vec<(usize, usize)> {
        alignment.pairs().iter().map(|p| (p.base, p.target)).collect()
    }

    #[test]
    fn identical_sequences_match_diagonally() {
        let a = ms(&[1.0, 2.0, 3.0]);
        let al = PairwiseAligner::new(0.1).align(&a, &a);
        assert_eq!(pairs(&al), vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(al.total().score, 3);
        assert!((al.total().quality - 0.3).abs() < 1e-12);
    }

    #[test]
    fn empty_side_yields_empty() {
        let a = ms(&[1.0, 2.0]);
        let aligner = PairwiseAligner::new(0.5);
        assert!(aligner.align(&a, &[]).is_empty());
        assert!(aligner.align(&[], &a).is_empty());
        assert_eq!(aligner.score(&[], &a), AlignmentScore::default());
    }

    #[test]
    fn out_of_tolerance_never_matches() {
        let a = ms(&[1.0, 5.0]);
        let b = ms(&[2.0, 7.0]);
        let al = PairwiseAligner::new(0.5).align(&a, &b);
        assert!(al.is_empty());
        assert_eq!(al.total().score, 0);
    }

    #[test]
    fn skips_unmatched_elements() {
        // base: 1, 2, 3, 4 ; target: 1, 3.1, 4; base[1] has no partner.
        let a = ms(&[1.0, 2.0, 3.0, 4.0]);
        let b = ms(&[1.0, 3.1, 4.0]);
        let al = PairwiseAligner::new(0.2).align(&a, &b);
        assert_eq!(pairs(&al), vec![(0, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn quality_breaks_score_ties() {
        // Both targets are within tolerance of base[0]; the closer one wins.
        let a = ms(&[1.0]);
        let b = ms(&[0.8, 1.05]);
        let al = PairwiseAligner::new(0.5).align(&a, &b);
        assert_eq!(pairs(&al), vec![(0, 1)]);

        let b_rev = ms(&[0.95, 1.3]);
        let al = PairwiseAligner::new(0.5).align(&a, &b_rev);
        assert_eq!(pairs(&al), vec![(0, 0)]);
    }

    #[test]
    fn score_beats_quality() {
        // One very close match would block two looser ones; the higher count wins.
        let a = ms(&[1.0, 1.2]);
        let b = ms(&[1.19, 1.4]);
        let al = PairwiseAligner::new(0.25).align(&a, &b);
        assert_eq!(pairs(&al), vec![(0, 0), (1, 1)]);
        assert_eq!(al.total().score, 2);
    }

    #[test]
    fn no_crossing_pairs() {
        let a = ms(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let b = ms(&[5.1, 1.1, 2.1, 3.1, 4.1]);
        let al = PairwiseAligner::new(0.2).align(&a, &b);
        assert_eq!(pairs(&al), vec![(0, 1), (1, 2), (2, 3), (3, 4)]);
        for w in al.pairs().windows(2) {
            assert!(w[0].base < w[1].base);
            assert!(w[0].target < w[1].target);
        }
    }

    #[test]
    fn score_matches_align_total() {
        let a = ms(&[0.5, 1.1, 1.9, 3.3, 3.4, 5.0, 6.2]);
        let b = ms(&[0.4, 1.0, 2.2, 3.35, 4.9, 5.1, 6.0, 6.3]);
        let aligner = PairwiseAligner::new(0.3);
        let full = aligner.align(&a, &b).total();
        let rolling = aligner.score(&a, &b);
        assert_eq!(full.score, rolling.score);
        assert!((full.quality - rolling.quality).abs() < 1e-12);
    }

    #[test]
    fn every_pair_within_tolerance() {
        let a = ms(&[0.0, 0.7, 1.4, 2.1, 2.8, 3.5]);
        let b = ms(&[0.2, 0.6, 1.9, 2.0, 3.1, 3.6]);
        let aligner = PairwiseAligner::new(0.35);
        let al = aligner.align(&a, &b);
        assert!(!al.is_empty());
        for p in al.pairs() {
            assert!((a[p.base].length - b[p.target].length).abs() <= 0.35);
        }
    }

    #[test]
    fn to_matches_uses_original_positions() {
        let a = vec![Measurement::new(7, 1.0), Measurement::new(3, 2.0)];
        let b = vec![Measurement::new(0, 1.0), Measurement::new(9, 2.0)];
        let al = PairwiseAligner::new(0.1).align(&a, &b);
        assert_eq!(al.to_matches(&a, &b), vec![Match::new(7, 0), Match::new(3, 9)]);
    }
}
