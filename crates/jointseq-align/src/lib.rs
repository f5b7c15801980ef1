//! Pivot-anchored tolerance alignment of scalar measurement sequences.
//!
//! Pure computation, zero I/O. Two datasets of joints are normalized into
//! length-sorted sequences, sparse tolerance-separated pivots are aligned with
//! a score/quality dynamic program, and the joints between consecutive aligned
//! pivots are realigned independently (in parallel with rayon when enabled).

mod aligner;
mod cancel;
mod config;
mod error;
mod measurement;
mod normalize;
mod pivot;
mod record;
mod result;
mod search;
mod segment;
mod sequencer;

pub use aligner::{AlignedPair, Alignment, AlignmentScore, PairwiseAligner};
pub use cancel::CancellationToken;
pub use config::{SequencerConfig, DEFAULT_LENGTH_COLUMN};
pub use error::AlignError;
pub use measurement::{Match, Measurement};
pub use normalize::NormalizedSequence;
pub use pivot::{PivotSelector, PivotSet};
pub use record::{extract_length, FieldValue, Record};
pub use result::SequenceResult;
pub use search::SearchStrategy;
pub use segment::between as segment_between;
