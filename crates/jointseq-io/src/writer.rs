//! JSON result writer for sequencing runs.

use std::fs;
use std::path::{Path, PathBuf};

use jointseq_align::{SearchStrategy, SequenceResult, SequencerConfig};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::RunName;
use crate::IoError;

/// Writes sequencing results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{run}_matches.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    run: RunName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and run name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), run = %run))]
    pub fn new(output_dir: &Path, run: RunName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            run,
        })
    }

    /// Return the path `write_matches` writes to.
    #[must_use]
    pub fn matches_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}_matches.json", self.run.as_str()))
    }

    /// Write a sequencing result to `{run}_matches.json` and return the path.
    ///
    /// `n_base` and `n_target` are the record counts of the two datasets.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_matches(
        &self,
        config: &SequencerConfig,
        n_base: usize,
        n_target: usize,
        result: &SequenceResult,
    ) -> Result<PathBuf, IoError> {
        let path = self.matches_path();

        let artifact = MatchesArtifact {
            run: self.run.as_str(),
            parameters: Parameters {
                pivot_percentile: config.pivot_percentile(),
                tolerance: config.tolerance(),
                pivot_required: config.pivot_required(),
                base_column: config.base_column(),
                target_column: config.target_column(),
                search: match config.strategy() {
                    SearchStrategy::Binary => "binary",
                    SearchStrategy::Linear => "linear",
                },
                parallel: config.parallel(),
            },
            n_base,
            n_target,
            base_pivots: result.base_pivots,
            target_pivots: result.target_pivots,
            pivot_matches: result.pivot_matches,
            segments_aligned: result.segments_aligned,
            n_matches: result.len(),
            matches: result
                .matches
                .iter()
                .map(|m| MatchEntry {
                    base_index: m.base_index,
                    target_index: m.target_index,
                })
                .collect(),
        };

        let write_err = |source: std::io::Error| IoError::WriteFile {
            path: path.clone(),
            source,
        };
        let json = serde_json::to_string_pretty(&artifact).map_err(|e| write_err(e.into()))?;
        fs::write(&path, json).map_err(write_err)?;

        info!(path = %path.display(), n_matches = result.len(), "matches written");
        Ok(path)
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct MatchesArtifact<'a> {
    run: &'a str,
    parameters: Parameters<'a>,
    n_base: usize,
    n_target: usize,
    base_pivots: usize,
    target_pivots: usize,
    pivot_matches: usize,
    segments_aligned: usize,
    n_matches: usize,
    matches: Vec<MatchEntry>,
}

#[derive(Serialize)]
struct Parameters<'a> {
    pivot_percentile: f64,
    tolerance: f64,
    pivot_required: usize,
    base_column: &'a str,
    target_column: &'a str,
    search: &'static str,
    parallel: bool,
}

#[derive(Serialize)]
struct MatchEntry {
    base_index: usize,
    target_index: usize,
}
