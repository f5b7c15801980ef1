//! End-to-end integration tests: CSV/JSON -> sequencing -> JSON -> deserialize.

use std::fs;
use std::path::{Path, PathBuf};

use jointseq_align::{AlignError, CancellationToken, SequencerConfig};
use jointseq_io::{align_files, DatasetReader, IoError, ResultWriter, RunName};
use tempfile::TempDir;

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn config() -> SequencerConfig {
    SequencerConfig::new(0.5, 0.5, 2).unwrap()
}

#[test]
fn csv_against_json_round_trip() {
    // 1. Read and align
    let run = align_files(
        &fixture_path("scenario_a_base.csv"),
        &fixture_path("scenario_a_target.json"),
        &config(),
        None,
    )
    .expect("fixtures should align");
    assert_eq!(run.n_base, 5);
    assert_eq!(run.n_target, 5);
    assert_eq!(
        run.result.index_pairs(),
        vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]
    );

    // 2. Write JSON artifact
    let dir = TempDir::new().unwrap();
    let writer = ResultWriter::new(dir.path(), RunName::new("scenario_a".into()).unwrap()).unwrap();
    let path = writer
        .write_matches(&config(), run.n_base, run.n_target, &run.result)
        .unwrap();

    // 3. Deserialize back and verify
    let content: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(content["run"], "scenario_a");
    assert_eq!(content["n_matches"], 5);
    assert_eq!(content["pivot_matches"], 5);
    let matches = content["matches"].as_array().unwrap();
    for (i, m) in matches.iter().enumerate() {
        assert_eq!(m["base_index"].as_u64().unwrap(), i as u64);
        assert_eq!(m["target_index"].as_u64().unwrap(), i as u64);
    }
}

#[test]
fn custom_columns_with_reordered_target() {
    let cfg = config()
        .with_base_column("baseLength")
        .unwrap()
        .with_target_column("targetLength")
        .unwrap();
    let run = align_files(
        &fixture_path("scenario_d_base.csv"),
        &fixture_path("scenario_d_target.csv"),
        &cfg,
        None,
    )
    .unwrap();
    assert_eq!(
        run.result.index_pairs(),
        vec![(0, 2), (1, 4), (2, 1), (3, 3), (4, 0)]
    );
}

#[test]
fn default_column_missing_from_custom_fixture() {
    let result = align_files(
        &fixture_path("scenario_d_base.csv"),
        &fixture_path("scenario_d_target.csv"),
        &config(),
        None,
    );
    assert!(
        matches!(result, Err(IoError::Align(AlignError::MissingField { record: 0, .. }))),
        "got: {result:?}"
    );
}

#[test]
fn invalid_length_is_reported_with_position() {
    let result = align_files(
        &fixture_path("invalid_length.csv"),
        &fixture_path("scenario_a_target.json"),
        &config(),
        None,
    );
    let err = result.unwrap_err();
    assert!(matches!(err, IoError::Align(AlignError::InvalidValue { record: 1, .. })));
    assert!(err.to_string().contains("Invalid length value"));
}

#[test]
fn empty_cell_is_a_missing_field() {
    let result = align_files(
        &fixture_path("missing_length.csv"),
        &fixture_path("scenario_a_target.json"),
        &config(),
        None,
    );
    assert!(matches!(
        result,
        Err(IoError::Align(AlignError::MissingField { record: 1, .. }))
    ));
}

#[test]
fn empty_file_gives_empty_result() {
    let run = align_files(
        &fixture_path("empty.csv"),
        &fixture_path("scenario_a_target.json"),
        &config(),
        None,
    )
    .unwrap();
    assert_eq!(run.n_base, 0);
    assert!(run.result.is_empty());
}

#[test]
fn cancelled_run_is_an_error() {
    let token = CancellationToken::new();
    token.cancel();
    let result = align_files(
        &fixture_path("scenario_a_base.csv"),
        &fixture_path("scenario_a_target.json"),
        &config(),
        Some(&token),
    );
    assert!(matches!(result, Err(IoError::Align(AlignError::Cancelled))));
}

#[test]
fn reader_fixture_files_match_expected_errors() {
    // jagged.csv -> InconsistentRowLength
    let result = DatasetReader::new(&fixture_path("jagged.csv")).read();
    assert!(
        matches!(result, Err(IoError::InconsistentRowLength { .. })),
        "jagged.csv should give InconsistentRowLength, got: {result:?}"
    );

    // not_array.json -> JsonShape
    let result = DatasetReader::new(&fixture_path("not_array.json")).read();
    assert!(
        matches!(result, Err(IoError::JsonShape { .. })),
        "not_array.json should give JsonShape, got: {result:?}"
    );

    // missing file -> FileNotFound
    let result = DatasetReader::new(&fixture_path("does_not_exist.csv")).read();
    assert!(matches!(result, Err(IoError::FileNotFound { .. })));
}
