//! CSV and JSON dataset reader.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::domain::{Dataset, DatasetFormat};
use crate::record::{header_index, CsvRecord, DataRecord, JsonRecord};
use crate::IoError;

/// Reads a dataset of joint records from a CSV or JSON file.
///
/// The format is chosen from the file extension:
/// - `.csv`: header row required, one record per row, cells addressed by
///   header name. Empty cells count as missing fields.
/// - `.json`: a top-level array of objects, one record per object.
///
/// A file with no data (empty body, header only, or `[]`) yields an empty
/// dataset. Length columns are not validated here; the engine reports
/// missing or malformed values with the record position.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::UnsupportedFormat`] | Extension is not `.csv` or `.json` |
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::JsonParse`] | Malformed JSON |
/// | [`IoError::JsonShape`] | JSON is not an array of objects |
pub struct DatasetReader {
    path: PathBuf,
}

impl DatasetReader {
    /// Create a new reader for the given dataset path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read the dataset file.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Dataset, IoError> {
        let format = DatasetFormat::from_path(&self.path)?;
        let records = match format {
            DatasetFormat::Csv => self.read_csv()?,
            DatasetFormat::Json => self.read_json()?,
        };
        info!(?format, n_records = records.len(), "dataset loaded");
        Ok(Dataset::new(format, records))
    }

    fn read_csv(&self) -> Result<Vec<DataRecord>, IoError> {
        let file = fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) lets the row-length check below report the row.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?.clone();
        let expected = header.len();
        let index = Arc::new(header_index(&header));
        debug!(columns = expected, "read CSV header");

        let mut records = Vec::new();
        for (row_index, result) in rdr.records().enumerate() {
            let row = result.map_err(|e| self.csv_error(e))?;
            if row.len() != expected {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected,
                    got: row.len(),
                });
            }
            records.push(DataRecord::Csv(CsvRecord::new(Arc::clone(&index), row)));
        }
        Ok(records)
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }

    fn read_json(&self) -> Result<Vec<DataRecord>, IoError> {
        let body = fs::read_to_string(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;
        if body.trim().is_empty() {
            debug!("empty JSON body");
            return Ok(Vec::new());
        }

        let value: Value = serde_json::from_str(&body).map_err(|e| IoError::JsonParse {
            path: self.path.clone(),
            source: e,
        })?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(IoError::JsonShape {
                    path: self.path.clone(),
                    detail: format!("top-level value must be an array, found {}", kind(&other)),
                });
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(DataRecord::Json(JsonRecord::new(map))),
                other => Err(IoError::JsonShape {
                    path: self.path.clone(),
                    detail: format!("element {i} must be an object, found {}", kind(&other)),
                }),
            })
            .collect()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
