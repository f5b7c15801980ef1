//! Domain types for jointseq-io.

use std::path::Path;

use crate::record::DataRecord;
use crate::IoError;

/// A validated run name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunName(String);

impl RunName {
    /// Parse and validate a run name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidRunName`] if the name is empty or contains
    /// characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidRunName { name });
        }
        Ok(Self(name))
    }

    /// Return the run name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// On-disk layout of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A top-level JSON array of objects.
    Json,
}

impl DatasetFormat {
    /// Detect the format from the file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] for any extension other than
    /// `csv` or `json`.
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            _ => Err(IoError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Records loaded from one dataset file, in file order.
///
/// Produced by [`DatasetReader`](crate::DatasetReader). A record's position in
/// [`records`](Self::records) is the index reported in matches.
#[derive(Debug)]
pub struct Dataset {
    format: DatasetFormat,
    records: Vec<DataRecord>,
}

impl Dataset {
    pub(crate) fn new(format: DatasetFormat, records: Vec<DataRecord>) -> Self {
        Self { format, records }
    }

    /// Return the format the dataset was read from.
    #[must_use]
    pub fn format(&self) -> DatasetFormat {
        self.format
    }

    /// Return the records.
    #[must_use]
    pub fn records(&self) -> &[DataRecord] {
        &self.records
    }

    /// Return the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return true if the file held no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
