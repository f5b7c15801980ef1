//! Record types produced by the dataset readers.

use std::collections::HashMap;
use std::sync::Arc;

use jointseq_align::{FieldValue, Record};
use serde_json::{Map, Value};

/// One CSV data row, addressed by header name.
///
/// All rows of a file share the same header index. Empty cells are treated
/// as absent fields.
#[derive(Debug, Clone)]
pub struct CsvRecord {
    header: Arc<HashMap<String, usize>>,
    values: csv::StringRecord,
}

impl CsvRecord {
    pub(crate) fn new(header: Arc<HashMap<String, usize>>, values: csv::StringRecord) -> Self {
        Self { header, values }
    }

    /// Return the raw cell under `column`, if the column exists.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        let &i = self.header.get(column)?;
        self.values.get(i)
    }
}

impl Record for CsvRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name)
            .filter(|raw| !raw.trim().is_empty())
            .map(FieldValue::Text)
    }
}

/// Build the column-name index for a CSV header. The first occurrence of a
/// duplicated name wins.
pub(crate) fn header_index(header: &csv::StringRecord) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(header.len());
    for (i, name) in header.iter().enumerate() {
        index.entry(name.to_string()).or_insert(i);
    }
    index
}

/// One object from a JSON array dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecord(Map<String, Value>);

impl JsonRecord {
    /// Wrap a JSON object.
    #[must_use]
    pub fn new(object: Map<String, Value>) -> Self {
        Self(object)
    }

    /// Return the underlying object.
    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for JsonRecord {
    fn from(object: Map<String, Value>) -> Self {
        Self(object)
    }
}

impl Record for JsonRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        // Non-numeric values surface as text so the error shows what was found.
        let value = match self.0.get(name)? {
            Value::Number(n) => return n.as_f64().map(FieldValue::Number),
            Value::String(s) => FieldValue::Text(s),
            Value::Bool(true) => FieldValue::Text("true"),
            Value::Bool(false) => FieldValue::Text("false"),
            Value::Null => FieldValue::Text("null"),
            Value::Array(_) => FieldValue::Text("<array>"),
            Value::Object(_) => FieldValue::Text("<object>"),
        };
        Some(value)
    }
}

/// A record read from either supported format.
#[derive(Debug, Clone)]
pub enum DataRecord {
    /// A CSV row.
    Csv(CsvRecord),
    /// A JSON object.
    Json(JsonRecord),
}

impl Record for DataRecord {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self {
            Self::Csv(r) => r.field(name),
            Self::Json(r) => r.field(name),
        }
    }
}
