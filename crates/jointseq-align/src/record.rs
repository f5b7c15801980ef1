//! Typed access to the length field of an input record.

use std::collections::{BTreeMap, HashMap};

use crate::error::AlignError;

/// A single field value as seen by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// An already-numeric value.
    Number(f64),
    /// A textual value that still has to be parsed.
    Text(&'a str),
}

/// A keyed record that can expose a named field.
///
/// Implementations return `None` when the field is absent. Values that are
/// present but not numeric should be surfaced as [`FieldValue::Text`] so that
/// the normalizer can report them verbatim.
pub trait Record {
    /// Look up the field called `name`.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// A bare length is a record whose single field answers to any name.
impl Record for f64 {
    fn field(&self, _name: &str) -> Option<FieldValue<'_>> {
        Some(FieldValue::Number(*self))
    }
}

impl Record for HashMap<String, f64> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).copied().map(FieldValue::Number)
    }
}

impl Record for BTreeMap<String, f64> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).copied().map(FieldValue::Number)
    }
}

impl Record for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|v| FieldValue::Text(v.as_str()))
    }
}

impl Record for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.get(name).map(|v| FieldValue::Text(v.as_str()))
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        (**self).field(name)
    }
}

/// Extract the length stored under `column` in `record`.
///
/// `index` is the record's position in its dataset and only feeds error reporting.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`AlignError::MissingField`] | `column` is absent from the record |
/// | [`AlignError::InvalidValue`] | The value is not a finite number |
pub fn extract_length<R: Record + ?Sized>(
    record: &R,
    column: &str,
    index: usize,
) -> Result<f64, AlignError> {
    let invalid = |raw: String| AlignError::InvalidValue {
        column: column.to_string(),
        record: index,
        raw,
    };

    let value = match record.field(column) {
        None => {
            return Err(AlignError::MissingField {
                column: column.to_string(),
                record: index,
            });
        }
        Some(FieldValue::Number(v)) => v,
        Some(FieldValue::Text(raw)) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(raw.to_string()))?,
    };

    if !value.is_finite() {
        return Err(invalid(value.to_string()));
    }
    Ok(value)
}
