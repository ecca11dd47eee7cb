//! Dataset row

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::RowId;

/// Field values of a row, keyed by column name.
pub type FieldMap = HashMap<String, String>;

/// One record of a dataset.
///
/// A row carries a stable `id` and the `index` it had in upload order. The
/// engine never recomputes either; filtering and sorting only reorder
/// references to rows.
///
/// # Example
///
/// ```
/// use tabular_lib::model::Row;
///
/// let row = Row::new("r1", 0)
///     .set("name", "Bob")
///     .set("age", "30");
///
/// assert_eq!(row.value("name"), "Bob");
/// assert_eq!(row.value("email"), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    id: RowId,
    index: usize,
    fields: FieldMap,
}

impl Row {
    /// Creates a row with no fields.
    pub fn new(id: impl Into<RowId>, index: usize) -> Self {
        Self {
            id: id.into(),
            index,
            fields: FieldMap::new(),
        }
    }

    /// Creates a row from an existing field map.
    pub fn with_fields(id: impl Into<RowId>, index: usize, fields: FieldMap) -> Self {
        Self {
            id: id.into(),
            index,
            fields,
        }
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Returns the row identity.
    pub fn id(&self) -> &RowId {
        &self.id
    }

    /// Returns the position of this row in upload order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the raw field value, if present.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Returns the display value for a column; missing fields read as empty.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Returns all field values.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }
}
