//! Dataset snapshot

use serde::Deserialize;
use serde::Serialize;

use super::Row;
use super::RowId;

/// An immutable snapshot of one uploaded file: its declared columns and its
/// rows in upload order.
///
/// Every row's field names are expected to come from `column_headers`; a
/// header a row lacks displays as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    column_headers: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Creates a dataset from headers and rows.
    pub fn new(column_headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            column_headers,
            rows,
        }
    }

    /// Builds a dataset from header names and positional records, assigning
    /// row ids from `ids` in order.
    ///
    /// Records shorter than the header list leave the trailing fields unset;
    /// extra values are dropped.
    pub fn from_records<I, R>(column_headers: &[&str], ids: I, records: R) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RowId>,
        R: IntoIterator<Item = Vec<String>>,
    {
        let headers: Vec<String> = column_headers.iter().map(|h| h.to_string()).collect();
        let rows = ids
            .into_iter()
            .zip(records)
            .enumerate()
            .map(|(index, (id, values))| {
                let fields = headers.iter().cloned().zip(values).collect();
                Row::with_fields(id, index, fields)
            })
            .collect();
        Self::new(headers, rows)
    }

    /// Returns the declared column names in upload order.
    pub fn column_headers(&self) -> &[String] {
        &self.column_headers
    }

    /// Returns `true` if `column` is one of the declared headers.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_headers.iter().any(|h| h == column)
    }

    /// Returns the rows in upload order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Finds a row by id.
    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
