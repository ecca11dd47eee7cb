//! Collaborator boundary
//!
//! The engine reads datasets from a [`RowSource`], sends committed edits to
//! a [`RowUpdater`] and leaves file management to a [`FileStore`]. Every
//! operation takes the caller's identity and must fail with
//! [`StoreError::NotAuthorized`] before touching data when it is absent.
//!
//! [`InMemoryStore`] implements all three for tests and embedding.

mod memory;

pub use memory::*;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::StoreError;
use crate::model::Dataset;
use crate::model::FieldMap;
use crate::model::FileId;
use crate::model::Row;
use crate::model::RowId;
use crate::model::UserId;

/// A file as listed for its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub id: FileId,
    pub name: String,
    pub owner: UserId,
    pub uploaded_at: DateTime<Utc>,
    pub row_count: usize,
}

/// Tabular content that has already been parsed out of an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Column names in file order.
    pub headers: Vec<String>,
    /// One positional value list per record.
    pub records: Vec<Vec<String>>,
}

impl ParsedTable {
    /// Creates a parsed table.
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }
}

/// Loads the dataset of a file.
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Returns the dataset of `file_id`.
    ///
    /// Fails with `NotAuthorized` unless the caller owns the file, and with
    /// `NotFound` if the file does not exist.
    async fn fetch_dataset(
        &self,
        caller: Option<&UserId>,
        file_id: &FileId,
    ) -> Result<Dataset, StoreError>;
}

/// Persists edited rows.
#[async_trait]
pub trait RowUpdater: Send + Sync {
    /// Replaces the fields of a row and returns the stored row.
    ///
    /// Only columns declared by the row's file are stored.
    ///
    /// Fails with `NotFound` if the row no longer exists and with
    /// `NotAuthorized` unless the caller owns its file.
    async fn update_row(
        &self,
        caller: Option<&UserId>,
        row_id: &RowId,
        fields: FieldMap,
    ) -> Result<Row, StoreError>;
}

/// Manages uploaded files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Lists the caller's files, oldest first.
    async fn list_files(&self, caller: Option<&UserId>) -> Result<Vec<FileInfo>, StoreError>;

    /// Stores a parsed upload and returns its id and dataset.
    ///
    /// Fails with `NoColumns` if there are no headers and `EmptyFile` if
    /// there are no records.
    async fn upload_file(
        &self,
        caller: Option<&UserId>,
        name: &str,
        table: ParsedTable,
    ) -> Result<(FileId, Dataset), StoreError>;

    /// Deletes a file together with its rows.
    async fn delete_file(&self, caller: Option<&UserId>, file_id: &FileId)
    -> Result<(), StoreError>;
}

/// Resolves the caller identity or fails with `NotAuthorized`.
pub fn require_caller(caller: Option<&UserId>) -> Result<&UserId, StoreError> {
    caller.ok_or(StoreError::NotAuthorized)
}
