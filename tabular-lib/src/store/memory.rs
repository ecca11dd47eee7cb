//! In-memory store implementation using DashMap

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use dashmap::DashMap;
use log::debug;

use super::FileInfo;
use super::FileStore;
use super::ParsedTable;
use super::RowSource;
use super::RowUpdater;
use super::require_caller;
use crate::error::StoreError;
use crate::model::Dataset;
use crate::model::FieldMap;
use crate::model::FileId;
use crate::model::Row;
use crate::model::RowId;
use crate::model::UserId;

#[derive(Debug, Clone)]
struct StoredFile {
    name: String,
    owner: UserId,
    uploaded_at: DateTime<Utc>,
    headers: Vec<String>,
    rows: Vec<Row>,
}

impl StoredFile {
    fn info(&self, id: &FileId) -> FileInfo {
        FileInfo {
            id: id.clone(),
            name: self.name.clone(),
            owner: self.owner.clone(),
            uploaded_at: self.uploaded_at,
            row_count: self.rows.len(),
        }
    }

    fn dataset(&self) -> Dataset {
        Dataset::new(self.headers.clone(), self.rows.clone())
    }

    fn authorize(&self, caller: &UserId) -> Result<(), StoreError> {
        if &self.owner == caller {
            Ok(())
        } else {
            Err(StoreError::NotAuthorized)
        }
    }
}

/// A file and row store backed by concurrent hash maps.
///
/// Implements [`RowSource`], [`RowUpdater`] and [`FileStore`]. Data is lost
/// when the store is dropped.
///
/// # Example
///
/// ```
/// use tabular_lib::store::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    files: DashMap<FileId, StoredFile>,
    /// Owning file of every stored row.
    row_index: DashMap<RowId, FileId>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            files: DashMap::new(),
            row_index: DashMap::new(),
        }
    }

    /// Returns the number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if no files are stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the number of stored rows across all files.
    pub fn row_count(&self) -> usize {
        self.row_index.len()
    }
}

#[async_trait]
impl RowSource for InMemoryStore {
    async fn fetch_dataset(
        &self,
        caller: Option<&UserId>,
        file_id: &FileId,
    ) -> Result<Dataset, StoreError> {
        let caller = require_caller(caller)?;
        let file = self
            .files
            .get(file_id)
            .ok_or_else(|| StoreError::file_not_found(file_id))?;
        file.authorize(caller)?;
        Ok(file.dataset())
    }
}

#[async_trait]
impl RowUpdater for InMemoryStore {
    async fn update_row(
        &self,
        caller: Option<&UserId>,
        row_id: &RowId,
        mut fields: FieldMap,
    ) -> Result<Row, StoreError> {
        let caller = require_caller(caller)?;
        let file_id = self
            .row_index
            .get(row_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::row_not_found(row_id))?;

        let mut file = self
            .files
            .get_mut(&file_id)
            .ok_or_else(|| StoreError::row_not_found(row_id))?;
        file.authorize(caller)?;

        // Fields outside the declared headers are dropped.
        let StoredFile { headers, rows, .. } = &mut *file;
        fields.retain(|column, _| headers.contains(column));

        let row = rows
            .iter_mut()
            .find(|row| row.id() == row_id)
            .ok_or_else(|| StoreError::row_not_found(row_id))?;
        *row = Row::with_fields(row_id.clone(), row.index(), fields);
        debug!("updated row {row_id} in file {file_id}");
        Ok(row.clone())
    }
}

#[async_trait]
impl FileStore for InMemoryStore {
    async fn list_files(&self, caller: Option<&UserId>) -> Result<Vec<FileInfo>, StoreError> {
        let caller = require_caller(caller)?;
        let mut files: Vec<FileInfo> = self
            .files
            .iter()
            .filter(|entry| &entry.value().owner == caller)
            .map(|entry| entry.value().info(entry.key()))
            .collect();
        files.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then_with(|| a.id.cmp(&b.id)));
        Ok(files)
    }

    async fn upload_file(
        &self,
        caller: Option<&UserId>,
        name: &str,
        table: ParsedTable,
    ) -> Result<(FileId, Dataset), StoreError> {
        let caller = require_caller(caller)?;
        if table.headers.is_empty() {
            return Err(StoreError::NoColumns);
        }
        if table.records.is_empty() {
            return Err(StoreError::EmptyFile);
        }

        let file_id = FileId::generate();
        let rows: Vec<Row> = table
            .records
            .into_iter()
            .enumerate()
            .map(|(index, values)| {
                let fields = table.headers.iter().cloned().zip(values).collect();
                Row::with_fields(RowId::generate(), index, fields)
            })
            .collect();

        for row in &rows {
            self.row_index.insert(row.id().clone(), file_id.clone());
        }
        let file = StoredFile {
            name: name.to_string(),
            owner: caller.clone(),
            uploaded_at: Utc::now(),
            headers: table.headers,
            rows,
        };
        let dataset = file.dataset();
        debug!("stored file {file_id} ({}) with {} rows", file.name, dataset.len());
        self.files.insert(file_id.clone(), file);
        Ok((file_id, dataset))
    }

    async fn delete_file(
        &self,
        caller: Option<&UserId>,
        file_id: &FileId,
    ) -> Result<(), StoreError> {
        let caller = require_caller(caller)?;
        {
            let file = self
                .files
                .get(file_id)
                .ok_or_else(|| StoreError::file_not_found(file_id))?;
            file.authorize(caller)?;
        }

        if let Some((_, file)) = self.files.remove(file_id) {
            for row in &file.rows {
                self.row_index.remove(row.id());
            }
            debug!("deleted file {file_id} and {} rows", file.rows.len());
        }
        Ok(())
    }
}
