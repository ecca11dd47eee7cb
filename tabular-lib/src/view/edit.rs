//! Cell edit state machine and optimistic overlay.

use std::collections::HashMap;

use crate::model::FieldMap;
use crate::model::RowId;

/// A cell being edited together with its uncommitted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    row_id: RowId,
    column: String,
    value: String,
}

impl PendingEdit {
    /// Creates a pending edit.
    pub fn new(row_id: RowId, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            row_id,
            column: column.into(),
            value: value.into(),
        }
    }

    /// Returns the edited row.
    pub fn row_id(&self) -> &RowId {
        &self.row_id
    }

    /// Returns the edited column.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the uncommitted value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the uncommitted value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Returns `true` if this edit targets the given cell.
    pub fn is_cell(&self, row_id: &RowId, column: &str) -> bool {
        &self.row_id == row_id && self.column == column
    }
}

/// Edit state: idle, or editing exactly one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(PendingEdit),
}

impl EditState {
    /// Returns the active edit, if any.
    pub fn pending(&self) -> Option<&PendingEdit> {
        match self {
            Self::Idle => None,
            Self::Editing(edit) => Some(edit),
        }
    }

    /// Returns `true` while a cell is being edited.
    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Leaves the state idle and returns the edit that was active.
    pub fn take(&mut self) -> Option<PendingEdit> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Editing(edit) => Some(edit),
        }
    }
}

/// A committed edit, ready to be handed to a row updater.
///
/// `fields` is the complete field map the row should have afterwards.
/// `revision` increases with every commit of a session and identifies this
/// edit when its outcome comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowUpdate {
    pub row_id: RowId,
    pub column: String,
    pub value: String,
    pub fields: FieldMap,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct OverlayEntry {
    value: String,
    revision: u64,
    confirmed: bool,
}

/// Committed edits not yet reflected in the dataset snapshot.
///
/// Consulted only when displaying cells; filtering and sorting see the
/// snapshot.
#[derive(Debug, Clone, Default)]
pub struct EditOverlay {
    entries: HashMap<(RowId, String), OverlayEntry>,
}

impl EditOverlay {
    /// Creates an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a committed edit as unconfirmed.
    pub fn insert(&mut self, update: &RowUpdate) {
        self.entries.insert(
            (update.row_id.clone(), update.column.clone()),
            OverlayEntry {
                value: update.value.clone(),
                revision: update.revision,
                confirmed: false,
            },
        );
    }

    /// Returns the overlaid value of a cell, if any.
    pub fn get(&self, row_id: &RowId, column: &str) -> Option<&str> {
        self.entries
            .get(&(row_id.clone(), column.to_string()))
            .map(|entry| entry.value.as_str())
    }

    /// Returns every overlaid value of a row.
    pub fn row_values<'a>(&'a self, row_id: &'a RowId) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.entries
            .iter()
            .filter(move |((id, _), _)| id == row_id)
            .map(|((_, column), entry)| (column.as_str(), entry.value.as_str()))
    }

    /// Marks an edit as accepted by the updater.
    ///
    /// Ignored if the cell has since been overwritten by a newer edit.
    pub fn confirm(&mut self, update: &RowUpdate) {
        if let Some(entry) = self.entries.get_mut(&(update.row_id.clone(), update.column.clone()))
            && entry.revision == update.revision
        {
            entry.confirmed = true;
        }
    }

    /// Drops an edit rejected by the updater.
    ///
    /// Ignored if the cell has since been overwritten by a newer edit.
    pub fn reject(&mut self, update: &RowUpdate) {
        let key = (update.row_id.clone(), update.column.clone());
        if self.entries.get(&key).is_some_and(|entry| entry.revision == update.revision) {
            self.entries.remove(&key);
        }
    }

    /// Drops confirmed entries and entries for rows `keep` rejects, as when
    /// a refreshed dataset arrives.
    pub fn refresh(&mut self, keep: impl Fn(&RowId, &str) -> bool) {
        self.entries
            .retain(|(row_id, column), entry| !entry.confirmed && keep(row_id, column));
    }

    /// Returns `true` if the cell's value is overlaid and not yet confirmed.
    pub fn is_unconfirmed(&self, row_id: &RowId, column: &str) -> bool {
        self.entries
            .get(&(row_id.clone(), column.to_string()))
            .is_some_and(|entry| !entry.confirmed)
    }

    /// Returns the number of overlaid cells.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is overlaid.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
