//! Row selection.

use std::collections::HashSet;

use crate::model::RowId;

/// How much of the current page is selected, for a "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    None,
    Partial,
    All,
}

/// Selected rows by id.
///
/// The set spans the whole dataset: rows stay selected when they scroll off
/// the current page or are hidden by the filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<RowId>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles a row. Returns `true` if the row is now selected.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Selects every given row.
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a RowId>) {
        self.selected.extend(ids.into_iter().cloned());
    }

    /// Deselects every given row.
    pub fn deselect_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a RowId>) {
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Keeps only the rows for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl Fn(&RowId) -> bool) {
        self.selected.retain(|id| keep(id));
    }

    /// Reports how many of the given rows are selected.
    pub fn coverage<'a>(&self, ids: impl IntoIterator<Item = &'a RowId>) -> PageSelection {
        let mut total = 0;
        let mut selected = 0;
        for id in ids {
            total += 1;
            if self.selected.contains(id) {
                selected += 1;
            }
        }
        match selected {
            0 => PageSelection::None,
            n if n == total => PageSelection::All,
            _ => PageSelection::Partial,
        }
    }

    /// Returns the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterates over the selected ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<RowId> {
        names.iter().map(|n| RowId::new(*n)).collect()
    }

    #[test]
    fn test_toggle() {
        let mut selection = Selection::new();
        let id = RowId::new("r1");
        assert!(selection.toggle(&id));
        assert!(selection.is_selected(&id));
        assert!(!selection.toggle(&id));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_coverage() {
        let page = ids(&["a", "b", "c"]);
        let mut selection = Selection::new();
        assert_eq!(selection.coverage(&page), PageSelection::None);

        selection.toggle(&page[1]);
        assert_eq!(selection.coverage(&page), PageSelection::Partial);

        selection.select_all(&page);
        assert_eq!(selection.coverage(&page), PageSelection::All);

        let empty: Vec<RowId> = Vec::new();
        assert_eq!(selection.coverage(&empty), PageSelection::None);
    }

    #[test]
    fn test_page_bulk_ops_leave_other_rows() {
        let page_one = ids(&["a", "b"]);
        let page_two = ids(&["c", "d"]);
        let mut selection = Selection::new();
        selection.select_all(&page_one);
        selection.select_all(&page_two);

        selection.deselect_all(&page_two);
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.coverage(&page_one), PageSelection::All);
    }
}
