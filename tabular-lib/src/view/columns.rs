//! Column order and visibility.

use std::collections::HashSet;

use crate::error::ViewError;

/// The display order of a dataset's columns and which of them are shown.
///
/// The order is always a permutation of the dataset headers and the
/// visible set is always a subset of it. Hiding every column is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    order: Vec<String>,
    visible: HashSet<String>,
}

impl ColumnLayout {
    /// Creates a layout showing every header in declared order.
    pub fn new(headers: &[String]) -> Self {
        Self {
            order: headers.to_vec(),
            visible: headers.iter().cloned().collect(),
        }
    }

    /// Returns every column in display order, hidden ones included.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Returns the shown columns in display order.
    pub fn visible_columns(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|name| self.visible.contains(*name))
            .map(String::as_str)
            .collect()
    }

    /// Returns `true` if `name` is shown.
    pub fn is_visible(&self, name: &str) -> bool {
        self.visible.contains(name)
    }

    /// Returns `true` if `name` is one of the layout's columns.
    pub fn contains(&self, name: &str) -> bool {
        self.order.iter().any(|c| c == name)
    }

    /// Shows a hidden column or hides a shown one.
    ///
    /// Returns the new visibility, or `None` if the column is unknown.
    pub fn toggle(&mut self, name: &str) -> Option<bool> {
        if !self.contains(name) {
            return None;
        }
        if self.visible.remove(name) {
            Some(false)
        } else {
            self.visible.insert(name.to_string());
            Some(true)
        }
    }

    /// Shows every column.
    pub fn show_all(&mut self) {
        self.visible = self.order.iter().cloned().collect();
    }

    /// Moves the column at `from` so that it ends up at `to`.
    ///
    /// All other columns keep their relative order.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), ViewError> {
        let len = self.order.len();
        if from >= len || to >= len {
            return Err(ViewError::invalid_index(from, to, len));
        }
        let column = self.order.remove(from);
        self.order.insert(to, column);
        Ok(())
    }

    /// Adapts the layout to a refreshed header list.
    ///
    /// Surviving columns keep their position and visibility, vanished ones
    /// are dropped and new ones are appended visible in declared order.
    pub fn reconcile(&mut self, headers: &[String]) {
        let incoming: HashSet<&str> = headers.iter().map(String::as_str).collect();
        let known: HashSet<String> = self.order.iter().cloned().collect();

        self.order.retain(|c| incoming.contains(c.as_str()));
        self.visible.retain(|c| incoming.contains(c.as_str()));

        for header in headers {
            if !known.contains(header) {
                self.order.push(header.clone());
                self.visible.insert(header.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_toggle() {
        let mut layout = ColumnLayout::new(&headers(&["name", "age"]));
        assert_eq!(layout.toggle("age"), Some(false));
        assert_eq!(layout.visible_columns(), ["name"]);
        assert_eq!(layout.toggle("age"), Some(true));
        assert_eq!(layout.visible_columns(), ["name", "age"]);
        assert_eq!(layout.toggle("email"), None);
    }

    #[test]
    fn test_hide_everything() {
        let mut layout = ColumnLayout::new(&headers(&["a", "b"]));
        layout.toggle("a");
        layout.toggle("b");
        assert!(layout.visible_columns().is_empty());
        assert_eq!(layout.order().len(), 2);

        layout.show_all();
        assert_eq!(layout.visible_columns(), ["a", "b"]);
    }

    #[test]
    fn test_reorder_moves_one_column() {
        let mut layout = ColumnLayout::new(&headers(&["a", "b", "c", "d"]));
        layout.reorder(0, 2).unwrap();
        assert_eq!(layout.order(), headers(&["b", "c", "a", "d"]));
        layout.reorder(3, 0).unwrap();
        assert_eq!(layout.order(), headers(&["d", "b", "c", "a"]));
        layout.reorder(1, 1).unwrap();
        assert_eq!(layout.order(), headers(&["d", "b", "c", "a"]));
    }

    #[test]
    fn test_reorder_rejects_out_of_range() {
        let mut layout = ColumnLayout::new(&headers(&["a", "b"]));
        assert_eq!(layout.reorder(2, 0), Err(ViewError::invalid_index(2, 0, 2)));
        assert_eq!(layout.reorder(0, 2), Err(ViewError::invalid_index(0, 2, 2)));
        assert_eq!(layout.order(), headers(&["a", "b"]));
    }

    #[test]
    fn test_visible_follows_order() {
        let mut layout = ColumnLayout::new(&headers(&["a", "b", "c"]));
        layout.toggle("b");
        layout.reorder(2, 0).unwrap();
        assert_eq!(layout.visible_columns(), ["c", "a"]);
    }

    #[test]
    fn test_reconcile() {
        let mut layout = ColumnLayout::new(&headers(&["a", "b", "c"]));
        layout.reorder(2, 0).unwrap();
        layout.toggle("a");

        layout.reconcile(&headers(&["a", "c", "d"]));
        assert_eq!(layout.order(), headers(&["c", "a", "d"]));
        assert_eq!(layout.visible_columns(), ["c", "d"]);
    }
}
