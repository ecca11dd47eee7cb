//! Display model produced by the engine.

use crate::model::RowId;

use super::selection::PageSelection;

/// One cell as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    /// Column the cell belongs to.
    pub column: String,
    /// Value to display: the pending value while editing, otherwise the
    /// overlaid or snapshot value.
    pub value: String,
    /// The cell is the one being edited.
    pub editing: bool,
    /// The value comes from a committed edit the updater has not confirmed.
    pub unconfirmed: bool,
}

/// One row as it should be drawn, with cells for visible columns only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub row_id: RowId,
    pub row_index: usize,
    pub selected: bool,
    pub cells: Vec<RenderedCell>,
}

/// The current page, ready for a table widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Visible column names in display order.
    pub headers: Vec<String>,
    pub rows: Vec<RenderedRow>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Rows matching the filter, across all pages.
    pub total_rows: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Selection coverage of this page.
    pub selection: PageSelection,
}
