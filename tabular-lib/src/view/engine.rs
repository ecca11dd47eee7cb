//! The tabular view engine.

use log::debug;
use log::trace;
use log::warn;

use crate::commit::CommitOutcome;
use crate::config::ViewConfig;
use crate::error::ViewError;
use crate::model::Dataset;
use crate::model::Row;
use crate::model::RowId;

use super::edit::EditOverlay;
use super::edit::EditState;
use super::edit::PendingEdit;
use super::edit::RowUpdate;
use super::page::Page;
use super::page::clamp_page;
use super::render::RenderedCell;
use super::render::RenderedPage;
use super::render::RenderedRow;
use super::selection::PageSelection;
use super::sort::SortSpec;
use super::sort::next_sort;
use super::state::ViewState;

/// A viewer session over one dataset.
///
/// `TabularView` owns the dataset snapshot, the session's [`ViewState`] and
/// the overlay of committed-but-unconfirmed edits. Every command runs to
/// completion synchronously; committed edits are returned as [`RowUpdate`]s
/// for the caller to dispatch, typically through an
/// [`EditCommitter`](crate::commit::EditCommitter).
///
/// # Example
///
/// ```
/// use tabular_lib::model::{Dataset, Row};
/// use tabular_lib::view::TabularView;
///
/// let dataset = Dataset::new(
///     vec!["name".into(), "age".into()],
///     vec![
///         Row::new("r1", 0).set("name", "Bob").set("age", "30"),
///         Row::new("r2", 1).set("name", "Al").set("age", "25"),
///     ],
/// );
///
/// let mut view = TabularView::new(dataset);
/// view.toggle_sort("name");
///
/// let names: Vec<_> = view.current_page_rows().iter().map(|r| r.value("name")).collect();
/// assert_eq!(names, ["Al", "Bob"]);
/// ```
#[derive(Debug, Clone)]
pub struct TabularView {
    dataset: Dataset,
    state: ViewState,
    overlay: EditOverlay,
    config: ViewConfig,
    /// Revision stamped on the most recent commit.
    revision: u64,
}

impl TabularView {
    /// Creates a session with the default configuration.
    pub fn new(dataset: Dataset) -> Self {
        Self::with_config(dataset, ViewConfig::default())
    }

    /// Creates a session with the given configuration.
    pub fn with_config(dataset: Dataset, config: ViewConfig) -> Self {
        let state = ViewState::new(&dataset, config.page_size);
        Self {
            dataset,
            state,
            overlay: EditOverlay::new(),
            config,
            revision: 0,
        }
    }

    /// Returns the dataset snapshot.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Returns the view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the overlay of unconfirmed edits.
    pub fn overlay(&self) -> &EditOverlay {
        &self.overlay
    }

    // =========================================================================
    // Derivations
    // =========================================================================

    /// Returns the filtered and sorted rows across all pages.
    pub fn derived_rows(&self) -> Vec<&Row> {
        let rows = self.state.derived_rows(&self.dataset);
        trace!("derived {} of {} rows", rows.len(), self.dataset.len());
        rows
    }

    /// Returns the current page.
    pub fn page(&self) -> Page<'_> {
        self.state.page(&self.dataset)
    }

    /// Returns the rows on the current page.
    pub fn current_page_rows(&self) -> Vec<&Row> {
        self.page().into_rows()
    }

    /// Returns the number of pages.
    pub fn total_pages(&self) -> usize {
        self.page().total_pages()
    }

    /// Returns the 1-based current page.
    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Returns the visible column names in display order.
    pub fn visible_columns(&self) -> Vec<&str> {
        self.state.columns.visible_columns()
    }

    /// Returns the value displayed for a cell: the overlaid value of an
    /// unconfirmed edit when optimistic edits are enabled, otherwise the
    /// snapshot value.
    pub fn cell_value<'a>(&'a self, row: &'a Row, column: &str) -> &'a str {
        if self.config.optimistic_edits
            && let Some(value) = self.overlay.get(row.id(), column)
        {
            return value;
        }
        row.value(column)
    }

    /// Builds the display model for the current page.
    pub fn render(&self) -> RenderedPage {
        let page = self.page();
        let headers: Vec<String> = self
            .visible_columns()
            .into_iter()
            .map(str::to_string)
            .collect();
        let editing = self.state.edit.pending();

        let rows = page
            .rows()
            .iter()
            .map(|row| {
                let cells = headers
                    .iter()
                    .map(|column| {
                        let edit = editing.filter(|edit| edit.is_cell(row.id(), column));
                        let value = match edit {
                            Some(edit) => edit.value().to_string(),
                            None => self.cell_value(row, column).to_string(),
                        };
                        RenderedCell {
                            column: column.clone(),
                            value,
                            editing: edit.is_some(),
                            unconfirmed: self.config.optimistic_edits
                                && self.overlay.is_unconfirmed(row.id(), column),
                        }
                    })
                    .collect();
                RenderedRow {
                    row_id: row.id().clone(),
                    row_index: row.index(),
                    selected: self.state.selection.is_selected(row.id()),
                    cells,
                }
            })
            .collect();

        RenderedPage {
            headers,
            rows,
            current_page: page.number(),
            total_pages: page.total_pages(),
            total_rows: page.total_rows(),
            has_prev: page.has_prev(),
            has_next: page.has_next(),
            selection: self.state.selection.coverage(page.rows().iter().map(|r| r.id())),
        }
    }

    // =========================================================================
    // Filter, sort, paging
    // =========================================================================

    /// Replaces the filter text and clamps the current page.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.state.filter_text = text.into();
        self.state.clamp_page(&self.dataset);
        debug!(
            "filter set to {:?}, page {}",
            self.state.filter_text, self.state.current_page
        );
    }

    /// Sorts by `column`, flipping direction if it is already the sorted
    /// column. Returns the new sort, or `None` for an unknown column.
    pub fn toggle_sort(&mut self, column: &str) -> Option<&SortSpec> {
        if !self.dataset.has_column(column) {
            debug!("ignoring sort on unknown column {column:?}");
            return None;
        }
        let sort = next_sort(self.state.sort.as_ref(), column);
        debug!("sort set to {:?} {:?}", sort.column(), sort.direction());
        self.state.sort = Some(sort);
        self.state.sort.as_ref()
    }

    /// Returns to dataset order.
    pub fn clear_sort(&mut self) {
        self.state.sort = None;
    }

    /// Moves to `page`, clamped into the valid range. Returns the page now
    /// shown.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.state.current_page = clamp_page(page, self.total_pages());
        self.state.current_page
    }

    /// Moves to the next page. Returns `false` on the last page.
    pub fn next_page(&mut self) -> bool {
        let before = self.state.current_page;
        self.set_page(before.saturating_add(1)) != before
    }

    /// Moves to the previous page. Returns `false` on the first page.
    pub fn prev_page(&mut self) -> bool {
        let before = self.state.current_page;
        self.set_page(before.saturating_sub(1)) != before
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Shows or hides a column. Returns the new visibility, or `None` for an
    /// unknown column.
    pub fn toggle_column(&mut self, name: &str) -> Option<bool> {
        let visible = self.state.columns.toggle(name);
        debug!("column {name:?} visible: {visible:?}");
        visible
    }

    /// Shows every column.
    pub fn show_all_columns(&mut self) {
        self.state.columns.show_all();
    }

    /// Moves the column at `from` to position `to` in the display order.
    pub fn reorder_column(&mut self, from: usize, to: usize) -> Result<(), ViewError> {
        self.state.columns.reorder(from, to)?;
        debug!("moved column {from} to {to}");
        Ok(())
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// Returns the active edit, if any.
    pub fn editing(&self) -> Option<&PendingEdit> {
        self.state.edit.pending()
    }

    /// Starts editing a cell, seeding the pending value with what the cell
    /// currently displays.
    ///
    /// An edit already in progress is discarded. Returns `false`, leaving
    /// the state untouched, if the row or column does not exist.
    pub fn begin_edit(&mut self, row_id: &RowId, column: &str) -> bool {
        if !self.dataset.has_column(column) {
            return false;
        }
        let Some(row) = self.dataset.row(row_id) else {
            return false;
        };
        let value = self.cell_value(row, column).to_string();

        if let Some(discarded) = self.state.edit.take() {
            debug!(
                "discarding uncommitted edit of {}:{}",
                discarded.row_id(),
                discarded.column()
            );
        }
        debug!("editing {row_id}:{column}");
        self.state.edit = EditState::Editing(PendingEdit::new(row_id.clone(), column, value));
        true
    }

    /// Replaces the pending value. Returns `false` when idle.
    pub fn set_pending_value(&mut self, value: impl Into<String>) -> bool {
        match &mut self.state.edit {
            EditState::Editing(edit) => {
                edit.set_value(value);
                true
            }
            EditState::Idle => false,
        }
    }

    /// Commits the active edit and returns to idle.
    ///
    /// The returned update carries the row's complete field map with the
    /// new value applied; with optimistic edits enabled it also carries the
    /// row's other unconfirmed edits so they are not reverted. Returns
    /// `None` when idle.
    pub fn commit_edit(&mut self) -> Option<RowUpdate> {
        let edit = self.state.edit.take()?;
        let Some(row) = self.dataset.row(edit.row_id()) else {
            warn!("dropping edit of vanished row {}", edit.row_id());
            return None;
        };

        let mut fields = row.fields().clone();
        if self.config.optimistic_edits {
            for (column, value) in self.overlay.row_values(row.id()) {
                fields.insert(column.to_string(), value.to_string());
            }
        }
        fields.insert(edit.column().to_string(), edit.value().to_string());

        self.revision += 1;
        let update = RowUpdate {
            row_id: edit.row_id().clone(),
            column: edit.column().to_string(),
            value: edit.value().to_string(),
            fields,
            revision: self.revision,
        };
        if self.config.optimistic_edits {
            self.overlay.insert(&update);
        }
        debug!(
            "committed edit of {}:{} (revision {})",
            update.row_id, update.column, update.revision
        );
        Some(update)
    }

    /// Abandons the active edit. Returns `false` when idle.
    pub fn cancel_edit(&mut self) -> bool {
        self.state.edit.take().is_some()
    }

    /// Feeds the result of a dispatched commit back into the overlay.
    pub fn apply_commit_outcome(&mut self, outcome: &CommitOutcome) {
        match &outcome.result {
            Ok(_) => self.overlay.confirm(&outcome.update),
            Err(e) => {
                warn!(
                    "commit of {}:{} failed: {e}",
                    outcome.update.row_id, outcome.update.column
                );
                self.overlay.reject(&outcome.update);
            }
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Toggles a row's selection. Returns `true` if it is now selected.
    pub fn toggle_row_selection(&mut self, row_id: &RowId) -> bool {
        self.state.selection.toggle(row_id)
    }

    /// Returns `true` if the row is selected.
    pub fn is_selected(&self, row_id: &RowId) -> bool {
        self.state.selection.is_selected(row_id)
    }

    /// Selects every row on the current page.
    pub fn select_all_on_page(&mut self) {
        let ids = self.current_page_ids();
        self.state.selection.select_all(&ids);
    }

    /// Deselects every row on the current page, leaving other pages alone.
    pub fn deselect_all_on_page(&mut self) {
        let ids = self.current_page_ids();
        self.state.selection.deselect_all(&ids);
    }

    /// Clears the whole selection.
    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    /// Returns the selection coverage of the current page.
    pub fn page_selection(&self) -> PageSelection {
        let page = self.page();
        self.state.selection.coverage(page.rows().iter().map(|r| r.id()))
    }

    /// Returns the selected row ids in dataset order.
    pub fn selected_ids(&self) -> Vec<&RowId> {
        self.dataset
            .rows()
            .iter()
            .map(Row::id)
            .filter(|id| self.state.selection.is_selected(id))
            .collect()
    }

    fn current_page_ids(&self) -> Vec<RowId> {
        self.page().rows().iter().map(|r| r.id().clone()).collect()
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Swaps in a refreshed dataset, keeping the session state.
    ///
    /// The column layout adapts to the new headers, selections and overlay
    /// entries for vanished rows are dropped, confirmed overlay entries are
    /// dropped, an edit whose cell vanished is cancelled, and the current
    /// page is clamped.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        let dataset = &self.dataset;

        self.state.columns.reconcile(dataset.column_headers());
        self.state.selection.retain(|id| dataset.row(id).is_some());
        self.overlay
            .refresh(|id, column| dataset.has_column(column) && dataset.row(id).is_some());

        if let Some(edit) = self.state.edit.pending()
            && (dataset.row(edit.row_id()).is_none() || !dataset.has_column(edit.column()))
        {
            debug!("cancelling edit of vanished cell {}:{}", edit.row_id(), edit.column());
            self.state.edit = EditState::Idle;
        }
        if let Some(sort) = &self.state.sort
            && !dataset.has_column(sort.column())
        {
            self.state.sort = None;
        }

        self.state.clamp_page(dataset);
        debug!(
            "dataset replaced: {} rows, {} columns",
            dataset.len(),
            dataset.column_headers().len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Direction;

    fn people() -> Dataset {
        Dataset::new(
            vec!["name".into(), "age".into()],
            vec![
                Row::new("r1", 0).set("name", "Bob").set("age", "30"),
                Row::new("r2", 1).set("name", "Al").set("age", "25"),
            ],
        )
    }

    fn numbered(count: usize) -> Dataset {
        let rows = (0..count)
            .map(|i| Row::new(format!("r{}", i + 1), i).set("n", format!("{:03}", i + 1)))
            .collect();
        Dataset::new(vec!["n".into()], rows)
    }

    fn names(view: &TabularView) -> Vec<String> {
        view.current_page_rows()
            .iter()
            .map(|r| r.value("name").to_string())
            .collect()
    }

    #[test]
    fn test_sort_toggle_scenario() {
        let mut view = TabularView::new(people());
        view.toggle_sort("name");
        assert_eq!(names(&view), ["Al", "Bob"]);

        let sort = view.toggle_sort("name").cloned();
        assert_eq!(sort.map(|s| s.direction()), Some(Direction::Descending));
        assert_eq!(names(&view), ["Bob", "Al"]);
    }

    #[test]
    fn test_sort_unknown_column_is_ignored() {
        let mut view = TabularView::new(people());
        view.toggle_sort("name");
        assert!(view.toggle_sort("email").is_none());
        assert_eq!(view.state().sort(), Some(&SortSpec::asc("name")));
    }

    #[test]
    fn test_filter_scenario() {
        let mut view = TabularView::new(people());
        view.set_filter("25");
        assert_eq!(names(&view), ["Al"]);
    }

    #[test]
    fn test_filter_clamps_page() {
        let mut view = TabularView::new(numbered(25));
        assert_eq!(view.set_page(3), 3);
        view.set_filter("01");
        // 001 and 010..=019
        assert_eq!(view.page().total_rows(), 11);
        assert_eq!(view.current_page(), 2);
        view.set_filter("zzz");
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.total_pages(), 1);
    }

    #[test]
    fn test_paging_boundaries() {
        let mut view = TabularView::new(numbered(15));
        assert_eq!(view.total_pages(), 2);
        assert!(!view.prev_page());
        assert!(view.next_page());
        assert!(!view.next_page());
        assert_eq!(view.current_page(), 2);
        assert_eq!(view.set_page(3), 2);
        assert_eq!(view.set_page(0), 1);
    }

    #[test]
    fn test_toggle_column_hides_from_render() {
        let mut view = TabularView::new(people());
        assert_eq!(view.toggle_column("age"), Some(false));
        let page = view.render();
        assert_eq!(page.headers, ["name"]);
        assert!(page.rows.iter().all(|r| r.cells.len() == 1 && r.cells[0].column == "name"));
    }

    #[test]
    fn test_filter_sees_hidden_columns() {
        let mut view = TabularView::new(people());
        view.toggle_column("age");
        view.set_filter("30");
        assert_eq!(names(&view), ["Bob"]);
    }

    #[test]
    fn test_begin_edit_discards_previous() {
        let mut view = TabularView::new(people());
        assert!(view.begin_edit(&RowId::new("r1"), "age"));
        view.set_pending_value("31");
        assert!(view.begin_edit(&RowId::new("r2"), "name"));

        let edit = view.editing().unwrap();
        assert_eq!(edit.row_id().as_str(), "r2");
        assert_eq!(edit.value(), "Al");
        assert!(view.overlay().is_empty());
    }

    #[test]
    fn test_begin_edit_rejects_unknown_cell() {
        let mut view = TabularView::new(people());
        assert!(!view.begin_edit(&RowId::new("r9"), "age"));
        assert!(!view.begin_edit(&RowId::new("r1"), "email"));
        assert!(view.editing().is_none());
    }

    #[test]
    fn test_commit_without_overlay_keeps_snapshot_value() {
        let config = ViewConfig::default().with_optimistic_edits(false);
        let mut view = TabularView::with_config(people(), config);
        view.begin_edit(&RowId::new("r1"), "age");
        view.set_pending_value("31");
        let update = view.commit_edit().unwrap();

        assert_eq!(update.fields.get("age").map(String::as_str), Some("31"));
        assert!(view.editing().is_none());
        let row = view.dataset().row(&RowId::new("r1")).unwrap();
        assert_eq!(view.cell_value(row, "age"), "30");
    }

    #[test]
    fn test_commit_carries_other_unconfirmed_edits() {
        let mut view = TabularView::new(people());
        view.begin_edit(&RowId::new("r1"), "age");
        view.set_pending_value("31");
        view.commit_edit().unwrap();

        view.begin_edit(&RowId::new("r1"), "name");
        view.set_pending_value("Robert");
        let update = view.commit_edit().unwrap();
        assert_eq!(update.fields.get("age").map(String::as_str), Some("31"));
        assert_eq!(update.fields.get("name").map(String::as_str), Some("Robert"));
    }

    #[test]
    fn test_commit_when_idle() {
        let mut view = TabularView::new(people());
        assert!(view.commit_edit().is_none());
        assert!(!view.cancel_edit());
        assert!(!view.set_pending_value("x"));
    }

    #[test]
    fn test_render_shows_pending_value() {
        let mut view = TabularView::new(people());
        view.begin_edit(&RowId::new("r2"), "age");
        view.set_pending_value("2");
        let page = view.render();
        let cell = &page.rows[1].cells[1];
        assert!(cell.editing);
        assert_eq!(cell.value, "2");
        assert!(!page.rows[0].cells[1].editing);
    }

    #[test]
    fn test_selection_is_dataset_scoped() {
        let mut view = TabularView::new(numbered(15));
        view.select_all_on_page();
        assert_eq!(view.page_selection(), PageSelection::All);

        view.next_page();
        assert_eq!(view.page_selection(), PageSelection::None);
        view.toggle_row_selection(&RowId::new("r12"));
        assert_eq!(view.page_selection(), PageSelection::Partial);
        assert_eq!(view.selected_ids().len(), 11);

        view.deselect_all_on_page();
        assert_eq!(view.selected_ids().len(), 10);

        view.clear_selection();
        assert!(view.selected_ids().is_empty());
    }

    #[test]
    fn test_replace_dataset_reconciles() {
        let mut view = TabularView::new(numbered(15));
        view.set_page(2);
        view.toggle_row_selection(&RowId::new("r1"));
        view.toggle_row_selection(&RowId::new("r14"));
        view.begin_edit(&RowId::new("r14"), "n");

        view.replace_dataset(numbered(5));
        assert_eq!(view.current_page(), 1);
        assert!(view.editing().is_none());
        let selected: Vec<&str> = view.selected_ids().iter().map(|id| id.as_str()).collect();
        assert_eq!(selected, ["r1"]);
    }

    #[test]
    fn test_replace_dataset_drops_sort_on_vanished_column() {
        let mut view = TabularView::new(people());
        view.toggle_sort("age");
        view.begin_edit(&RowId::new("r1"), "age");

        let renamed = Dataset::new(
            vec!["name".into(), "years".into()],
            vec![
                Row::new("r1", 0).set("name", "Bob").set("years", "30"),
                Row::new("r2", 1).set("name", "Al").set("years", "25"),
            ],
        );
        view.replace_dataset(renamed);

        assert!(view.state().sort().is_none());
        assert!(view.editing().is_none());
        assert_eq!(names(&view), ["Bob", "Al"]);
        assert_eq!(view.visible_columns(), ["name", "years"]);
    }

    #[test]
    fn test_replace_dataset_keeps_sort_on_surviving_column() {
        let mut view = TabularView::new(people());
        view.toggle_sort("name");
        view.replace_dataset(people());
        assert_eq!(view.state().sort(), Some(&SortSpec::asc("name")));
        assert_eq!(names(&view), ["Al", "Bob"]);
    }

    #[test]
    fn test_commit_revisions_increase() {
        let mut view = TabularView::new(people());
        let mut revisions = Vec::new();
        for value in ["26", "27", "26"] {
            view.begin_edit(&RowId::new("r2"), "age");
            view.set_pending_value(value);
            revisions.push(view.commit_edit().unwrap().revision);
        }
        assert_eq!(revisions, [1, 2, 3]);
    }

    #[test]
    fn test_config_page_size_drives_paging() {
        let config = ViewConfig::default().with_page_size(4);
        let view = TabularView::with_config(numbered(9), config);
        assert_eq!(view.config().page_size, 4);
        assert_eq!(view.total_pages(), 3);
        assert_eq!(view.current_page_rows().len(), 4);
    }
}
