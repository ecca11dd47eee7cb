//! Session view state and the derivation pipeline.

use crate::model::Dataset;
use crate::model::Row;

use super::columns::ColumnLayout;
use super::edit::EditState;
use super::filter::apply_filter;
use super::page::Page;
use super::page::clamp_page;
use super::page::total_pages;
use super::selection::Selection;
use super::sort::SortSpec;
use super::sort::apply_sort;

/// Everything a viewer session has configured about how a dataset is shown.
///
/// The state holds no rows; the derivations take the dataset they run over
/// as an argument so they can be exercised without an engine.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub(super) filter_text: String,
    pub(super) sort: Option<SortSpec>,
    pub(super) columns: ColumnLayout,
    pub(super) current_page: usize,
    pub(super) page_size: usize,
    pub(super) selection: Selection,
    pub(super) edit: EditState,
}

impl ViewState {
    /// Creates the default state for a dataset: no filter, no sort, every
    /// column shown in declared order, first page.
    pub fn new(dataset: &Dataset, page_size: usize) -> Self {
        Self {
            filter_text: String::new(),
            sort: None,
            columns: ColumnLayout::new(dataset.column_headers()),
            current_page: 1,
            page_size: page_size.max(1),
            selection: Selection::new(),
            edit: EditState::Idle,
        }
    }

    /// Returns the filter text.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Returns the active sort, if any.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Returns the column layout.
    pub fn columns(&self) -> &ColumnLayout {
        &self.columns
    }

    /// Returns the 1-based current page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Returns the number of rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the row selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the edit state.
    pub fn edit(&self) -> &EditState {
        &self.edit
    }

    /// Runs filter then sort over the dataset.
    pub fn derived_rows<'a>(&self, dataset: &'a Dataset) -> Vec<&'a Row> {
        apply_sort(apply_filter(dataset, &self.filter_text), self.sort.as_ref())
    }

    /// Runs the full pipeline and returns the current page.
    pub fn page<'a>(&self, dataset: &'a Dataset) -> Page<'a> {
        Page::new(&self.derived_rows(dataset), self.current_page, self.page_size)
    }

    /// Clamps the current page against the derived row count.
    pub(super) fn clamp_page(&mut self, dataset: &Dataset) {
        let count = apply_filter(dataset, &self.filter_text).len();
        self.current_page = clamp_page(self.current_page, total_pages(count, self.page_size));
    }
}
