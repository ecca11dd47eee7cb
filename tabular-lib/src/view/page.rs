//! Pagination over the derived row sequence.

use crate::model::Row;

/// Returns the number of pages needed for `row_count` rows; never below 1.
pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    row_count.div_ceil(page_size.max(1)).max(1)
}

/// Clamps a 1-based page number into `[1, total_pages]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Returns the slice of `rows` shown on 1-based `page`.
///
/// Pages past the end yield an empty slice; callers keep the page clamped
/// with [`clamp_page`].
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(rows.len());
    let end = start.saturating_add(page_size).min(rows.len());
    &rows[start..end]
}

/// One page of the derived row sequence.
///
/// Holds the rows on the page together with the numbers a pager needs to
/// draw its previous/next affordances.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    rows: Vec<&'a Row>,
    number: usize,
    total_pages: usize,
    total_rows: usize,
}

impl<'a> Page<'a> {
    /// Cuts page `number` out of the full derived sequence.
    pub fn new(derived: &[&'a Row], number: usize, page_size: usize) -> Self {
        let total_pages = total_pages(derived.len(), page_size);
        let number = clamp_page(number, total_pages);
        Self {
            rows: paginate(derived, number, page_size).to_vec(),
            number,
            total_pages,
            total_rows: derived.len(),
        }
    }

    /// Returns the rows on this page.
    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    /// Consumes the page and returns its rows.
    pub fn into_rows(self) -> Vec<&'a Row> {
        self.rows
    }

    /// Returns the 1-based page number.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Returns the number of pages.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Returns the number of rows across all pages.
    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Returns `true` if a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    /// Returns `true` if a next page exists.
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
