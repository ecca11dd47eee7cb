//! Sort specification and collation.

use std::cmp::Ordering;
use std::cmp::Reverse;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::model::Row;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z).
    #[default]
    Ascending,
    /// Descending order (Z-A).
    Descending,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Sort on a single column.
///
/// # Example
///
/// ```
/// use tabular_lib::view::{Direction, SortSpec};
///
/// let sort = SortSpec::asc("name");
/// let sort = sort.toggled("name");
/// assert_eq!(sort.direction(), Direction::Descending);
///
/// let sort = sort.toggled("age");
/// assert_eq!(sort, SortSpec::asc("age"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    column: String,
    direction: Direction,
}

impl SortSpec {
    /// Creates a sort spec.
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    /// Creates an ascending sort on a column.
    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Ascending)
    }

    /// Creates a descending sort on a column.
    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Descending)
    }

    /// Returns the sorted column.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the sort direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the spec produced by clicking `column` while this one is
    /// active: the same column flips direction, any other column starts
    /// ascending.
    pub fn toggled(&self, column: &str) -> Self {
        if self.column == column {
            Self::new(column, self.direction.flipped())
        } else {
            Self::asc(column)
        }
    }
}

/// Returns the next sort after clicking `column`, given the current one.
pub fn next_sort(current: Option<&SortSpec>, column: &str) -> SortSpec {
    match current {
        Some(spec) => spec.toggled(column),
        None => SortSpec::asc(column),
    }
}

/// Sorts rows by the spec's column, keeping the input order for equal keys.
///
/// With no spec the input is returned unchanged. Missing values sort as
/// the empty string.
pub fn apply_sort<'a>(mut rows: Vec<&'a Row>, sort: Option<&SortSpec>) -> Vec<&'a Row> {
    let Some(spec) = sort else {
        return rows;
    };

    let column = spec.column();
    match spec.direction() {
        Direction::Ascending => {
            rows.sort_by_cached_key(|row| CollationKey::new(row.value(column)));
        }
        Direction::Descending => {
            rows.sort_by_cached_key(|row| Reverse(CollationKey::new(row.value(column))));
        }
    }
    rows
}

/// Compares two strings with the same ordering used for sorting.
pub fn collate(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

/// Multi-level sort key approximating locale-aware ordering.
///
/// Levels compare in declaration order: base letters ignoring case and
/// accents, then accents, then case (lowercase first), then raw text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CollationKey {
    primary: String,
    secondary: String,
    tertiary: String,
    raw: String,
}

impl CollationKey {
    fn new(value: &str) -> Self {
        let decomposed: String = value.nfd().collect();
        let primary = decomposed
            .chars()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
            .collect();
        let secondary = decomposed.chars().flat_map(char::to_lowercase).collect();
        let tertiary = decomposed.chars().flat_map(swap_case).collect();

        Self {
            primary,
            secondary,
            tertiary,
            raw: value.to_string(),
        }
    }
}

fn swap_case(c: char) -> Vec<char> {
    if c.is_lowercase() {
        c.to_uppercase().collect()
    } else if c.is_uppercase() {
        c.to_lowercase().collect()
    } else {
        vec![c]
    }
}
