//! Free-text row filter.

use crate::model::Dataset;
use crate::model::Row;

/// Returns the rows with at least one value containing `filter_text`,
/// ignoring case, in dataset order.
///
/// Every field takes part, visible or not; column names never match. An
/// empty filter returns every row.
///
/// # Example
///
/// ```
/// use tabular_lib::model::{Dataset, Row};
/// use tabular_lib::view::apply_filter;
///
/// let dataset = Dataset::new(
///     vec!["name".into(), "age".into()],
///     vec![
///         Row::new("r1", 0).set("name", "Bob").set("age", "30"),
///         Row::new("r2", 1).set("name", "Al").set("age", "25"),
///     ],
/// );
///
/// let rows = apply_filter(&dataset, "25");
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].value("name"), "Al");
/// ```
pub fn apply_filter<'a>(dataset: &'a Dataset, filter_text: &str) -> Vec<&'a Row> {
    if filter_text.is_empty() {
        return dataset.rows().iter().collect();
    }

    let needle = filter_text.to_lowercase();
    dataset
        .rows()
        .iter()
        .filter(|row| row_matches(row, &needle))
        .collect()
}

/// Returns `true` if any value of `row` contains the already-lowercased
/// `needle`.
pub fn row_matches(row: &Row, needle: &str) -> bool {
    needle.is_empty()
        || row
            .fields()
            .values()
            .any(|value| value.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["name".into(), "city".into(), "note".into()],
            vec![
                Row::new("r1", 0).set("name", "Bob").set("city", "Oslo"),
                Row::new("r2", 1).set("name", "Alice").set("city", "Bergen"),
                Row::new("r3", 2).set("name", "Carol").set("note", "moved to OSLO"),
                Row::new("r4", 3),
            ],
        )
    }

    fn ids<'a>(rows: &[&'a Row]) -> Vec<&'a str> {
        rows.iter().map(|&r| r.id().as_str()).collect()
    }

    #[test]
    fn test_empty_filter_returns_all_in_order() {
        let dataset = dataset();
        assert_eq!(ids(&apply_filter(&dataset, "")), ["r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let dataset = dataset();
        assert_eq!(ids(&apply_filter(&dataset, "oslo")), ["r1", "r3"]);
        assert_eq!(ids(&apply_filter(&dataset, "LIC")), ["r2"]);
    }

    #[test]
    fn test_column_names_do_not_match() {
        let dataset = dataset();
        assert!(apply_filter(&dataset, "city").is_empty());
    }

    #[test]
    fn test_every_match_contains_needle() {
        let dataset = dataset();
        for needle in ["o", "B", "er", "zz"] {
            let lower = needle.to_lowercase();
            for row in apply_filter(&dataset, needle) {
                assert!(row.fields().values().any(|v| v.to_lowercase().contains(&lower)));
            }
        }
    }
}
