//! In-memory table view engine.
//!
//! A [`TabularView`] derives the rows a data viewer shows from an immutable
//! [`Dataset`](crate::model::Dataset) through a fixed pipeline:
//!
//! 1. [`apply_filter`] - free-text match over every field
//! 2. [`apply_sort`] - stable single-column sort
//! 3. [`paginate`] - fixed-size pages
//!
//! Column order and visibility ([`ColumnLayout`]) only affect rendering.
//! The pipeline functions are free functions over a [`ViewState`] so they
//! can be used without an engine.

mod columns;
mod edit;
mod engine;
mod filter;
mod page;
mod render;
mod selection;
mod sort;
mod state;

pub use columns::ColumnLayout;
pub use edit::EditOverlay;
pub use edit::EditState;
pub use edit::PendingEdit;
pub use edit::RowUpdate;
pub use engine::TabularView;
pub use filter::apply_filter;
pub use filter::row_matches;
pub use page::Page;
pub use page::clamp_page;
pub use page::paginate;
pub use page::total_pages;
pub use render::RenderedCell;
pub use render::RenderedPage;
pub use render::RenderedRow;
pub use selection::PageSelection;
pub use selection::Selection;
pub use sort::Direction;
pub use sort::SortSpec;
pub use sort::apply_sort;
pub use sort::collate;
pub use sort::next_sort;
pub use state::ViewState;
