//! Tabular view engine library
//!
//! An in-memory engine behind a CSV data viewer: it filters, sorts and
//! paginates an uploaded file's rows, manages column order and visibility,
//! tracks row selection and runs a cell edit state machine whose commits are
//! dispatched to an external row updater.

pub mod commit;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod view;

pub use view::TabularView;
