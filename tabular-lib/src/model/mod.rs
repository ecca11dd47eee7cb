//! Row and dataset models

mod dataset;
mod id;
mod row;

pub use dataset::*;
pub use id::*;
pub use row::*;
