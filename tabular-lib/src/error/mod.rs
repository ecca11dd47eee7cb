//! Error types

mod store;
mod view;

pub use store::*;
pub use view::*;
