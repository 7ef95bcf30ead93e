//! Pure view projections over exam state.

mod detail;
mod list;

pub use detail::*;
pub use list::*;
