//! Domain models for the optica system.

mod exam;
mod notification;

pub use exam::*;
pub use notification::*;
