//! Utils - Display Formatting

pub mod format;

pub use format::*;
