//! Helpers - Filesystem and Buffer Utilities

mod bounded;
mod fs;

pub use bounded::*;
pub use fs::*;
