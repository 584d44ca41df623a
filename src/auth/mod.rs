//! Auth - Roles, Permissions and Sessions

mod permissions;
mod session;

pub use permissions::*;
pub use session::*;
