//! State - Fleet Store and Transitions
//!
//! `FleetState` holds the collections, `reduce` computes the next state for an action,
//! and `FleetStore` owns the current state, its activity log and event subscribers.

pub mod action;
pub mod activity_log;
pub mod fleet;
pub mod reducer;
pub mod script;
pub mod stats;
pub mod store;

pub use action::{FleetAction, StoreEvent};
pub use activity_log::{ActivityEntry, ActivityLog, ActivityOutcome};
pub use fleet::FleetState;
pub use reducer::{Transition, reduce};
pub use script::{ActionScript, ScriptStep};
pub use stats::FleetStats;
pub use store::FleetStore;
