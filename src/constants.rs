//! Store Constants
//!
//! Centralized defaults shared by the store, queries and configuration.

/// Activity log entries kept in memory
pub const ACTIVITY_LOG_CAPACITY: usize = 500;

/// Maintenance due windows
pub const DUE_SOON_DAYS: i64 = 14;
pub const DUE_SOON_KM: i64 = 1_000;

/// Open records a mechanic may hold before being skipped by availability queries
pub const MAX_MECHANIC_ASSIGNMENTS: u32 = 3;

/// Longest slot a planning entry may book, in hours
pub const MAX_PLANNING_HOURS: f64 = 24.0;
