//! Fleetdesk Library
//!
//! In-memory state store for a vehicle fleet maintenance back office: vehicles,
//! drivers, mechanics, maintenance records, workshop bays, alerts and planning.
//! All changes go through `FleetStore::dispatch`, which applies a `FleetAction`
//! atomically and reports what changed as `StoreEvent`s.

pub mod auth;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod queries;
pub mod seed;
pub mod state;
pub mod utils;

pub use error::{Error, Result};
pub use state::{FleetAction, FleetState, FleetStats, FleetStore, StoreEvent};
