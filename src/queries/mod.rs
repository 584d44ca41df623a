//! Queries - Read-only Views over the Fleet State

pub mod availability;
pub mod due;
pub mod priority;

pub use availability::{MechanicFilter, available_mechanics, free_bays, suggest_bay};
pub use due::{DueVehicle, DueWindow, vehicles_due};
pub use priority::{EisenhowerMatrix, Quadrant, eisenhower_matrix};
