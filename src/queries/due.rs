//! Due - Vehicles Approaching Their Next Maintenance

use chrono::NaiveDate;
use serde::Serialize;

use crate::constants::{DUE_SOON_DAYS, DUE_SOON_KM};
use crate::domain::config::StoreConfig;
use crate::domain::{Vehicle, VehicleId};
use crate::state::FleetState;

/// How far ahead to look, by date and by odometer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    pub days: i64,
    pub km: i64,
}

impl DueWindow {
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            days: config.due_soon_days,
            km: config.due_soon_km,
        }
    }
}

impl Default for DueWindow {
    fn default() -> Self {
        Self {
            days: DUE_SOON_DAYS,
            km: DUE_SOON_KM,
        }
    }
}

/// A vehicle due for maintenance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueVehicle {
    pub vehicle_id: VehicleId,
    pub name: String,
    /// Negative when past the due date
    pub days_left: Option<i64>,
    /// Negative when past the due odometer
    pub km_left: Option<i64>,
}

impl DueVehicle {
    pub fn is_overdue(&self) -> bool {
        self.days_left.is_some_and(|d| d < 0) || self.km_left.is_some_and(|k| k < 0)
    }

    fn from_vehicle(vehicle: &Vehicle, today: NaiveDate) -> Self {
        Self {
            vehicle_id: vehicle.id.clone(),
            name: vehicle.display_name(),
            days_left: vehicle.days_until_due(today),
            km_left: vehicle.km_until_due(),
        }
    }
}

/// Vehicles whose due date or due odometer falls inside the window
///
/// Overdue vehicles come first, then by days left. Vehicles due only by odometer
/// sort last.
pub fn vehicles_due(state: &FleetState, today: NaiveDate, window: DueWindow) -> Vec<DueVehicle> {
    let mut due: Vec<_> = state
        .vehicles
        .iter()
        .map(|v| DueVehicle::from_vehicle(v, today))
        .filter(|d| {
            d.days_left.is_some_and(|days| days <= window.days)
                || d.km_left.is_some_and(|km| km <= window.km)
        })
        .collect();

    due.sort_by_key(|d| (!d.is_overdue(), d.days_left.unwrap_or(i64::MAX)));
    due
}
