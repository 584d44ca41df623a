//! Fleet Statistics
//!
//! Aggregate counters shown on the dashboard. Always computed from the collections,
//! never cached.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{BayStatus, MaintenanceStatus, MechanicStatus, VehicleStatus};
use crate::state::FleetState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FleetStats {
    pub total_vehicles: usize,
    pub vehicles_active: usize,
    pub vehicles_in_maintenance: usize,
    pub vehicles_in_workshop: usize,
    pub vehicles_waiting: usize,
    pub total_mechanics: usize,
    pub available_mechanics: usize,
    pub busy_mechanics: usize,
    pub total_bays: usize,
    pub free_bays: usize,
    pub unacknowledged_alerts: usize,
    pub planned_maintenance: usize,
    pub in_progress_maintenance: usize,
    pub completed_maintenance: usize,
}

impl FleetStats {
    pub fn compute(state: &FleetState) -> Self {
        let mut stats = FleetStats {
            total_vehicles: state.vehicles.len(),
            total_mechanics: state.mechanics.len(),
            total_bays: state.bays.len(),
            ..Default::default()
        };

        for vehicle in &state.vehicles {
            match vehicle.status {
                VehicleStatus::Active => stats.vehicles_active += 1,
                VehicleStatus::Maintenance => stats.vehicles_in_maintenance += 1,
                VehicleStatus::InWorkshop => stats.vehicles_in_workshop += 1,
                VehicleStatus::Waiting => stats.vehicles_waiting += 1,
                VehicleStatus::Inactive => {}
            }
        }

        for mechanic in &state.mechanics {
            match mechanic.status {
                MechanicStatus::Available => stats.available_mechanics += 1,
                MechanicStatus::Busy => stats.busy_mechanics += 1,
                MechanicStatus::OffDuty => {}
            }
        }

        stats.free_bays = state
            .bays
            .iter()
            .filter(|b| b.status == BayStatus::Free)
            .count();

        stats.unacknowledged_alerts = state.alerts.iter().filter(|a| !a.is_acknowledged).count();

        for record in &state.maintenance {
            match record.status {
                MaintenanceStatus::Planned => stats.planned_maintenance += 1,
                MaintenanceStatus::InProgress => stats.in_progress_maintenance += 1,
                MaintenanceStatus::Completed => stats.completed_maintenance += 1,
                MaintenanceStatus::Cancelled => {}
            }
        }

        stats
    }

    /// Share of bays in use, 0.0 to 1.0
    pub fn bay_occupancy(&self) -> f64 {
        if self.total_bays == 0 {
            return 0.0;
        }
        (self.total_bays - self.free_bays) as f64 / self.total_bays as f64
    }

    /// Share of vehicles on the road, 0.0 to 1.0
    pub fn availability_rate(&self) -> f64 {
        if self.total_vehicles == 0 {
            return 0.0;
        }
        self.vehicles_active as f64 / self.total_vehicles as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::demo_fleet;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_state() {
        let stats = FleetStats::compute(&FleetState::new());
        assert_eq!(stats, FleetStats::default());
        assert_eq!(stats.bay_occupancy(), 0.0);
        assert_eq!(stats.availability_rate(), 0.0);
    }

    #[test]
    fn test_matches_manual_scan() {
        let state = demo_fleet(NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date"));
        let stats = state.stats();

        let waiting = state
            .vehicles
            .iter()
            .filter(|v| v.status == VehicleStatus::Waiting)
            .count();
        let busy = state
            .mechanics
            .iter()
            .filter(|m| m.status == MechanicStatus::Busy)
            .count();
        let unacked = state.alerts.iter().filter(|a| !a.is_acknowledged).count();

        assert_eq!(stats.vehicles_waiting, waiting);
        assert_eq!(stats.busy_mechanics, busy);
        assert_eq!(stats.unacknowledged_alerts, unacked);
        assert_eq!(stats.total_vehicles, state.vehicles.len());
    }
}
