//! Fleet State
//!
//! The aggregate the reducer transforms: every collection the dashboard works with,
//! kept in insertion order. Lookups are linear scans; the fleet of a workshop is a few
//! hundred rows at most.

use serde::{Deserialize, Serialize};

use crate::domain::{
    Alert, AlertId, BayId, BayStatus, Driver, DriverId, MaintenanceId, MaintenanceRecord, Mechanic,
    MechanicId, PlanningEntry, PlanningId, Vehicle, VehicleId, WorkshopBay,
};
use crate::error::{Error, Result};
use crate::state::stats::FleetStats;

/// All fleet collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetState {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub mechanics: Vec<Mechanic>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub bays: Vec<WorkshopBay>,
    pub alerts: Vec<Alert>,
    pub planning: Vec<PlanningEntry>,
}

macro_rules! lookup {
    ($get:ident, $get_mut:ident, $field:ident, $ty:ty, $id:ty, $entity:literal) => {
        pub fn $get(&self, id: &$id) -> Option<&$ty> {
            self.$field.iter().find(|item| &item.id == id)
        }

        pub(crate) fn $get_mut(&mut self, id: &$id) -> Result<&mut $ty> {
            self.$field
                .iter_mut()
                .find(|item| &item.id == id)
                .ok_or_else(|| Error::not_found($entity, id))
        }
    };
}

impl FleetState {
    pub fn new() -> Self {
        Self::default()
    }

    lookup!(vehicle, vehicle_mut, vehicles, Vehicle, VehicleId, "vehicle");
    lookup!(driver, driver_mut, drivers, Driver, DriverId, "driver");
    lookup!(mechanic, mechanic_mut, mechanics, Mechanic, MechanicId, "mechanic");
    lookup!(record, record_mut, maintenance, MaintenanceRecord, MaintenanceId, "maintenance");
    lookup!(bay, bay_mut, bays, WorkshopBay, BayId, "bay");
    lookup!(alert, alert_mut, alerts, Alert, AlertId, "alert");
    lookup!(planning_entry, planning_mut, planning, PlanningEntry, PlanningId, "planning entry");

    /// Fail with `NotFound` unless the vehicle exists
    pub(crate) fn require_vehicle(&self, id: &VehicleId) -> Result<&Vehicle> {
        self.vehicle(id).ok_or_else(|| Error::not_found("vehicle", id))
    }

    /// Open records referencing a mechanic
    pub fn open_records_for_mechanic<'a>(
        &'a self,
        id: &'a MechanicId,
    ) -> impl Iterator<Item = &'a MaintenanceRecord> + 'a {
        self.maintenance
            .iter()
            .filter(move |r| r.is_open() && r.mechanic_id.as_ref() == Some(id))
    }

    /// All records for a vehicle, newest first
    pub fn history_for_vehicle(&self, id: &VehicleId) -> Vec<&MaintenanceRecord> {
        let mut records: Vec<_> = self
            .maintenance
            .iter()
            .filter(|r| &r.vehicle_id == id)
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    /// Planning entries for a record
    pub fn planning_for(&self, id: &MaintenanceId) -> Vec<&PlanningEntry> {
        self.planning
            .iter()
            .filter(|p| &p.maintenance_id == id)
            .collect()
    }

    /// Derived statistics from a fresh scan
    pub fn stats(&self) -> FleetStats {
        FleetStats::compute(self)
    }

    /// Soft-invariant violations, empty when the state is consistent
    ///
    /// Checks that assignment counters match open records, that bay occupancy and
    /// vehicle references agree and that every open record's bay holds its vehicle.
    pub fn consistency_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for mechanic in &self.mechanics {
            let open = self.open_records_for_mechanic(&mechanic.id).count() as u32;
            if open != mechanic.current_assignments {
                issues.push(format!(
                    "mechanic '{}' counts {} assignments but has {} open records",
                    mechanic.id, mechanic.current_assignments, open
                ));
            }
        }

        for bay in &self.bays {
            let occupied = bay.status == BayStatus::Occupied;
            if occupied != bay.vehicle_id.is_some() {
                issues.push(format!(
                    "bay '{}' is {:?} with vehicle {:?}",
                    bay.id, bay.status, bay.vehicle_id
                ));
            }
        }

        for record in self.maintenance.iter().filter(|r| r.is_open()) {
            let Some(bay_id) = &record.bay_id else {
                continue;
            };
            let holds_vehicle = self.bay(bay_id).is_some_and(|bay| {
                bay.status == BayStatus::Occupied
                    && bay.vehicle_id.as_ref() == Some(&record.vehicle_id)
            });
            if !holds_vehicle {
                issues.push(format!(
                    "maintenance '{}' points at bay '{}' which does not hold vehicle '{}'",
                    record.id, bay_id, record.vehicle_id
                ));
            }
        }

        issues
    }
}
