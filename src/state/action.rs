//! Fleet Actions and Store Events
//!
//! `FleetAction` is everything a caller can ask the store to do. `StoreEvent` is what
//! actually happened, emitted by the reducer for subscribers and the activity log.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::auth::Permission;
use crate::domain::{
    AlertId, AlertPriority, BayId, DriverId, MaintenanceId, MaintenancePatch, MechanicId,
    NewAlert, NewMaintenance, NewPlanningEntry, PlanningId, PlanningStatus, VehicleId,
    VehicleStatus,
};

/// Actions accepted by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FleetAction {
    /// Append a new maintenance record
    CreateMaintenance(NewMaintenance),

    /// Merge a partial update into a record
    UpdateMaintenance {
        maintenance_id: MaintenanceId,
        patch: MaintenancePatch,
    },

    /// Put a mechanic on a record
    AssignMechanic {
        maintenance_id: MaintenanceId,
        mechanic_id: MechanicId,
    },

    /// Put a record's vehicle into a bay
    AssignBay {
        maintenance_id: MaintenanceId,
        bay_id: BayId,
    },

    UpdateVehicleStatus {
        vehicle_id: VehicleId,
        status: VehicleStatus,
    },

    /// Close a record and release its mechanic and bay
    ///
    /// Final figures default to the estimates when omitted.
    CompleteMaintenance {
        maintenance_id: MaintenanceId,
        #[serde(default)]
        final_cost: Option<f64>,
        #[serde(default)]
        final_duration_hours: Option<f64>,
    },

    /// Cancel a record and release its mechanic and bay
    CancelMaintenance { maintenance_id: MaintenanceId },

    CreateAlert(NewAlert),

    AcknowledgeAlert { alert_id: AlertId },

    /// Book a mechanic and bay slot for a record
    ScheduleMaintenance(NewPlanningEntry),

    UpdatePlanningStatus {
        planning_id: PlanningId,
        status: PlanningStatus,
    },

    /// Pair a driver with a vehicle, breaking previous pairings
    AssignDriver {
        driver_id: DriverId,
        vehicle_id: VehicleId,
    },

    RecordOdometer {
        vehicle_id: VehicleId,
        odometer_km: u32,
    },
}

impl FleetAction {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            FleetAction::CreateMaintenance(_) => "create_maintenance",
            FleetAction::UpdateMaintenance { .. } => "update_maintenance",
            FleetAction::AssignMechanic { .. } => "assign_mechanic",
            FleetAction::AssignBay { .. } => "assign_bay",
            FleetAction::UpdateVehicleStatus { .. } => "update_vehicle_status",
            FleetAction::CompleteMaintenance { .. } => "complete_maintenance",
            FleetAction::CancelMaintenance { .. } => "cancel_maintenance",
            FleetAction::CreateAlert(_) => "create_alert",
            FleetAction::AcknowledgeAlert { .. } => "acknowledge_alert",
            FleetAction::ScheduleMaintenance(_) => "schedule_maintenance",
            FleetAction::UpdatePlanningStatus { .. } => "update_planning_status",
            FleetAction::AssignDriver { .. } => "assign_driver",
            FleetAction::RecordOdometer { .. } => "record_odometer",
        }
    }

    /// Permission a session needs to dispatch this action
    pub fn required_permission(&self) -> Permission {
        match self {
            FleetAction::CreateMaintenance(_)
            | FleetAction::UpdateMaintenance { .. }
            | FleetAction::CancelMaintenance { .. } => Permission::ManageMaintenance,
            FleetAction::AssignMechanic { .. } => Permission::AssignMechanics,
            FleetAction::AssignBay { .. } => Permission::AssignBays,
            FleetAction::UpdateVehicleStatus { .. } => Permission::ManageVehicles,
            FleetAction::CompleteMaintenance { .. } => Permission::CompleteMaintenance,
            FleetAction::CreateAlert(_) => Permission::RaiseAlerts,
            FleetAction::AcknowledgeAlert { .. } => Permission::AcknowledgeAlerts,
            FleetAction::ScheduleMaintenance(_) => Permission::SchedulePlanning,
            FleetAction::UpdatePlanningStatus { .. } => Permission::UpdatePlanning,
            FleetAction::AssignDriver { .. } => Permission::ManageDrivers,
            FleetAction::RecordOdometer { .. } => Permission::RecordOdometer,
        }
    }
}

/// Changes applied by the reducer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    MaintenanceCreated {
        maintenance_id: MaintenanceId,
        vehicle_id: VehicleId,
    },
    MaintenanceUpdated {
        maintenance_id: MaintenanceId,
    },
    MechanicAssigned {
        maintenance_id: MaintenanceId,
        mechanic_id: MechanicId,
        assignments: u32,
    },
    MechanicReleased {
        mechanic_id: MechanicId,
        assignments: u32,
    },
    BayAssigned {
        maintenance_id: MaintenanceId,
        bay_id: BayId,
        vehicle_id: VehicleId,
    },
    BayReleased {
        bay_id: BayId,
    },
    VehicleStatusChanged {
        vehicle_id: VehicleId,
        from: VehicleStatus,
        to: VehicleStatus,
    },
    MaintenanceCompleted {
        maintenance_id: MaintenanceId,
        final_cost: f64,
    },
    MaintenanceCancelled {
        maintenance_id: MaintenanceId,
    },
    AlertCreated {
        alert_id: AlertId,
        vehicle_id: VehicleId,
        priority: AlertPriority,
    },
    AlertAcknowledged {
        alert_id: AlertId,
    },
    MaintenanceScheduled {
        planning_id: PlanningId,
        maintenance_id: MaintenanceId,
    },
    PlanningStatusChanged {
        planning_id: PlanningId,
        status: PlanningStatus,
    },
    DriverAssigned {
        driver_id: DriverId,
        vehicle_id: VehicleId,
    },
    OdometerRecorded {
        vehicle_id: VehicleId,
        odometer_km: u32,
    },
}
