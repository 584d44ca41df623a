//! Domain - Pure Data Structures
//!
//! Fleet entities, their status enumerations and the payloads carried by actions.

pub mod alert;
pub mod bay;
pub mod config;
pub mod driver;
pub mod ids;
pub mod maintenance;
pub mod mechanic;
pub mod planning;
pub mod vehicle;

pub use alert::{Alert, AlertCategory, AlertPriority, NewAlert};
pub use bay::{BayCapability, BayStatus, WorkshopBay};
pub use config::AppConfig;
pub use driver::{Driver, DriverStatus};
pub use ids::{AlertId, BayId, DriverId, MaintenanceId, MechanicId, PlanningId, VehicleId};
pub use maintenance::{
    MaintenanceKind, MaintenancePatch, MaintenanceRecord, MaintenanceStatus, NewMaintenance,
    WorkflowStage,
};
pub use mechanic::{Mechanic, MechanicStatus, WorkingHours};
pub use planning::{NewPlanningEntry, PlanningEntry, PlanningStatus};
pub use vehicle::{Vehicle, VehicleStatus};
