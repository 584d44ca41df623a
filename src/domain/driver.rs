//! Driver - Vehicle Drivers

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{DriverId, VehicleId};

/// Driver duty status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DriverStatus {
    #[default]
    Available,
    OnRoute,
    OffDuty,
}

/// A driver who can be paired with one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: DriverId,
    pub name: String,
    pub licence_number: String,
    pub phone: String,
    pub status: DriverStatus,
    pub vehicle_id: Option<VehicleId>,
}
