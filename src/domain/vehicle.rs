//! Vehicle - Fleet Vehicles

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{DriverId, VehicleId};

/// Vehicle lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
    InWorkshop,
    Waiting,
}

impl VehicleStatus {
    pub fn label(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::Maintenance => "maintenance",
            VehicleStatus::Inactive => "inactive",
            VehicleStatus::InWorkshop => "in-workshop",
            VehicleStatus::Waiting => "waiting",
        }
    }
}

/// A fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Licence plate
    pub registration: String,
    pub brand: String,
    pub model: String,
    pub year: u16,
    pub driver_id: Option<DriverId>,
    /// Operational group (depot, business unit)
    pub group: String,
    pub status: VehicleStatus,
    /// Odometer reading in kilometres
    pub odometer_km: u32,
    pub next_maintenance_date: Option<NaiveDate>,
    pub next_maintenance_km: Option<u32>,
}

impl Vehicle {
    /// Display name, e.g. "Renault Master (AB-123-CD)"
    pub fn display_name(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.registration)
    }

    /// Kilometres left before the odometer due marker, negative when overdue
    pub fn km_until_due(&self) -> Option<i64> {
        self.next_maintenance_km
            .map(|due| i64::from(due) - i64::from(self.odometer_km))
    }

    /// Days left before the due date, negative when overdue
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.next_maintenance_date
            .map(|due| (due - today).num_days())
    }
}
