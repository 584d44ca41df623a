//! Alert - Vehicle Alerts

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{AlertId, VehicleId};

/// Alert category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AlertCategory {
    #[default]
    MaintenanceDue,
    Mileage,
    Breakdown,
    Inspection,
    Document,
}

/// Alert priority levels
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum AlertPriority {
    Low = 0,
    #[default]
    Medium = 1,
    High = 2,
    Critical = 3,
}

impl AlertPriority {
    pub fn label(&self) -> &'static str {
        match self {
            AlertPriority::Low => "Low",
            AlertPriority::Medium => "Medium",
            AlertPriority::High => "High",
            AlertPriority::Critical => "Critical",
        }
    }
}

/// An alert raised against a vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub category: AlertCategory,
    pub vehicle_id: VehicleId,
    pub priority: AlertPriority,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_acknowledged: bool,
}

/// Payload for raising an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewAlert {
    pub vehicle_id: VehicleId,
    pub message: String,
    #[serde(default)]
    pub category: AlertCategory,
    #[serde(default)]
    pub priority: AlertPriority,
}

impl Alert {
    pub fn from_new(id: AlertId, new: NewAlert, now: DateTime<Utc>) -> Self {
        Self {
            id,
            category: new.category,
            vehicle_id: new.vehicle_id,
            priority: new.priority,
            message: new.message,
            created_at: now,
            is_acknowledged: false,
        }
    }
}
