//! WorkshopBay - Workshop Service Positions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{BayId, VehicleId};

/// What kind of work a bay can host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BayCapability {
    #[default]
    General,
    Specialized,
}

impl BayCapability {
    pub fn label(&self) -> &'static str {
        match self {
            BayCapability::General => "general",
            BayCapability::Specialized => "specialized",
        }
    }
}

/// Bay occupancy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum BayStatus {
    #[default]
    Free,
    Occupied,
    OutOfService,
}

/// A workshop bay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopBay {
    pub id: BayId,
    pub name: String,
    pub capability: BayCapability,
    pub status: BayStatus,
    /// Set exactly when the bay is occupied
    pub vehicle_id: Option<VehicleId>,
}

impl WorkshopBay {
    pub fn is_free(&self) -> bool {
        self.status == BayStatus::Free
    }

    pub(crate) fn occupy(&mut self, vehicle: VehicleId) {
        self.status = BayStatus::Occupied;
        self.vehicle_id = Some(vehicle);
    }

    pub(crate) fn release(&mut self) {
        if self.status == BayStatus::Occupied {
            self.status = BayStatus::Free;
        }
        self.vehicle_id = None;
    }
}
