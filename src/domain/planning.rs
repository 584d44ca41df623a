//! Planning - Scheduled Workshop Slots

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{BayId, MaintenanceId, MechanicId, PlanningId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PlanningStatus {
    #[default]
    Scheduled,
    InProgress,
    Done,
    Cancelled,
}

impl PlanningStatus {
    /// Whether the slot still books its mechanic and bay
    pub fn is_active(&self) -> bool {
        matches!(self, PlanningStatus::Scheduled | PlanningStatus::InProgress)
    }
}

/// Links a maintenance record to a mechanic, a bay and a time slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningEntry {
    pub id: PlanningId,
    pub maintenance_id: MaintenanceId,
    pub mechanic_id: MechanicId,
    pub bay_id: BayId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: f64,
    pub status: PlanningStatus,
}

impl PlanningEntry {
    pub fn from_new(id: PlanningId, new: NewPlanningEntry) -> Self {
        Self {
            id,
            maintenance_id: new.maintenance_id,
            mechanic_id: new.mechanic_id,
            bay_id: new.bay_id,
            date: new.date,
            start_time: new.start_time,
            duration_hours: new.duration_hours,
            status: new.status.unwrap_or_default(),
        }
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }

    /// End of the slot, clamped to the calendar range
    pub fn ends_at(&self) -> NaiveDateTime {
        let minutes = (self.duration_hours * 60.0).round() as i64;
        TimeDelta::try_minutes(minutes)
            .and_then(|d| self.starts_at().checked_add_signed(d))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Whether both slots book the same mechanic or bay at overlapping times
    pub fn clashes_with(&self, other: &PlanningEntry) -> bool {
        self.status.is_active()
            && other.status.is_active()
            && (self.mechanic_id == other.mechanic_id || self.bay_id == other.bay_id)
            && self.overlaps(other)
    }

    /// Whether two slots overlap in time
    pub fn overlaps(&self, other: &PlanningEntry) -> bool {
        self.starts_at() < other.ends_at() && other.starts_at() < self.ends_at()
    }
}

/// Payload for scheduling a maintenance slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewPlanningEntry {
    pub maintenance_id: MaintenanceId,
    pub mechanic_id: MechanicId,
    pub bay_id: BayId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: f64,
    #[serde(default)]
    pub status: Option<PlanningStatus>,
}
