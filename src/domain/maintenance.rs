//! Maintenance - Maintenance Records, Payloads and Workflow Stages

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::{BayId, MaintenanceId, MechanicId, VehicleId};

/// Maintenance category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceKind {
    #[default]
    Preventive,
    Corrective,
    Periodic,
    Predictive,
}

impl MaintenanceKind {
    pub const ALL: [MaintenanceKind; 4] = [
        MaintenanceKind::Preventive,
        MaintenanceKind::Corrective,
        MaintenanceKind::Periodic,
        MaintenanceKind::Predictive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceKind::Preventive => "preventive",
            MaintenanceKind::Corrective => "corrective",
            MaintenanceKind::Periodic => "periodic",
            MaintenanceKind::Predictive => "predictive",
        }
    }

    /// Work that usually needs a specialized bay
    pub fn prefers_specialized_bay(&self) -> bool {
        matches!(self, MaintenanceKind::Corrective | MaintenanceKind::Predictive)
    }
}

/// Maintenance record status
///
/// `planned → in-progress → completed`, `cancelled` from either open state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceStatus::Planned => "planned",
            MaintenanceStatus::InProgress => "in-progress",
            MaintenanceStatus::Completed => "completed",
            MaintenanceStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, MaintenanceStatus::Planned | MaintenanceStatus::InProgress)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_open()
    }
}

/// Informal UI sequencing tag layered over the status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowStage {
    Analysis,
    Planning,
    Execution,
    Closure,
}

impl WorkflowStage {
    /// Stage implied by a record when none was set explicitly
    pub fn for_record(record: &MaintenanceRecord) -> Self {
        match record.status {
            MaintenanceStatus::Completed | MaintenanceStatus::Cancelled => WorkflowStage::Closure,
            MaintenanceStatus::InProgress => WorkflowStage::Execution,
            MaintenanceStatus::Planned if record.mechanic_id.is_none() && record.bay_id.is_none() => {
                WorkflowStage::Analysis
            }
            MaintenanceStatus::Planned => WorkflowStage::Planning,
        }
    }
}

/// A maintenance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: MaintenanceId,
    pub kind: MaintenanceKind,
    pub vehicle_id: VehicleId,
    pub title: String,
    pub description: String,
    pub status: MaintenanceStatus,
    pub mechanic_id: Option<MechanicId>,
    pub bay_id: Option<BayId>,
    pub urgent: bool,
    pub important: bool,
    pub estimated_cost: f64,
    pub estimated_duration_hours: f64,
    pub final_cost: Option<f64>,
    pub final_duration_hours: Option<f64>,
    pub workflow_stage: Option<WorkflowStage>,
    pub scheduled_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl MaintenanceRecord {
    /// Build a record from a creation payload, filling defaults
    pub fn from_new(id: MaintenanceId, new: NewMaintenance, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind: new.kind,
            vehicle_id: new.vehicle_id,
            title: new.title,
            description: new.description.unwrap_or_default(),
            status: new.status.unwrap_or_default(),
            mechanic_id: None,
            bay_id: None,
            urgent: new.urgent,
            important: new.important,
            estimated_cost: new.estimated_cost.unwrap_or(0.0),
            estimated_duration_hours: new.estimated_duration_hours.unwrap_or(0.0),
            final_cost: None,
            final_duration_hours: None,
            workflow_stage: new.workflow_stage,
            scheduled_date: new.scheduled_date,
            created_at: now,
            completed_at: None,
        }
    }

    /// Explicit stage, or the one implied by status and assignments
    pub fn stage(&self) -> WorkflowStage {
        self.workflow_stage
            .unwrap_or_else(|| WorkflowStage::for_record(self))
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// Payload for creating a maintenance record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewMaintenance {
    pub vehicle_id: VehicleId,
    pub title: String,
    #[serde(default)]
    pub kind: MaintenanceKind,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<MaintenanceStatus>,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub important: bool,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub estimated_duration_hours: Option<f64>,
    #[serde(default)]
    pub workflow_stage: Option<WorkflowStage>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
}

impl NewMaintenance {
    pub fn new(vehicle_id: impl Into<VehicleId>, title: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            title: title.into(),
            kind: MaintenanceKind::default(),
            description: None,
            status: None,
            urgent: false,
            important: false,
            estimated_cost: None,
            estimated_duration_hours: None,
            workflow_stage: None,
            scheduled_date: None,
        }
    }
}

/// Partial update merged into an existing record; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MaintenancePatch {
    pub kind: Option<MaintenanceKind>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<MaintenanceStatus>,
    pub urgent: Option<bool>,
    pub important: Option<bool>,
    pub estimated_cost: Option<f64>,
    pub estimated_duration_hours: Option<f64>,
    pub workflow_stage: Option<WorkflowStage>,
    pub scheduled_date: Option<NaiveDate>,
}

impl MaintenancePatch {
    pub fn apply_to(self, record: &mut MaintenanceRecord) {
        if let Some(kind) = self.kind {
            record.kind = kind;
        }
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(urgent) = self.urgent {
            record.urgent = urgent;
        }
        if let Some(important) = self.important {
            record.important = important;
        }
        if let Some(cost) = self.estimated_cost {
            record.estimated_cost = cost;
        }
        if let Some(hours) = self.estimated_duration_hours {
            record.estimated_duration_hours = hours;
        }
        if let Some(stage) = self.workflow_stage {
            record.workflow_stage = Some(stage);
        }
        if let Some(date) = self.scheduled_date {
            record.scheduled_date = Some(date);
        }
    }
}
