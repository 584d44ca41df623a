//! Availability - Mechanic and Bay Lookups for Assignment

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_MECHANIC_ASSIGNMENTS;
use crate::domain::{BayCapability, MaintenanceKind, Mechanic, MechanicStatus, WorkshopBay};
use crate::state::FleetState;

/// Mechanic search criteria
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MechanicFilter {
    /// Skill or specialty, case-insensitive
    pub skill: Option<String>,
    /// Time of day the mechanic must be on shift
    pub on_shift_at: Option<NaiveTime>,
    /// Also return busy mechanics below the assignment cap
    pub include_busy: bool,
}

impl MechanicFilter {
    pub fn with_skill(skill: impl Into<String>) -> Self {
        Self {
            skill: Some(skill.into()),
            ..Default::default()
        }
    }

    fn matches(&self, mechanic: &Mechanic) -> bool {
        let status_ok = match mechanic.status {
            MechanicStatus::Available => true,
            MechanicStatus::Busy => {
                self.include_busy && mechanic.current_assignments < MAX_MECHANIC_ASSIGNMENTS
            }
            MechanicStatus::OffDuty => false,
        };
        let skill_ok = self.skill.as_deref().is_none_or(|skill| mechanic.has_skill(skill));
        let shift_ok = self
            .on_shift_at
            .is_none_or(|at| mechanic.working_hours.contains(at));

        status_ok && skill_ok && shift_ok
    }
}

/// Mechanics matching the filter, least loaded first
pub fn available_mechanics<'a>(
    state: &'a FleetState,
    filter: &MechanicFilter,
) -> Vec<&'a Mechanic> {
    let mut mechanics: Vec<_> = state
        .mechanics
        .iter()
        .filter(|m| filter.matches(m))
        .collect();
    mechanics.sort_by_key(|m| m.current_assignments);
    mechanics
}

/// Free bays, optionally restricted to one capability
pub fn free_bays(state: &FleetState, capability: Option<BayCapability>) -> Vec<&WorkshopBay> {
    state
        .bays
        .iter()
        .filter(|b| b.is_free() && capability.is_none_or(|c| b.capability == c))
        .collect()
}

/// Best free bay for a kind of work
///
/// Corrective and predictive work prefers specialized bays, preventive and periodic
/// work prefers general bays. Falls back to any free bay.
pub fn suggest_bay(state: &FleetState, kind: MaintenanceKind) -> Option<&WorkshopBay> {
    let preferred = if kind.prefers_specialized_bay() {
        BayCapability::Specialized
    } else {
        BayCapability::General
    };

    free_bays(state, Some(preferred))
        .into_iter()
        .next()
        .or_else(|| free_bays(state, None).into_iter().next())
}
