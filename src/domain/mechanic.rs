//! Mechanic - Workshop Staff

use chrono::NaiveTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::MechanicId;

/// Mechanic availability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MechanicStatus {
    #[default]
    Available,
    Busy,
    OffDuty,
}

impl MechanicStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MechanicStatus::Available => "available",
            MechanicStatus::Busy => "busy",
            MechanicStatus::OffDuty => "off-duty",
        }
    }
}

/// Daily shift, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkingHours {
    pub fn contains(&self, at: NaiveTime) -> bool {
        if self.start <= self.end {
            self.start <= at && at < self.end
        } else {
            // Night shift wrapping midnight
            at >= self.start || at < self.end
        }
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// A workshop mechanic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mechanic {
    pub id: MechanicId,
    pub name: String,
    pub specialty: String,
    /// Open maintenance records assigned to this mechanic
    pub current_assignments: u32,
    pub status: MechanicStatus,
    pub skills: Vec<String>,
    pub working_hours: WorkingHours,
}

impl Mechanic {
    /// Matches the specialty or any listed skill, case-insensitively
    pub fn has_skill(&self, skill: &str) -> bool {
        self.specialty.eq_ignore_ascii_case(skill)
            || self.skills.iter().any(|s| s.eq_ignore_ascii_case(skill))
    }

    /// Take one more open record
    pub(crate) fn take_assignment(&mut self) {
        self.current_assignments += 1;
        self.status = MechanicStatus::Busy;
    }

    /// Release one open record, back to available at zero
    pub(crate) fn release_assignment(&mut self) {
        self.current_assignments = self.current_assignments.saturating_sub(1);
        if self.current_assignments == 0 && self.status == MechanicStatus::Busy {
            self.status = MechanicStatus::Available;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    fn mechanic() -> Mechanic {
        Mechanic {
            id: MechanicId::from("mec-1"),
            name: "Lucas".to_string(),
            specialty: "Engine".to_string(),
            current_assignments: 0,
            status: MechanicStatus::Available,
            skills: vec!["brakes".to_string()],
            working_hours: WorkingHours::default(),
        }
    }

    #[test]
    fn test_working_hours() {
        let day = WorkingHours::default();
        assert!(day.contains(hm(8, 0)));
        assert!(!day.contains(hm(17, 0)));

        let night = WorkingHours { start: hm(22, 0), end: hm(6, 0) };
        assert!(night.contains(hm(23, 30)));
        assert!(night.contains(hm(5, 59)));
        assert!(!night.contains(hm(12, 0)));
    }

    #[test]
    fn test_assignment_counter() {
        let mut m = mechanic();
        m.take_assignment();
        m.take_assignment();
        assert_eq!(m.status, MechanicStatus::Busy);
        m.release_assignment();
        assert_eq!(m.status, MechanicStatus::Busy);
        m.release_assignment();
        assert_eq!(m.current_assignments, 0);
        assert_eq!(m.status, MechanicStatus::Available);
        m.release_assignment();
        assert_eq!(m.current_assignments, 0);
    }

    #[test]
    fn test_release_keeps_off_duty() {
        let mut m = mechanic();
        m.current_assignments = 1;
        m.status = MechanicStatus::OffDuty;
        m.release_assignment();
        assert_eq!(m.status, MechanicStatus::OffDuty);
    }

    #[test]
    fn test_has_skill() {
        let m = mechanic();
        assert!(m.has_skill("engine"));
        assert!(m.has_skill("Brakes"));
        assert!(!m.has_skill("bodywork"));
    }
}
