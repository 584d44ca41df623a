//! Priority - Eisenhower Matrix over Open Maintenance

use serde::Serialize;

use crate::domain::{MaintenanceId, MaintenanceRecord};

/// Urgency/importance quadrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    /// Urgent and important
    DoFirst,
    /// Important only
    Schedule,
    /// Urgent only
    Delegate,
    /// Neither
    Eliminate,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::DoFirst,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Eliminate,
    ];

    pub fn of(record: &MaintenanceRecord) -> Self {
        match (record.urgent, record.important) {
            (true, true) => Quadrant::DoFirst,
            (false, true) => Quadrant::Schedule,
            (true, false) => Quadrant::Delegate,
            (false, false) => Quadrant::Eliminate,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "do first",
            Quadrant::Schedule => "schedule",
            Quadrant::Delegate => "delegate",
            Quadrant::Eliminate => "eliminate",
        }
    }
}

/// Open records grouped by quadrant, each list in input order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EisenhowerMatrix {
    pub do_first: Vec<MaintenanceId>,
    pub schedule: Vec<MaintenanceId>,
    pub delegate: Vec<MaintenanceId>,
    pub eliminate: Vec<MaintenanceId>,
}

impl EisenhowerMatrix {
    pub fn quadrant(&self, quadrant: Quadrant) -> &[MaintenanceId] {
        match quadrant {
            Quadrant::DoFirst => &self.do_first,
            Quadrant::Schedule => &self.schedule,
            Quadrant::Delegate => &self.delegate,
            Quadrant::Eliminate => &self.eliminate,
        }
    }

    fn quadrant_mut(&mut self, quadrant: Quadrant) -> &mut Vec<MaintenanceId> {
        match quadrant {
            Quadrant::DoFirst => &mut self.do_first,
            Quadrant::Schedule => &mut self.schedule,
            Quadrant::Delegate => &mut self.delegate,
            Quadrant::Eliminate => &mut self.eliminate,
        }
    }

    pub fn len(&self) -> usize {
        Quadrant::ALL.iter().map(|q| self.quadrant(*q).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Group the open records among `records` into the four quadrants
pub fn eisenhower_matrix<'a>(
    records: impl IntoIterator<Item = &'a MaintenanceRecord>,
) -> EisenhowerMatrix {
    let mut matrix = EisenhowerMatrix::default();
    for record in records.into_iter().filter(|r| r.is_open()) {
        matrix
            .quadrant_mut(Quadrant::of(record))
            .push(record.id.clone());
    }
    matrix
}
