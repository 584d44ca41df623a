//! ActivityLog - Dispatch History with Ring Buffer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::ACTIVITY_LOG_CAPACITY;
use crate::helpers::BoundedDeque;

/// What became of a dispatched action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActivityOutcome {
    Applied { events: usize },
    Rejected { reason: String },
}

impl ActivityOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityOutcome::Applied { .. } => "APPLIED",
            ActivityOutcome::Rejected { .. } => "REJECTED",
        }
    }
}

/// A single dispatch record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEntry {
    pub id: u64,
    pub action: &'static str,
    /// Session user name, when dispatched through a session
    pub actor: Option<String>,
    pub outcome: ActivityOutcome,
    pub timestamp: DateTime<Utc>,
}

/// Most recent dispatches, oldest evicted first
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: BoundedDeque<ActivityEntry>,
    next_id: u64,
}

impl ActivityLog {
    /// Create a new log with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BoundedDeque::new(capacity),
            next_id: 1,
        }
    }

    pub fn push(
        &mut self,
        action: &'static str,
        actor: Option<String>,
        outcome: ActivityOutcome,
        timestamp: DateTime<Utc>,
    ) {
        let entry = ActivityEntry {
            id: self.next_id,
            action,
            actor,
            outcome,
            timestamp,
        };
        self.next_id += 1;
        self.entries.push(entry);
    }

    /// Entries oldest to newest
    pub fn entries(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    /// Entries newest to oldest
    pub fn recent(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter_rev()
    }

    pub fn rejected(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, ActivityOutcome::Rejected { .. }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(ACTIVITY_LOG_CAPACITY)
    }
}
