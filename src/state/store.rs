//! Fleet Store
//!
//! Owns the current `FleetState` and is the only place it changes. Follows a
//! unidirectional flow:
//!
//! ```text
//! caller → dispatch(action) → reduce → swap state → activity log → publish events
//! ```

use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::{debug, info, warn};

use crate::auth::Session;
use crate::domain::config::StoreConfig;
use crate::error::Result;
use crate::seed::demo_fleet;
use crate::state::action::{FleetAction, StoreEvent};
use crate::state::activity_log::{ActivityLog, ActivityOutcome};
use crate::state::fleet::FleetState;
use crate::state::reducer::reduce;
use crate::state::stats::FleetStats;

/// Fleet store - single writer over the fleet collections
pub struct FleetStore {
    state: FleetState,
    activity: ActivityLog,
    subscribers: Vec<Sender<StoreEvent>>,
    /// Bumped on every applied action
    revision: u64,
}

impl FleetStore {
    /// Create a store over an initial state
    pub fn new(state: FleetState) -> Self {
        Self {
            state,
            activity: ActivityLog::default(),
            subscribers: Vec::new(),
            revision: 0,
        }
    }

    /// Create a store from configuration, seeding the demo fleet when enabled
    pub fn from_config(config: &StoreConfig) -> Self {
        let state = if config.seed_demo_data {
            demo_fleet(Utc::now().date_naive())
        } else {
            FleetState::new()
        };
        info!(
            seeded = config.seed_demo_data,
            vehicles = state.vehicles.len(),
            "Fleet store initialized"
        );
        Self::new(state).with_activity_capacity(config.activity_capacity)
    }

    pub fn with_activity_capacity(mut self, capacity: usize) -> Self {
        self.activity = ActivityLog::new(capacity);
        self
    }

    // ==================== Getters ====================

    pub fn state(&self) -> &FleetState {
        &self.state
    }

    /// Derived statistics for the current state
    pub fn stats(&self) -> FleetStats {
        self.state.stats()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    /// Receive every event applied from now on
    pub fn subscribe(&mut self) -> Receiver<StoreEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    // ==================== Dispatch ====================

    /// Apply an action at the current time
    pub fn dispatch(&mut self, action: FleetAction) -> Result<Vec<StoreEvent>> {
        self.dispatch_at(action, Utc::now())
    }

    /// Apply an action with an explicit timestamp
    pub fn dispatch_at(
        &mut self,
        action: FleetAction,
        now: DateTime<Utc>,
    ) -> Result<Vec<StoreEvent>> {
        self.apply(action, None, now)
    }

    /// Apply an action on behalf of a session, checking its role first
    pub fn dispatch_as(
        &mut self,
        session: &Session,
        action: FleetAction,
    ) -> Result<Vec<StoreEvent>> {
        let now = Utc::now();
        let actor = Some(session.user().name.clone());

        if let Err(e) = session.require(action.required_permission()) {
            warn!(
                action = action.name(),
                role = session.role().label(),
                "Dispatch forbidden"
            );
            self.activity.push(
                action.name(),
                actor,
                ActivityOutcome::Rejected {
                    reason: e.to_string(),
                },
                now,
            );
            return Err(e);
        }

        self.apply(action, actor, now)
    }

    fn apply(
        &mut self,
        action: FleetAction,
        actor: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Vec<StoreEvent>> {
        let name = action.name();
        debug!(action = name, "Dispatching");

        match reduce(&self.state, action, now) {
            Ok(transition) => {
                self.state = transition.state;
                self.revision += 1;
                self.activity.push(
                    name,
                    actor,
                    ActivityOutcome::Applied {
                        events: transition.events.len(),
                    },
                    now,
                );
                info!(
                    action = name,
                    events = transition.events.len(),
                    revision = self.revision,
                    "Action applied"
                );
                self.publish(&transition.events);
                Ok(transition.events)
            }
            Err(e) => {
                warn!(action = name, error = %e, "Action rejected");
                self.activity.push(
                    name,
                    actor,
                    ActivityOutcome::Rejected {
                        reason: e.to_string(),
                    },
                    now,
                );
                Err(e)
            }
        }
    }

    /// Send events to subscribers, dropping disconnected ones
    fn publish(&mut self, events: &[StoreEvent]) {
        if events.is_empty() || self.subscribers.is_empty() {
            return;
        }
        self.subscribers
            .retain(|tx| events.iter().all(|event| tx.send(event.clone()).is_ok()));
    }
}

impl Default for FleetStore {
    fn default() -> Self {
        Self::new(FleetState::new())
    }
}
