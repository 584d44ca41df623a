//! Action Scripts
//!
//! A TOML document listing actions to replay against a store:
//!
//! ```toml
//! [[actions]]
//! type = "assign_mechanic"
//! maintenance_id = "mnt-003"
//! mechanic_id = "mec-003"
//! ```
//!
//! Dates and times are written as quoted strings (`"2026-10-20"`, `"09:00:00"`).

use std::path::Path;

use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::Session;
use crate::error::Result;
use crate::state::action::{FleetAction, StoreEvent};
use crate::state::store::FleetStore;

/// Ordered list of actions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ActionScript {
    #[serde(default)]
    pub actions: Vec<FleetAction>,
}

/// Result of one scripted action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptStep {
    pub index: usize,
    pub action: &'static str,
    pub events: Vec<StoreEvent>,
    pub error: Option<String>,
}

impl ScriptStep {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl ActionScript {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_toml_str(&content)?;
        info!(path = %path.display(), actions = script.actions.len(), "Action script loaded");
        Ok(script)
    }

    /// JSON Schema describing the script format
    pub fn json_schema() -> Schema {
        schema_for!(ActionScript)
    }

    /// Dispatch every action through the session
    ///
    /// Stops at the first rejected action unless `keep_going` is set. Every step that
    /// ran is reported, failed ones carry their error.
    pub fn run(
        self,
        store: &mut FleetStore,
        session: &Session,
        keep_going: bool,
    ) -> Vec<ScriptStep> {
        let mut steps = Vec::with_capacity(self.actions.len());

        for (index, action) in self.actions.into_iter().enumerate() {
            let name = action.name();
            match store.dispatch_as(session, action) {
                Ok(events) => steps.push(ScriptStep {
                    index,
                    action: name,
                    events,
                    error: None,
                }),
                Err(e) => {
                    warn!(index, action = name, error = %e, "Scripted action failed");
                    steps.push(ScriptStep {
                        index,
                        action: name,
                        events: Vec::new(),
                        error: Some(e.to_string()),
                    });
                    if !keep_going {
                        break;
                    }
                }
            }
        }

        steps
    }
}
