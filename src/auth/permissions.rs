//! Permissions - Static Role Table
//!
//! Which role may see which view and dispatch which action. The table is static:
//! there is no user management beyond picking a role.

use std::str::FromStr;
use std::sync::OnceLock;

use ahash::AHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// User roles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    #[default]
    Admin,
    FleetManager,
    WorkshopManager,
    Mechanic,
    Driver,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::FleetManager,
        Role::WorkshopManager,
        Role::Mechanic,
        Role::Driver,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::FleetManager => "fleet-manager",
            Role::WorkshopManager => "workshop-manager",
            Role::Mechanic => "mechanic",
            Role::Driver => "driver",
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Invalid {
                message: format!("unknown role '{s}'"),
            })
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Individual permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    ViewDashboard,
    ViewVehicles,
    ViewDrivers,
    ViewMechanics,
    ViewMaintenance,
    ViewWorkshop,
    ViewAlerts,
    ViewPlanning,
    ViewReports,
    ManageUsers,
    ManageMaintenance,
    AssignMechanics,
    AssignBays,
    CompleteMaintenance,
    ManageVehicles,
    ManageDrivers,
    RecordOdometer,
    RaiseAlerts,
    AcknowledgeAlerts,
    SchedulePlanning,
    UpdatePlanning,
}

impl Permission {
    /// Verb phrase used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            Permission::ViewDashboard => "view the dashboard",
            Permission::ViewVehicles => "view vehicles",
            Permission::ViewDrivers => "view drivers",
            Permission::ViewMechanics => "view mechanics",
            Permission::ViewMaintenance => "view maintenance",
            Permission::ViewWorkshop => "view the workshop",
            Permission::ViewAlerts => "view alerts",
            Permission::ViewPlanning => "view planning",
            Permission::ViewReports => "view reports",
            Permission::ManageUsers => "manage users",
            Permission::ManageMaintenance => "manage maintenance records",
            Permission::AssignMechanics => "assign mechanics",
            Permission::AssignBays => "assign workshop bays",
            Permission::CompleteMaintenance => "complete maintenance",
            Permission::ManageVehicles => "manage vehicles",
            Permission::ManageDrivers => "manage drivers",
            Permission::RecordOdometer => "record odometer readings",
            Permission::RaiseAlerts => "raise alerts",
            Permission::AcknowledgeAlerts => "acknowledge alerts",
            Permission::SchedulePlanning => "schedule maintenance",
            Permission::UpdatePlanning => "update planning",
        }
    }
}

/// Dashboard views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Dashboard,
    Vehicles,
    Drivers,
    Mechanics,
    Maintenance,
    Workshop,
    Alerts,
    Planning,
    Reports,
    Users,
}

impl View {
    pub const ALL: [View; 10] = [
        View::Dashboard,
        View::Vehicles,
        View::Drivers,
        View::Mechanics,
        View::Maintenance,
        View::Workshop,
        View::Alerts,
        View::Planning,
        View::Reports,
        View::Users,
    ];

    pub fn required_permission(&self) -> Permission {
        match self {
            View::Dashboard => Permission::ViewDashboard,
            View::Vehicles => Permission::ViewVehicles,
            View::Drivers => Permission::ViewDrivers,
            View::Mechanics => Permission::ViewMechanics,
            View::Maintenance => Permission::ViewMaintenance,
            View::Workshop => Permission::ViewWorkshop,
            View::Alerts => Permission::ViewAlerts,
            View::Planning => Permission::ViewPlanning,
            View::Reports => Permission::ViewReports,
            View::Users => Permission::ManageUsers,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Vehicles => "Vehicles",
            View::Drivers => "Drivers",
            View::Mechanics => "Mechanics",
            View::Maintenance => "Maintenance",
            View::Workshop => "Workshop",
            View::Alerts => "Alerts",
            View::Planning => "Planning",
            View::Reports => "Reports",
            View::Users => "Users",
        }
    }
}

static PERMISSIONS: OnceLock<AHashMap<Role, &'static [Permission]>> = OnceLock::new();

/// Initialize the role table
fn init_permissions() -> AHashMap<Role, &'static [Permission]> {
    use Permission::*;

    let mut map: AHashMap<Role, &'static [Permission]> = AHashMap::new();

    map.insert(
        Role::Admin,
        &[
            ViewDashboard, ViewVehicles, ViewDrivers, ViewMechanics, ViewMaintenance,
            ViewWorkshop, ViewAlerts, ViewPlanning, ViewReports, ManageUsers,
            ManageMaintenance, AssignMechanics, AssignBays, CompleteMaintenance,
            ManageVehicles, ManageDrivers, RecordOdometer, RaiseAlerts, AcknowledgeAlerts,
            SchedulePlanning, UpdatePlanning,
        ],
    );

    map.insert(
        Role::FleetManager,
        &[
            ViewDashboard, ViewVehicles, ViewDrivers, ViewMaintenance, ViewAlerts,
            ViewPlanning, ViewReports, ManageMaintenance, ManageVehicles, ManageDrivers,
            RecordOdometer, RaiseAlerts, AcknowledgeAlerts, SchedulePlanning,
        ],
    );

    map.insert(
        Role::WorkshopManager,
        &[
            ViewDashboard, ViewVehicles, ViewMechanics, ViewMaintenance, ViewWorkshop,
            ViewAlerts, ViewPlanning, ViewReports, ManageMaintenance, AssignMechanics,
            AssignBays, CompleteMaintenance, ManageVehicles, RaiseAlerts, AcknowledgeAlerts,
            SchedulePlanning, UpdatePlanning,
        ],
    );

    map.insert(
        Role::Mechanic,
        &[
            ViewDashboard, ViewMaintenance, ViewWorkshop, ViewPlanning, ViewAlerts,
            CompleteMaintenance, RaiseAlerts, UpdatePlanning,
        ],
    );

    map.insert(
        Role::Driver,
        &[ViewDashboard, ViewVehicles, ViewAlerts, RecordOdometer, RaiseAlerts],
    );

    map
}

fn permissions() -> &'static AHashMap<Role, &'static [Permission]> {
    PERMISSIONS.get_or_init(init_permissions)
}

/// Permissions granted to a role
pub fn permissions_for(role: Role) -> &'static [Permission] {
    permissions().get(&role).copied().unwrap_or(&[])
}

/// Whether a role holds a permission
pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions_for(role).contains(&permission)
}
