//! Session - Current User Context
//!
//! The signed-in user travels as an explicit value passed to whoever needs it;
//! nothing reads a global "current user".

use serde::{Deserialize, Serialize};

use super::permissions::{Permission, Role, View, has_permission, permissions_for};
use crate::domain::config::SessionConfig;
use crate::error::{Error, Result};

/// A demo user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            role,
        }
    }
}

/// Session of a signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    user: User,
}

impl Session {
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// Demo session for a role
    pub fn demo(role: Role) -> Self {
        Self::new(User::new(format!("Demo {}", role.label()), role))
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(User::new(config.user_name.clone(), config.role))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn can(&self, permission: Permission) -> bool {
        has_permission(self.user.role, permission)
    }

    /// `Forbidden` unless the session holds the permission
    pub fn require(&self, permission: Permission) -> Result<()> {
        if self.can(permission) {
            Ok(())
        } else {
            Err(Error::Forbidden {
                role: self.user.role.label(),
                permission: permission.label(),
            })
        }
    }

    pub fn can_view(&self, view: View) -> bool {
        self.can(view.required_permission())
    }

    /// Views shown in the navigation for this session, in menu order
    pub fn accessible_views(&self) -> Vec<View> {
        View::ALL.into_iter().filter(|v| self.can_view(*v)).collect()
    }

    pub fn permissions(&self) -> &'static [Permission] {
        permissions_for(self.user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessible_views_by_role() {
        let admin = Session::demo(Role::Admin);
        assert_eq!(admin.accessible_views().len(), View::ALL.len());

        let driver = Session::demo(Role::Driver);
        assert_eq!(
            driver.accessible_views(),
            vec![View::Dashboard, View::Vehicles, View::Alerts]
        );
    }

    #[test]
    fn test_require_reports_role_and_permission() {
        let mechanic = Session::demo(Role::Mechanic);
        assert!(mechanic.require(Permission::CompleteMaintenance).is_ok());
        let err = mechanic
            .require(Permission::AssignBays)
            .expect_err("mechanics cannot assign bays");
        assert_eq!(
            err.to_string(),
            "role 'mechanic' is not allowed to assign workshop bays"
        );
    }

    #[test]
    fn test_sessions_are_independent() {
        let a = Session::demo(Role::Admin);
        let b = Session::demo(Role::Driver);
        assert_ne!(a.user().id, b.user().id);
        assert!(a.can(Permission::ManageUsers));
        assert!(!b.can(Permission::ManageUsers));
    }
}
