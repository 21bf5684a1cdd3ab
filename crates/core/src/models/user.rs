//! Session identity. Never persisted.

use serde::{Deserialize, Serialize};

use crate::types::UserRole;

/// The person operating the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    /// The privileged session identity.
    #[must_use]
    pub fn admin() -> Self {
        Self {
            name: "Admin User".to_string(),
            role: UserRole::Admin,
            phone: Some("1234567890".to_string()),
        }
    }

    /// The default, non-privileged session identity.
    #[must_use]
    pub fn editor() -> Self {
        Self {
            name: "Agent Alex".to_string(),
            role: UserRole::Editor,
            phone: Some("9876543210".to_string()),
        }
    }

    /// Session identity for the given role.
    #[must_use]
    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Admin => Self::admin(),
            UserRole::Editor => Self::editor(),
        }
    }

    /// The identity on the other side of the role switch.
    #[must_use]
    pub fn toggled(&self) -> Self {
        Self::for_role(self.role.toggled())
    }

    /// Whether this session may perform privileged writes.
    #[must_use]
    pub const fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}

impl Default for User {
    fn default() -> Self {
        Self::editor()
    }
}
