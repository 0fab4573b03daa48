//! Roles issued by the API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of an authenticated user.
///
/// The token payload carries roles as integer codes (`rol`):
/// 1 = administrator, 2 = coordinator, 3 = student.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    Admin,
    Coordinator,
    Student,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unknown role code {0}")]
pub struct UnknownRoleError(pub i64);

impl Role {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Role::Admin),
            2 => Some(Role::Coordinator),
            3 => Some(Role::Student),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::Coordinator => 2,
            Role::Student => 3,
        }
    }

    /// Display name as shown in the dashboard header.
    pub fn display_name(self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Coordinator => "Coordinador",
            Role::Student => "Alumno",
        }
    }
}

impl TryFrom<i64> for Role {
    type Error = UnknownRoleError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Role::from_code(code).ok_or(UnknownRoleError(code))
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.display_name())
    }
}
