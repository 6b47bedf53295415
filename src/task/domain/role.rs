//! Caller roles and role-based task visibility.

use super::{ParseUserRoleError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Homeowner requesting services.
    Client,
    /// Tradesperson performing services.
    Contractor,
    /// Platform operator.
    Admin,
}

impl UserRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Contractor => "contractor",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UserRole {
    type Error = ParseUserRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "client" => Ok(Self::Client),
            "contractor" => Ok(Self::Contractor),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseUserRoleError(value.to_owned())),
        }
    }
}

/// Scope of tasks visible to a caller.
///
/// Listing adapters translate this into their native query form; the
/// in-memory adapter evaluates it directly via [`TaskVisibility::permits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskVisibility {
    /// Tasks the given client requested.
    Client(UserId),
    /// Tasks with at least one assignment for the given contractor.
    Contractor(UserId),
    /// Every task.
    All,
}

impl TaskVisibility {
    /// Maps a caller's identity and role to a visibility scope.
    ///
    /// The role set is closed: clients see their own tasks, contractors see
    /// tasks they are assigned to, admins see everything.
    #[must_use]
    pub const fn for_caller(caller_id: UserId, caller_role: UserRole) -> Self {
        match caller_role {
            UserRole::Client => Self::Client(caller_id),
            UserRole::Contractor => Self::Contractor(caller_id),
            UserRole::Admin => Self::All,
        }
    }

    /// Returns whether a task owned by `client_id` and assigned to
    /// `assigned_contractors` falls inside this scope.
    #[must_use]
    pub fn permits(&self, client_id: UserId, assigned_contractors: &[UserId]) -> bool {
        match self {
            Self::Client(caller_id) => client_id == *caller_id,
            Self::Contractor(caller_id) => assigned_contractors.contains(caller_id),
            Self::All => true,
        }
    }
}
