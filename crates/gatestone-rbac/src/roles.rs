//! Role definitions for RBAC.
//!
//! Defines 3 roles with escalating privileges:
//! - Staff: day-to-day back-office work (most restrictive)
//! - Admin: destructive and bulk operations
//! - SuperAdmin: tenant-wide administration (least restrictive)

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role in the access control system.
///
/// Roles are ordered from least to most privileged:
/// Staff < Admin < SuperAdmin
///
/// The wire spelling (`STAFF`, `ADMIN`, `SUPER_ADMIN`) is the only spelling
/// accepted at the session boundary; anything else parses to no role at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Day-to-day back-office operator.
    ///
    /// **Permissions:**
    /// - View customers, properties, contracts, payments, receipts
    /// - Record payments and issue receipts
    /// - Cannot delete records or export data
    ///
    /// **Use Cases:**
    /// - Sales agents
    /// - Front-desk clerks
    Staff,

    /// Administrator for destructive and bulk operations.
    ///
    /// **Permissions:**
    /// - Everything Staff can do
    /// - Delete records, export data
    /// - Decline product requests
    /// - Cannot manage user accounts
    ///
    /// **Use Cases:**
    /// - Branch managers
    /// - Operations leads
    Admin,

    /// Tenant-wide administrator.
    ///
    /// **Permissions:**
    /// - Everything Admin can do
    /// - Manage user accounts and roles
    /// - Send notification emails
    ///
    /// **Use Cases:**
    /// - Business owners
    /// - IT administrators
    SuperAdmin,
}

/// Error returned when a role spelling is not one of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct ParseRoleError(pub String);

impl Role {
    /// All roles, least to most privileged.
    pub const ALL: [Role; 3] = [Role::Staff, Role::Admin, Role::SuperAdmin];

    /// Parses the wire spelling of a role.
    ///
    /// This is the single validation step for role strings crossing the
    /// session boundary. Unknown spellings yield `None` (fail closed),
    /// never an error the caller has to handle.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "STAFF" => Some(Role::Staff),
            "ADMIN" => Some(Role::Admin),
            "SUPER_ADMIN" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Returns the wire spelling of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Staff => "STAFF",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Returns the privilege level (0 = least privileged).
    pub fn privilege(self) -> u8 {
        match self {
            Role::Staff => 0,
            Role::Admin => 1,
            Role::SuperAdmin => 2,
        }
    }

    /// Returns whether this role holds at least the privilege of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatestone_rbac::Role;
    ///
    /// assert!(Role::Admin.at_least(Role::Staff));
    /// assert!(!Role::Staff.at_least(Role::Admin));
    /// assert!(Role::Admin.at_least(Role::Admin));
    /// ```
    pub fn at_least(self, other: Role) -> bool {
        self.privilege() >= other.privilege()
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        // Enum ordering (derived Ord): Staff < Admin < SuperAdmin
        assert!(Role::Staff < Role::Admin);
        assert!(Role::Admin < Role::SuperAdmin);

        // Privilege ordering matches the enum ordering
        assert!(Role::Staff.privilege() < Role::Admin.privilege());
        assert!(Role::Admin.privilege() < Role::SuperAdmin.privilege());
    }

    #[test]
    fn test_parse_wire_spellings() {
        assert_eq!(Role::parse("STAFF"), Some(Role::Staff));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("SUPER_ADMIN"), Some(Role::SuperAdmin));
    }

    #[test]
    fn test_parse_fails_closed() {
        // Only the exact wire spelling is accepted
        assert_eq!(Role::parse("staff"), None);
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse("SUPERADMIN"), None);
        assert_eq!(Role::parse("SUPER-ADMIN"), None);
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("root"), None);
    }

    #[test]
    fn test_parse_round_trips() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_from_str_error_carries_input() {
        let err = "OPERATOR".parse::<Role>().unwrap_err();
        assert_eq!(err, ParseRoleError("OPERATOR".to_string()));
    }

    #[test]
    fn test_at_least() {
        assert!(Role::SuperAdmin.at_least(Role::Staff));
        assert!(Role::SuperAdmin.at_least(Role::Admin));
        assert!(Role::Admin.at_least(Role::Staff));
        assert!(!Role::Staff.at_least(Role::SuperAdmin));
        for role in Role::ALL {
            assert!(role.at_least(role));
        }
    }

    #[test]
    fn test_serde_spelling_matches_wire() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"SUPER_ADMIN\"");

        let role: Role = serde_json::from_str("\"STAFF\"").unwrap();
        assert_eq!(role, Role::Staff);
    }
}
