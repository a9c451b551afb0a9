//! Action names and role sets.
//!
//! An [`Action`] is a named capability gated by the policy table. Actions are
//! opaque strings at this layer; the table decides which roles may perform
//! them. A [`RoleSet`] is the value side of a flat table entry.

use std::borrow::Cow;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::roles::Role;

/// Named capability gated by the policy table.
///
/// Actions cover both page visibility (`users`, `contracts`) and operations
/// (`delete`, `export`); the table keys them in one namespace. The well-known
/// names used by navigation guards are provided as associated constants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(Cow<'static, str>);

impl Action {
    /// Delete a record (customer, property, contract).
    pub const DELETE: Action = Action::borrowed("delete");

    /// Export data outside the system.
    pub const EXPORT: Action = Action::borrowed("export");

    /// Decline a customer's product request.
    pub const DECLINE_PRODUCT_REQUEST: Action = Action::borrowed("decline-product-request");

    /// User account management page.
    pub const USERS_PAGE: Action = Action::borrowed("users");

    /// Customer records page.
    pub const CUSTOMERS_PAGE: Action = Action::borrowed("customers");

    /// Property inventory page.
    pub const PROPERTIES_PAGE: Action = Action::borrowed("properties");

    /// Contracts page.
    pub const CONTRACTS_PAGE: Action = Action::borrowed("contracts");

    /// Payments page.
    pub const PAYMENTS_PAGE: Action = Action::borrowed("payments");

    /// Receipts page.
    pub const RECEIPTS_PAGE: Action = Action::borrowed("receipts");

    /// Notification centre. Structured entry: see the `email` sub-action.
    pub const NOTIFICATIONS: Action = Action::borrowed("notifications");

    const fn borrowed(name: &'static str) -> Self {
        Action(Cow::Borrowed(name))
    }

    /// Creates an action from an arbitrary name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Action(name.into())
    }

    /// Returns the action name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Action {
    fn from(name: &'static str) -> Self {
        Action(Cow::Borrowed(name))
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Action(Cow::Owned(name))
    }
}

/// Set of roles permitted to perform an action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet {
    roles: Vec<Role>,
}

impl RoleSet {
    /// Creates a new role set.
    pub fn new(roles: Vec<Role>) -> Self {
        let mut set = RoleSet::empty();
        for role in roles {
            set.grant(role);
        }
        set
    }

    /// Creates an empty role set (denies everyone).
    pub fn empty() -> Self {
        Self { roles: Vec::new() }
    }

    /// Returns whether this set contains the given role.
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Adds a role to the set.
    pub fn grant(&mut self, role: Role) {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
    }

    /// Removes a role from the set.
    pub fn revoke(&mut self, role: Role) {
        self.roles.retain(|r| *r != role);
    }

    /// Returns all roles in the set.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Returns the number of roles in the set.
    pub fn len(&self) -> usize {
        self.roles.len()
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        Self::new(roles)
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        Self::new(roles.to_vec())
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_constants_are_distinct() {
        let actions = [
            Action::DELETE,
            Action::EXPORT,
            Action::DECLINE_PRODUCT_REQUEST,
            Action::USERS_PAGE,
            Action::CUSTOMERS_PAGE,
            Action::PROPERTIES_PAGE,
            Action::CONTRACTS_PAGE,
            Action::PAYMENTS_PAGE,
            Action::RECEIPTS_PAGE,
            Action::NOTIFICATIONS,
        ];
        for (i, a) in actions.iter().enumerate() {
            for b in &actions[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_action_equality_is_by_name() {
        assert_eq!(Action::new("delete"), Action::DELETE);
        assert_eq!(Action::from("export".to_string()), Action::EXPORT);
        assert_ne!(Action::new("delete"), Action::new("Delete"));
    }

    #[test]
    fn test_action_serde_transparent() {
        let json = serde_json::to_string(&Action::USERS_PAGE).unwrap();
        assert_eq!(json, "\"users\"");

        let action: Action = serde_json::from_str("\"receipts\"").unwrap();
        assert_eq!(action, Action::RECEIPTS_PAGE);
    }

    #[test]
    fn test_role_set_operations() {
        let mut set = RoleSet::empty();
        assert!(!set.contains(Role::Admin));
        assert!(set.is_empty());

        set.grant(Role::Admin);
        assert!(set.contains(Role::Admin));

        set.grant(Role::Admin); // Duplicate grant is no-op
        assert_eq!(set.len(), 1);

        set.grant(Role::Staff);
        assert_eq!(set.len(), 2);

        set.revoke(Role::Admin);
        assert!(!set.contains(Role::Admin));
        assert!(set.contains(Role::Staff));
    }

    #[test]
    fn test_role_set_from_array_dedupes() {
        let set = RoleSet::from([Role::Admin, Role::Admin, Role::SuperAdmin]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(Role::Admin));
        assert!(set.contains(Role::SuperAdmin));
        assert!(!set.contains(Role::Staff));
    }

    #[test]
    fn test_role_set_serde_is_a_list() {
        let set = RoleSet::from([Role::Admin, Role::SuperAdmin]);
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[\"ADMIN\",\"SUPER_ADMIN\"]");

        let parsed: RoleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, set);
    }
}
