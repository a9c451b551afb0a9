//! The policy table.
//!
//! Maps action names to the roles permitted to perform them. The table is
//! built once at startup from deployment configuration and is read-only for
//! the process lifetime; there is no mutation API after construction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::{Action, RoleSet};
use crate::roles::Role;

/// A single entry in the policy table.
///
/// Most actions are `Flat`: a plain set of permitted roles. A few actions
/// carry sub-cases (e.g. the notification centre, where viewing and sending
/// email have different role sets); those are `Structured` and must be
/// queried through their sub-actions. Querying a `Structured` entry as if it
/// were flat is a deny, never a guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyEntry {
    /// Roles permitted to perform the action.
    Flat(RoleSet),

    /// Sub-cases, each with its own entry.
    Structured(BTreeMap<String, PolicyEntry>),
}

impl PolicyEntry {
    /// Returns the flat role set, if this entry is flat.
    pub fn as_flat(&self) -> Option<&RoleSet> {
        match self {
            PolicyEntry::Flat(roles) => Some(roles),
            PolicyEntry::Structured(_) => None,
        }
    }

    /// Returns the entry for a sub-action, if this entry is structured.
    pub fn sub_entry(&self, sub_action: &str) -> Option<&PolicyEntry> {
        match self {
            PolicyEntry::Flat(_) => None,
            PolicyEntry::Structured(sub) => sub.get(sub_action),
        }
    }
}

impl From<RoleSet> for PolicyEntry {
    fn from(roles: RoleSet) -> Self {
        PolicyEntry::Flat(roles)
    }
}

impl<const N: usize> From<[Role; N]> for PolicyEntry {
    fn from(roles: [Role; N]) -> Self {
        PolicyEntry::Flat(RoleSet::from(roles))
    }
}

/// Immutable mapping from action name to policy entry.
///
/// Every action referenced by the consuming application must have an entry
/// here; the evaluator treats a missing entry as a deny (fail closed), so a
/// configuration omission surfaces as denied access, never a fault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicyTable {
    entries: BTreeMap<Action, PolicyEntry>,
}

impl PolicyTable {
    /// Creates an empty table (denies everything).
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Adds a flat entry allowing the given roles.
    pub fn allow(mut self, action: impl Into<Action>, roles: impl Into<RoleSet>) -> Self {
        self.entries
            .insert(action.into(), PolicyEntry::Flat(roles.into()));
        self
    }

    /// Adds a structured entry with named sub-cases.
    pub fn nested(
        mut self,
        action: impl Into<Action>,
        sub: impl IntoIterator<Item = (&'static str, PolicyEntry)>,
    ) -> Self {
        let sub = sub
            .into_iter()
            .map(|(name, entry)| (name.to_string(), entry))
            .collect();
        self.entries
            .insert(action.into(), PolicyEntry::Structured(sub));
        self
    }

    /// Looks up the entry for an action.
    pub fn entry(&self, action: &Action) -> Option<&PolicyEntry> {
        self.entries.get(action)
    }

    /// Returns whether the table has an entry for the action.
    pub fn contains(&self, action: &Action) -> bool {
        self.entries.contains_key(action)
    }

    /// Returns all actions in the table.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.entries.keys()
    }

    /// Returns all entries in the table.
    pub fn iter(&self) -> impl Iterator<Item = (&Action, &PolicyEntry)> {
        self.entries.iter()
    }

    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The default deployment table for the hire-purchase back office.
    ///
    /// **Access:**
    /// - Domain pages (customers, properties, contracts, payments, receipts)
    ///   are visible to every role
    /// - Delete, export and product-request declines require Admin
    /// - The users page is SuperAdmin-only
    /// - Notifications are structured: everyone may view, only SuperAdmin
    ///   may send email
    pub fn back_office() -> Self {
        use Role::{Admin, Staff, SuperAdmin};

        PolicyTable::new()
            .allow(Action::CUSTOMERS_PAGE, [Staff, Admin, SuperAdmin])
            .allow(Action::PROPERTIES_PAGE, [Staff, Admin, SuperAdmin])
            .allow(Action::CONTRACTS_PAGE, [Staff, Admin, SuperAdmin])
            .allow(Action::PAYMENTS_PAGE, [Staff, Admin, SuperAdmin])
            .allow(Action::RECEIPTS_PAGE, [Staff, Admin, SuperAdmin])
            .allow(Action::DELETE, [Admin, SuperAdmin])
            .allow(Action::EXPORT, [Admin, SuperAdmin])
            .allow(Action::DECLINE_PRODUCT_REQUEST, [Admin, SuperAdmin])
            .allow(Action::USERS_PAGE, [SuperAdmin])
            .nested(
                Action::NOTIFICATIONS,
                [
                    ("view", PolicyEntry::from([Staff, Admin, SuperAdmin])),
                    ("email", PolicyEntry::from([SuperAdmin])),
                ],
            )
    }
}

impl FromIterator<(Action, PolicyEntry)> for PolicyTable {
    fn from_iter<T: IntoIterator<Item = (Action, PolicyEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_entry_lookup() {
        let table = PolicyTable::new().allow(Action::DELETE, [Role::Admin, Role::SuperAdmin]);

        let entry = table.entry(&Action::DELETE).unwrap();
        let roles = entry.as_flat().unwrap();
        assert!(roles.contains(Role::Admin));
        assert!(roles.contains(Role::SuperAdmin));
        assert!(!roles.contains(Role::Staff));
    }

    #[test]
    fn test_missing_entry_is_none() {
        let table = PolicyTable::new();
        assert!(table.entry(&Action::DELETE).is_none());
        assert!(!table.contains(&Action::DELETE));
    }

    #[test]
    fn test_structured_entry_is_not_flat() {
        let table = PolicyTable::back_office();
        let entry = table.entry(&Action::NOTIFICATIONS).unwrap();

        assert!(entry.as_flat().is_none());

        let email = entry.sub_entry("email").unwrap();
        let roles = email.as_flat().unwrap();
        assert!(roles.contains(Role::SuperAdmin));
        assert!(!roles.contains(Role::Admin));
    }

    #[test]
    fn test_sub_entry_on_flat_is_none() {
        let table = PolicyTable::back_office();
        let entry = table.entry(&Action::DELETE).unwrap();
        assert!(entry.sub_entry("anything").is_none());
    }

    #[test]
    fn test_back_office_defaults() {
        let table = PolicyTable::back_office();

        // Domain pages visible to all roles
        for page in [
            Action::CUSTOMERS_PAGE,
            Action::PROPERTIES_PAGE,
            Action::CONTRACTS_PAGE,
            Action::PAYMENTS_PAGE,
            Action::RECEIPTS_PAGE,
        ] {
            let roles = table.entry(&page).unwrap().as_flat().unwrap();
            for role in Role::ALL {
                assert!(roles.contains(role), "{page} should allow {role}");
            }
        }

        // Users page is SuperAdmin-only
        let users = table.entry(&Action::USERS_PAGE).unwrap().as_flat().unwrap();
        assert_eq!(users.len(), 1);
        assert!(users.contains(Role::SuperAdmin));
    }

    #[test]
    fn test_serde_untagged_entry() {
        let flat: PolicyEntry = serde_json::from_str("[\"ADMIN\",\"SUPER_ADMIN\"]").unwrap();
        assert!(flat.as_flat().is_some());

        let structured: PolicyEntry =
            serde_json::from_str("{\"email\":[\"SUPER_ADMIN\"]}").unwrap();
        assert!(structured.as_flat().is_none());
        assert!(structured.sub_entry("email").is_some());
    }

    #[test]
    fn test_table_round_trips_through_json() {
        let table = PolicyTable::back_office();
        let json = serde_json::to_string(&table).unwrap();
        let parsed: PolicyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, table);
    }
}
