//! The access policy evaluator.
//!
//! Decides whether a principal's role may perform a named action. The
//! evaluator is a pure function of the (read-only) policy table and its
//! arguments: no interior mutability, no I/O, no suspension points, so it is
//! safe to call from any number of concurrent evaluation passes.
//!
//! Every path terminates in a boolean. Unknown actions, unresolved roles and
//! structured entries queried flat are all denies, never faults; the
//! evaluator is designed to never be the cause of an unhandled error in a
//! caller.

use tracing::debug;

use crate::action::{Action, RoleSet};
use crate::policy::{PolicyEntry, PolicyTable};
use crate::roles::Role;

/// Outcome of resolving the role set configured for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSetResolution<'a> {
    /// The action resolves to a flat role set.
    Roles(&'a RoleSet),

    /// The table entry is structured; callers must query a sub-action
    /// instead. Treated as deny by [`PolicyEvaluator::is_allowed`].
    NotDirectlyCheckable,

    /// The action has no entry in the table (configuration omission).
    Unknown,
}

/// Pure allow/deny decisions over a policy table.
///
/// Borrows the table; construction is free and the evaluator carries no
/// state of its own, so callers re-create one per decision rather than
/// caching it across role changes.
#[derive(Debug, Clone, Copy)]
pub struct PolicyEvaluator<'a> {
    table: &'a PolicyTable,
}

impl<'a> PolicyEvaluator<'a> {
    /// Creates an evaluator over the given table.
    pub fn new(table: &'a PolicyTable) -> Self {
        Self { table }
    }

    /// Returns whether a principal holding `role` may perform `action`.
    ///
    /// Fails closed on every ambiguity:
    /// - no role (unauthenticated or unresolved principal) is a deny
    /// - an action missing from the table is a deny, not a fault
    /// - a structured entry queried flat is a deny
    ///
    /// # Examples
    ///
    /// ```
    /// use gatestone_rbac::{Action, PolicyEvaluator, PolicyTable, Role};
    ///
    /// let table = PolicyTable::back_office();
    /// let policy = PolicyEvaluator::new(&table);
    ///
    /// assert!(policy.is_allowed(&Action::DELETE, Some(Role::Admin)));
    /// assert!(!policy.is_allowed(&Action::DELETE, Some(Role::Staff)));
    /// assert!(!policy.is_allowed(&Action::DELETE, None));
    /// ```
    pub fn is_allowed(&self, action: &Action, role: Option<Role>) -> bool {
        let Some(role) = role else {
            return false;
        };

        match self.resolve_role_set(action, None) {
            RoleSetResolution::Roles(roles) => roles.contains(role),
            RoleSetResolution::NotDirectlyCheckable => {
                debug!(%action, "structured policy entry queried flat, denying");
                false
            }
            RoleSetResolution::Unknown => {
                debug!(%action, "action missing from policy table, denying");
                false
            }
        }
    }

    /// Returns whether `role` is a member of the override set, ignoring the
    /// table's configured entry for `action` entirely.
    pub fn is_allowed_with(
        &self,
        action: &Action,
        role: Option<Role>,
        override_roles: &RoleSet,
    ) -> bool {
        match self.resolve_role_set(action, Some(override_roles)) {
            RoleSetResolution::Roles(roles) => role.is_some_and(|r| roles.contains(r)),
            // Unreachable with an override supplied, but deny regardless.
            RoleSetResolution::NotDirectlyCheckable | RoleSetResolution::Unknown => false,
        }
    }

    /// Returns whether a principal holding `role` may perform the named
    /// sub-case of a structured action (e.g. `notifications` / `email`).
    ///
    /// Flat entries have no sub-cases; querying one is a deny.
    pub fn is_allowed_sub(&self, action: &Action, sub_action: &str, role: Option<Role>) -> bool {
        let Some(role) = role else {
            return false;
        };

        match self
            .table
            .entry(action)
            .and_then(|entry| entry.sub_entry(sub_action))
        {
            Some(PolicyEntry::Flat(roles)) => roles.contains(role),
            Some(PolicyEntry::Structured(_)) | None => {
                debug!(%action, sub_action, "sub-action not resolvable to a role set, denying");
                false
            }
        }
    }

    /// Resolves the role set configured for an action.
    ///
    /// An `override_roles` argument takes precedence over the table. A
    /// structured entry is reported as [`RoleSetResolution::NotDirectlyCheckable`]
    /// rather than guessed at; callers either use [`Self::is_allowed_sub`] or
    /// treat it as deny.
    pub fn resolve_role_set<'b>(
        &self,
        action: &Action,
        override_roles: Option<&'b RoleSet>,
    ) -> RoleSetResolution<'b>
    where
        'a: 'b,
    {
        if let Some(roles) = override_roles {
            return RoleSetResolution::Roles(roles);
        }

        match self.table.entry(action) {
            Some(PolicyEntry::Flat(roles)) => RoleSetResolution::Roles(roles),
            Some(PolicyEntry::Structured(_)) => RoleSetResolution::NotDirectlyCheckable,
            None => RoleSetResolution::Unknown,
        }
    }

    /// Returns whether the role may delete records.
    pub fn can_delete(&self, role: Option<Role>) -> bool {
        self.is_allowed(&Action::DELETE, role)
    }

    /// Returns whether the role may export data.
    pub fn can_export(&self, role: Option<Role>) -> bool {
        self.is_allowed(&Action::EXPORT, role)
    }

    /// Returns whether the role may decline product requests.
    pub fn can_decline_product_request(&self, role: Option<Role>) -> bool {
        self.is_allowed(&Action::DECLINE_PRODUCT_REQUEST, role)
    }
}

/// Returns whether the role is exactly Admin.
pub fn is_admin(role: Option<Role>) -> bool {
    role == Some(Role::Admin)
}

/// Returns whether the role is exactly SuperAdmin.
pub fn is_super_admin(role: Option<Role>) -> bool {
    role == Some(Role::SuperAdmin)
}

/// Returns whether the role is exactly Staff (no elevated privileges).
pub fn is_staff_only(role: Option<Role>) -> bool {
    role == Some(Role::Staff)
}
