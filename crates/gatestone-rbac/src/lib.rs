//! # gatestone-rbac: Role-Based Access Control
//!
//! Allow/deny decisions for the Gatestone back office:
//! - **Role-based access control** (3 roles: Staff, Admin, SuperAdmin)
//! - **Static policy table** (action name -> permitted roles, loaded once at
//!   startup and read-only for the process lifetime)
//! - **Fail-closed evaluation** (unknown action, unresolved role and
//!   structured-entry misuse are all denies, never faults)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Guard / UI affordance                       │
//! └─────────────────┬───────────────────────────┘
//!                   │ action + Option<Role>
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  PolicyEvaluator                             │
//! │  ├─ Flat entry: role-set membership          │
//! │  ├─ Structured entry: sub-action lookup      │
//! │  └─ Anything else: deny                      │
//! └─────────────────┬───────────────────────────┘
//!                   │ bool
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Render / redirect decision                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Roles
//!
//! | Role       | Pages | Delete | Export | Users page | Notification email |
//! |------------|-------|--------|--------|------------|--------------------|
//! | Staff      | ✓     | ✗      | ✗      | ✗          | ✗                  |
//! | Admin      | ✓     | ✓      | ✓      | ✗          | ✗                  |
//! | SuperAdmin | ✓     | ✓      | ✓      | ✓          | ✓                  |
//!
//! ## Examples
//!
//! ```
//! use gatestone_rbac::{Action, PolicyEvaluator, PolicyTable, Role};
//!
//! let table = PolicyTable::back_office();
//! let policy = PolicyEvaluator::new(&table);
//!
//! // Staff cannot delete; Admin can.
//! assert!(!policy.can_delete(Some(Role::Staff)));
//! assert!(policy.can_delete(Some(Role::Admin)));
//!
//! // An unresolved principal is denied everything.
//! assert!(!policy.is_allowed(&Action::USERS_PAGE, None));
//!
//! // Unknown actions are a deny, not a fault.
//! assert!(!policy.is_allowed(&Action::new("never-configured"), Some(Role::SuperAdmin)));
//! ```

pub mod action;
pub mod evaluator;
pub mod policy;
pub mod roles;

// Re-export commonly used types
pub use action::{Action, RoleSet};
pub use evaluator::{
    PolicyEvaluator, RoleSetResolution, is_admin, is_staff_only, is_super_admin,
};
pub use policy::{PolicyEntry, PolicyTable};
pub use roles::{ParseRoleError, Role};
