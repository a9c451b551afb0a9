//! # gatestone-guard: Route guarding
//!
//! Gates a page or affordance behind the policy evaluator. A guard
//! evaluation is a three-state machine:
//!
//! ```text
//! Loading ──► Allowed
//!    │
//!    └──────► Denied { redirect }
//! ```
//!
//! `Loading` is the only non-terminal state: it holds exactly while the
//! session store is still hydrating the principal, and the guard renders
//! nothing in it (no redirect, no content — the surrounding layout owns any
//! loading indicator). Once the store resolves, the outcome is `Allowed` or
//! `Denied` with the configured fallback location; there is no transition
//! back into `Loading` for that evaluation, though a fresh evaluation
//! against a store that is hydrating again starts over in `Loading`.
//!
//! Denial is always a redirect or an absent affordance, never an error: an
//! anonymous session, a principal whose role never resolved, and a role
//! outside the allowed set all land in `Denied`.
//!
//! ```
//! use gatestone_guard::{GuardOutcome, RouteGuard};
//! use gatestone_rbac::{Action, PolicyTable, Role};
//! use gatestone_session::{Principal, PrincipalId, SessionStore};
//!
//! let table = PolicyTable::back_office();
//! let guard = RouteGuard::new(Action::USERS_PAGE, "/dashboard");
//!
//! let mut session = SessionStore::new();
//! let ticket = session.begin_hydration();
//! assert_eq!(guard.evaluate(&session, &table), GuardOutcome::Loading);
//!
//! session.complete_hydration(ticket, Principal::new(PrincipalId::new(1), "Ada", Role::Admin));
//! assert_eq!(
//!     guard.evaluate(&session, &table),
//!     GuardOutcome::Denied { redirect: "/dashboard".to_string() },
//! );
//! ```

use gatestone_rbac::{Action, PolicyEvaluator, PolicyTable, RoleSet};
use gatestone_session::SessionStore;
use tracing::{info, warn};

/// Result of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The principal is still being resolved; render nothing.
    Loading,

    /// Render the guarded content.
    Allowed,

    /// Redirect to the fallback location.
    Denied {
        /// Where to send the caller instead.
        redirect: String,
    },
}

impl GuardOutcome {
    /// Returns whether the guarded content should render.
    pub fn is_allowed(&self) -> bool {
        *self == GuardOutcome::Allowed
    }
}

/// Gates one action (page or affordance) behind the policy table.
///
/// Pages whose allowed set is configured inline rather than through the
/// table carry an explicit role-set override via [`RouteGuard::with_roles`];
/// the override takes precedence over the table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    action: Action,
    allowed_roles: Option<RoleSet>,
    fallback: String,
}

impl RouteGuard {
    /// Creates a guard for an action with a fallback redirect location.
    pub fn new(action: impl Into<Action>, fallback: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            allowed_roles: None,
            fallback: fallback.into(),
        }
    }

    /// Overrides the table with an explicit allowed role set.
    pub fn with_roles(mut self, roles: impl Into<RoleSet>) -> Self {
        self.allowed_roles = Some(roles.into());
        self
    }

    /// Returns the guarded action.
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Evaluates the guard against the current session.
    ///
    /// Reads the role through the store at evaluation time — decisions are
    /// never cached across a role change.
    pub fn evaluate(&self, session: &SessionStore, table: &PolicyTable) -> GuardOutcome {
        if session.is_hydrating() {
            return GuardOutcome::Loading;
        }

        let role = session.role();
        let policy = PolicyEvaluator::new(table);
        let allowed = match &self.allowed_roles {
            Some(roles) => policy.is_allowed_with(&self.action, role, roles),
            None => policy.is_allowed(&self.action, role),
        };

        if allowed {
            info!(action = %self.action, ?role, "guard allowed");
            GuardOutcome::Allowed
        } else {
            warn!(action = %self.action, ?role, redirect = %self.fallback, "guard denied");
            GuardOutcome::Denied {
                redirect: self.fallback.clone(),
            }
        }
    }
}
