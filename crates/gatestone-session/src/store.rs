//! Session store with an explicit lifecycle.
//!
//! The store is passed to whatever needs the current principal rather than
//! living as process-global state. Lifecycle: populated on login or session
//! hydration, cleared on logout. Hydration is asynchronous on the caller's
//! side; the store only sequences the results. When rapid navigation starts a
//! newer hydration before an older one lands, only the latest result is
//! applied — stale responses are discarded, never applied.

use gatestone_rbac::Role;
use tracing::{debug, info};

use crate::principal::Principal;

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    /// No principal; nobody is signed in.
    Anonymous,

    /// A principal fetch is in flight. Guards render nothing in this state.
    Hydrating,

    /// A principal is signed in (its role may still be `None`).
    Active(Principal),
}

/// Ticket handed out when hydration begins.
///
/// Captures the generation current at that moment; the result it carries is
/// applied only if no newer hydration, login or logout happened in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrationTicket {
    generation: u64,
}

/// Holds the current principal across the session lifecycle.
///
/// The store never caches access decisions: guards read the role through
/// [`SessionStore::role`] at evaluation time, so a role change pushed from
/// the server takes effect at the next evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore {
    state: SessionState,
    generation: u64,
}

impl SessionStore {
    /// Creates a store with nobody signed in.
    pub fn new() -> Self {
        Self {
            state: SessionState::Anonymous,
            generation: 0,
        }
    }

    /// Begins a principal fetch, invalidating any fetch already in flight.
    ///
    /// The returned ticket must be presented with the result to
    /// [`SessionStore::complete_hydration`].
    pub fn begin_hydration(&mut self) -> HydrationTicket {
        self.generation += 1;
        self.state = SessionState::Hydrating;
        debug!(generation = self.generation, "session hydration started");
        HydrationTicket {
            generation: self.generation,
        }
    }

    /// Applies a hydration result if it is still the latest.
    ///
    /// Returns `false` (and leaves the store untouched) when the ticket was
    /// superseded by a newer hydration, a login or a logout.
    pub fn complete_hydration(&mut self, ticket: HydrationTicket, principal: Principal) -> bool {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale hydration result"
            );
            return false;
        }

        info!(principal = %principal.id, role = ?principal.role, "session hydrated");
        self.state = SessionState::Active(principal);
        true
    }

    /// Signs a principal in directly (fresh login).
    pub fn login(&mut self, principal: Principal) {
        self.generation += 1;
        info!(principal = %principal.id, role = ?principal.role, "session login");
        self.state = SessionState::Active(principal);
    }

    /// Clears the session.
    pub fn logout(&mut self) {
        self.generation += 1;
        info!("session logout");
        self.state = SessionState::Anonymous;
    }

    /// Returns the signed-in principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        match &self.state {
            SessionState::Active(principal) => Some(principal),
            SessionState::Anonymous | SessionState::Hydrating => None,
        }
    }

    /// Returns the current role.
    ///
    /// `None` while anonymous or hydrating, and for a signed-in principal
    /// whose role never resolved — all three fail closed at the evaluator.
    pub fn role(&self) -> Option<Role> {
        self.principal().and_then(|p| p.role)
    }

    /// Returns whether a principal fetch is in flight.
    pub fn is_hydrating(&self) -> bool {
        self.state == SessionState::Hydrating
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use gatestone_rbac::Role;

    use super::*;
    use crate::principal::PrincipalId;

    fn principal(id: u64, role: Role) -> Principal {
        Principal::new(PrincipalId::new(id), format!("user-{id}"), role)
    }

    #[test]
    fn test_fresh_store_is_anonymous() {
        let store = SessionStore::new();
        assert!(store.principal().is_none());
        assert_eq!(store.role(), None);
        assert!(!store.is_hydrating());
    }

    #[test]
    fn test_hydration_happy_path() {
        let mut store = SessionStore::new();

        let ticket = store.begin_hydration();
        assert!(store.is_hydrating());
        assert_eq!(store.role(), None);

        assert!(store.complete_hydration(ticket, principal(1, Role::Staff)));
        assert!(!store.is_hydrating());
        assert_eq!(store.role(), Some(Role::Staff));
    }

    #[test]
    fn test_stale_hydration_is_discarded() {
        let mut store = SessionStore::new();

        let first = store.begin_hydration();
        let second = store.begin_hydration();

        // The older response lands late and must not be applied.
        assert!(!store.complete_hydration(first, principal(1, Role::SuperAdmin)));
        assert!(store.is_hydrating());
        assert_eq!(store.role(), None);

        // The newest one wins.
        assert!(store.complete_hydration(second, principal(2, Role::Staff)));
        assert_eq!(store.role(), Some(Role::Staff));
    }

    #[test]
    fn test_login_invalidates_inflight_hydration() {
        let mut store = SessionStore::new();

        let ticket = store.begin_hydration();
        store.login(principal(7, Role::Admin));

        assert!(!store.complete_hydration(ticket, principal(1, Role::SuperAdmin)));
        assert_eq!(store.role(), Some(Role::Admin));
    }

    #[test]
    fn test_logout_clears_and_invalidates() {
        let mut store = SessionStore::new();
        store.login(principal(7, Role::Admin));

        let ticket = store.begin_hydration();
        store.logout();

        assert!(!store.complete_hydration(ticket, principal(7, Role::Admin)));
        assert!(store.principal().is_none());
        assert_eq!(store.role(), None);
    }

    #[test]
    fn test_role_is_none_for_unresolved_principal() {
        let mut store = SessionStore::new();
        let ticket = store.begin_hydration();

        let unresolved = Principal {
            id: PrincipalId::new(3),
            name: "pending".to_string(),
            role: None,
        };
        assert!(store.complete_hydration(ticket, unresolved));

        // Signed in, but with no permissions anywhere.
        assert!(store.principal().is_some());
        assert_eq!(store.role(), None);
    }

    #[test]
    fn test_role_change_takes_effect_immediately() {
        let mut store = SessionStore::new();
        store.login(principal(7, Role::Admin));
        assert_eq!(store.role(), Some(Role::Admin));

        // Role change pushed from the server arrives as a fresh login.
        store.login(principal(7, Role::Staff));
        assert_eq!(store.role(), Some(Role::Staff));
    }
}
