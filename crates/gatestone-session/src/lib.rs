//! # gatestone-session: Session lifecycle and principal resolution
//!
//! Two concerns live here:
//!
//! - [`Principal`]: the typed signed-in user, produced by a single parse step
//!   over the identity service's loosely-shaped JSON payload. Any shape
//!   mismatch on the role fails closed to "no role".
//! - [`SessionStore`]: an explicit session object with a defined lifecycle
//!   (populated on login/hydration, cleared on logout) that is passed to
//!   guards instead of living as ambient global state. Concurrent hydrations
//!   resolve latest-wins; stale results are discarded.
//!
//! ```
//! use gatestone_rbac::Role;
//! use gatestone_session::{Principal, SessionStore};
//! use serde_json::json;
//!
//! let mut session = SessionStore::new();
//! let ticket = session.begin_hydration();
//!
//! let principal = Principal::from_identity(&json!({
//!     "id": 1,
//!     "name": "Ada",
//!     "role": { "role": "STAFF" },
//! }))?;
//!
//! assert!(session.complete_hydration(ticket, principal));
//! assert_eq!(session.role(), Some(Role::Staff));
//! # Ok::<(), gatestone_session::SessionError>(())
//! ```

pub mod principal;
pub mod store;

// Re-export commonly used types
pub use principal::{Principal, PrincipalId, SessionError};
pub use store::{HydrationTicket, SessionStore};
