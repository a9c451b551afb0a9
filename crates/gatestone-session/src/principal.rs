//! The signed-in principal.
//!
//! Identity payloads arrive from the identity service as loosely-shaped JSON;
//! the nested `role.role` string is the only field the access-control core
//! reads. [`Principal::from_identity`] is the single parse step at that
//! boundary: any shape mismatch on the role resolves to *no role* (fail
//! closed), so downstream code only ever sees the typed [`Role`] sum type.

use std::fmt::{self, Display};

use gatestone_rbac::Role;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Unique identifier for a principal (user account).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PrincipalId(u64);

impl PrincipalId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PrincipalId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<PrincipalId> for u64 {
    fn from(id: PrincipalId) -> Self {
        id.0
    }
}

/// Error type for identity payloads that cannot identify a principal at all.
///
/// A malformed *role* is not an error (it degrades to no role); a payload
/// without a usable id cannot name anyone and is rejected outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The identity payload carries no numeric `id`.
    #[error("identity payload has no usable id: {reason}")]
    MalformedIdentity { reason: String },
}

/// The authenticated user whose role is being checked.
///
/// Carries exactly one role at a time, or none: a principal whose role never
/// resolved has no permissions anywhere in the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Account identifier.
    pub id: PrincipalId,

    /// Display name, if the identity service supplied one.
    pub name: String,

    /// Resolved role. `None` fails closed to "no permissions".
    pub role: Option<Role>,
}

impl Principal {
    /// Creates a principal with a resolved role.
    pub fn new(id: PrincipalId, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            role: Some(role),
        }
    }

    /// Parses a loosely-shaped identity payload.
    ///
    /// The role is read from `payload.role.role` and must be one of the wire
    /// spellings; a missing field, a non-object `role`, a non-string inner
    /// `role` or an unknown spelling all resolve to `role: None`. The id must
    /// be a numeric `id` field.
    ///
    /// # Examples
    ///
    /// ```
    /// use gatestone_rbac::Role;
    /// use gatestone_session::Principal;
    /// use serde_json::json;
    ///
    /// let p = Principal::from_identity(&json!({
    ///     "id": 7,
    ///     "name": "Ada",
    ///     "role": { "role": "ADMIN" },
    /// }))
    /// .unwrap();
    /// assert_eq!(p.role, Some(Role::Admin));
    ///
    /// // Shape mismatch on the role degrades to no role, not an error.
    /// let p = Principal::from_identity(&json!({ "id": 7, "role": "ADMIN" })).unwrap();
    /// assert_eq!(p.role, None);
    /// ```
    pub fn from_identity(payload: &Value) -> Result<Self, SessionError> {
        let id = payload
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| SessionError::MalformedIdentity {
                reason: "missing or non-numeric `id`".to_string(),
            })?;

        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let role = payload
            .get("role")
            .and_then(|role| role.get("role"))
            .and_then(Value::as_str)
            .and_then(Role::parse);

        if role.is_none() {
            debug!(principal = id, "identity payload resolved to no role");
        }

        Ok(Self {
            id: PrincipalId::new(id),
            name,
            role,
        })
    }
}
