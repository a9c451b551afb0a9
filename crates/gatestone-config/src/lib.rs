//! Policy configuration for Gatestone
//!
//! The policy table is deployment configuration: authored as TOML, loaded
//! once at startup, never user-editable at runtime. Loading is hierarchical,
//! highest precedence first:
//! 1. Environment variables (GST_* prefix)
//! 2. gatestone.local.toml (gitignored, local overrides)
//! 3. gatestone.toml (git-tracked, project config)
//! 4. Built-in defaults (the back-office table)
//!
//! Role spellings are validated here, at load time, so the runtime evaluator
//! never sees a malformed entry: an unknown spelling is a startup error, not
//! a silent deny of a misspelled role.

use std::collections::BTreeMap;

use gatestone_rbac::{Action, PolicyEntry, PolicyTable, Role, RoleSet};
use serde::{Deserialize, Serialize};

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::PolicyConfigLoader;

/// Serde model of the policy file.
///
/// Role names are plain strings at this layer; [`PolicyConfig::into_table`]
/// is the validation step that turns them into the typed table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub guard: GuardConfig,
    #[serde(default)]
    pub policy: BTreeMap<String, PolicyEntrySpec>,
}

/// Guard settings shared by every route guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Where denied navigation is redirected.
    pub fallback: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            fallback: "/dashboard".to_string(),
        }
    }
}

/// One action's entry in the policy file: a role list or nested sub-cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyEntrySpec {
    Flat(Vec<String>),
    Structured(BTreeMap<String, PolicyEntrySpec>),
}

impl Default for PolicyConfig {
    fn default() -> Self {
        spec_from_table(&PolicyTable::back_office())
    }
}

impl PolicyConfig {
    /// Parses a policy file without the layered loader.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Loads configuration from default locations.
    pub fn load() -> Result<Self, ConfigError> {
        PolicyConfigLoader::new().load()
    }

    /// Validates the config into the typed policy table.
    ///
    /// Every role spelling must be one of the closed set; the first unknown
    /// spelling aborts the load with [`ConfigError::UnknownRole`].
    pub fn into_table(self) -> Result<PolicyTable, ConfigError> {
        self.policy
            .into_iter()
            .map(|(action, spec)| {
                let entry = convert_entry(&action, spec)?;
                Ok((Action::from(action), entry))
            })
            .collect()
    }
}

fn convert_entry(action: &str, spec: PolicyEntrySpec) -> Result<PolicyEntry, ConfigError> {
    match spec {
        PolicyEntrySpec::Flat(roles) => {
            let mut set = RoleSet::empty();
            for spelling in roles {
                let role = Role::parse(&spelling).ok_or_else(|| ConfigError::UnknownRole {
                    action: action.to_string(),
                    role: spelling,
                })?;
                set.grant(role);
            }
            Ok(PolicyEntry::Flat(set))
        }
        PolicyEntrySpec::Structured(sub) => {
            let sub = sub
                .into_iter()
                .map(|(name, spec)| {
                    let path = format!("{action}.{name}");
                    Ok((name, convert_entry(&path, spec)?))
                })
                .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;
            Ok(PolicyEntry::Structured(sub))
        }
    }
}

fn spec_from_entry(entry: &PolicyEntry) -> PolicyEntrySpec {
    match entry {
        PolicyEntry::Flat(roles) => {
            PolicyEntrySpec::Flat(roles.iter().map(|r| r.as_str().to_string()).collect())
        }
        PolicyEntry::Structured(sub) => PolicyEntrySpec::Structured(
            sub.iter()
                .map(|(name, entry)| (name.clone(), spec_from_entry(entry)))
                .collect(),
        ),
    }
}

fn spec_from_table(table: &PolicyTable) -> PolicyConfig {
    PolicyConfig {
        guard: GuardConfig::default(),
        policy: table
            .iter()
            .map(|(action, entry)| (action.as_str().to_string(), spec_from_entry(entry)))
            .collect(),
    }
}
