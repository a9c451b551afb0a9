//! Configuration loader with multi-source merging

use std::env;
use std::path::{Path, PathBuf};

use crate::{ConfigError, PolicyConfig};

/// Name of the git-tracked project config file.
const PROJECT_CONFIG: &str = "gatestone.toml";

/// Name of the gitignored local-override config file.
const LOCAL_CONFIG: &str = "gatestone.local.toml";

/// Configuration loader with builder pattern
pub struct PolicyConfigLoader {
    project_dir: PathBuf,
    env_prefix: String,
}

impl PolicyConfigLoader {
    /// Create a new config loader with default project directory (current dir)
    pub fn new() -> Self {
        Self {
            project_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            env_prefix: "GST".to_string(),
        }
    }

    /// Set the project directory
    pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.project_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Set the environment variable prefix (default: "GST")
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources with proper precedence
    pub fn load(self) -> Result<PolicyConfig, ConfigError> {
        let mut builder = config::Config::builder();

        // 1. Start with built-in defaults (the back-office table)
        let defaults = PolicyConfig::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Project config (gatestone.toml)
        let project_config_file = self.project_dir.join(PROJECT_CONFIG);
        if project_config_file.exists() {
            builder = builder.add_source(
                config::File::from(project_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 3. Local config (gatestone.local.toml, gitignored)
        let local_config_file = self.project_dir.join(LOCAL_CONFIG);
        if local_config_file.exists() {
            builder = builder.add_source(
                config::File::from(local_config_file)
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // 4. Environment variables (GST_*)
        builder = builder.add_source(
            config::Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        // Build and deserialize
        let config = builder.build()?;
        let policy_config: PolicyConfig = config.try_deserialize()?;

        if policy_config.guard.fallback.is_empty() {
            return Err(ConfigError::ValidationError(
                "guard.fallback must not be empty".to_string(),
            ));
        }

        Ok(policy_config)
    }

    /// Load configuration or return defaults if loading fails
    pub fn load_or_default(self) -> PolicyConfig {
        self.load().unwrap_or_default()
    }
}

impl Default for PolicyConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
