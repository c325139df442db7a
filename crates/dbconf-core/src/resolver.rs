//! Configuration resolution
//!
//! [`ConfigResolver`] reads the `DB_*` variables from an [`EnvSource`] and
//! builds the base record plus the three environment records. It is meant
//! to run once at startup; the resulting records are passed to the
//! connection layer explicitly.

use std::path::Path;
use std::sync::Arc;

use crate::env::{DotenvEnv, EnvSource, ProcessEnv};
use crate::error::Result;
use crate::record::{ConfigRecord, EnvironmentConfigs, Port, DIALECT, TIMEZONE};
use crate::secret::{self, Secret};

pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_NAME: &str = "DB_NAME";
pub const DB_NAME_FILE: &str = "DB_NAME_FILE";
pub const DB_USER: &str = "DB_USER";
pub const DB_USER_FILE: &str = "DB_USER_FILE";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_PASSWORD_FILE: &str = "DB_PASSWORD_FILE";

/// Resolves database configuration from an environment source
#[derive(Clone)]
pub struct ConfigResolver {
    env: Arc<dyn EnvSource>,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("env", &self.env.name())
            .finish()
    }
}

impl ConfigResolver {
    /// Create a resolver over the given environment source
    pub fn new(env: impl EnvSource + 'static) -> Self {
        Self { env: Arc::new(env) }
    }

    /// Create a resolver over a shared environment source
    pub fn with_source(env: Arc<dyn EnvSource>) -> Self {
        Self { env }
    }

    /// Create a resolver over the process environment
    pub fn from_process_env() -> Self {
        Self::new(ProcessEnv)
    }

    /// Create a resolver over the process environment layered on a dotenv file
    ///
    /// A missing dotenv file is not an error.
    pub fn from_dotenv(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(DotenvEnv::from_path(path)?))
    }

    /// Resolve a secret, preferring the file named by `file_var`
    pub fn resolve_secret(&self, direct_var: &str, file_var: &str) -> Secret {
        secret::resolve_secret(self.env.as_ref(), direct_var, file_var)
    }

    /// Resolve `DB_PORT`, defaulting to 5432 when unset or empty
    pub fn resolve_port(&self) -> Port {
        match self.env.var(DB_PORT) {
            Some(raw) if !raw.trim().is_empty() => {
                let port = Port::parse(&raw);
                if let Port::Invalid(_) = port {
                    log::warn!("{} is not a number: {:?}", DB_PORT, raw);
                }
                port
            }
            _ => Port::default(),
        }
    }

    /// Build the shared base record
    ///
    /// Never fails: unavailable secrets, a missing host and a port that
    /// is not a number are kept in the record and reported by
    /// [`ConfigRecord::connection_params`].
    pub fn build_base_config(&self) -> ConfigRecord {
        let username = self.resolve_secret(DB_USER, DB_USER_FILE);
        let password = self.resolve_secret(DB_PASSWORD, DB_PASSWORD_FILE);
        let database = self.resolve_secret(DB_NAME, DB_NAME_FILE);
        let host = self.env.var(DB_HOST);
        let port = self.resolve_port();

        log::debug!(
            "Resolved base config from {} environment: host={:?} port={} database={:?}",
            self.env.name(),
            host,
            port,
            database.as_str()
        );

        ConfigRecord {
            dialect: DIALECT.to_string(),
            timezone: TIMEZONE.to_string(),
            username,
            password,
            database,
            host,
            port,
            soft_delete_enabled: true,
            logging_enabled: true,
        }
    }

    /// Build the development, test and production records
    pub fn build_environment_configs(&self) -> EnvironmentConfigs {
        EnvironmentConfigs::from_base(&self.build_base_config())
    }
}

/// Resolve all environment records from the process environment
pub fn load() -> EnvironmentConfigs {
    ConfigResolver::from_process_env().build_environment_configs()
}
