//! dbconf-core: Database connection settings from environment and secret files
//!
//! This crate resolves `DB_*` environment variables, and their `*_FILE`
//! secret-file companions, into one configuration record per runtime
//! environment (development, test, production).
//!
//! # Example
//!
//! ```rust
//! use dbconf_core::{ConfigResolver, Environment, MapEnv, Port};
//!
//! let env = MapEnv::new()
//!     .with_var("DB_HOST", "localhost")
//!     .with_var("DB_USER", "app")
//!     .with_var("DB_PASSWORD", "secret")
//!     .with_var("DB_NAME", "app_dev");
//!
//! let configs = ConfigResolver::new(env).build_environment_configs();
//! let dev = configs.get(Environment::Development);
//! assert_eq!(dev.port, Port::Number(5432));
//! assert!(dev.logging_enabled);
//!
//! let params = dev.connection_params().unwrap();
//! assert_eq!(params.host, "localhost");
//! ```

pub mod env;
pub mod error;
pub mod record;
pub mod resolver;
pub mod secret;

pub use env::{DotenvEnv, EnvSource, MapEnv, ProcessEnv};
pub use error::{Error, ErrorKind, Result};
pub use record::{ConfigRecord, ConnectionParams, Environment, EnvironmentConfigs, Port};
pub use resolver::{load, ConfigResolver};
pub use secret::{Secret, UnavailableReason};
