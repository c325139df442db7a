//! Environment sources
//!
//! Every variable the resolver reads goes through an [`EnvSource`], so the
//! process environment is read in one place and tests can supply their own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A source of environment variables
pub trait EnvSource: Send + Sync {
    /// Look up a variable. Returns `None` when it is not set.
    fn var(&self, name: &str) -> Option<String>;

    /// Short description of this source, used in log messages
    fn name(&self) -> &str;
}

/// The process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        // Non-Unicode values are treated as unset
        std::env::var(name).ok()
    }

    fn name(&self) -> &str {
        "process"
    }
}

/// An in-memory set of variables
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Number of variables held
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variables are held
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn name(&self) -> &str {
        "map"
    }
}

/// The process environment layered over a dotenv file
///
/// Variables already present in the process environment win over the
/// file, and the process environment itself is never modified.
#[derive(Debug, Clone)]
pub struct DotenvEnv {
    path: PathBuf,
    file_vars: HashMap<String, String>,
}

impl DotenvEnv {
    /// Load variables from a dotenv file
    ///
    /// A missing file yields an empty layer. A malformed file is an error.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("No dotenv file at {}, using process environment only", path.display());
            return Ok(Self {
                path: path.to_path_buf(),
                file_vars: HashMap::new(),
            });
        }

        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            Error::io(format!("Failed to open {}: {}", path.display(), e))
        })?;

        let mut file_vars = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                Error::parse(format!("{}: {}", path.display(), e))
                    .with_help("Use KEY=value lines; quote values containing spaces")
            })?;
            file_vars.insert(key, value);
        }

        log::debug!(
            "Loaded {} variable(s) from {}",
            file_vars.len(),
            path.display()
        );

        Ok(Self {
            path: path.to_path_buf(),
            file_vars,
        })
    }

    /// Path of the dotenv file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EnvSource for DotenvEnv {
    fn var(&self, name: &str) -> Option<String> {
        ProcessEnv
            .var(name)
            .or_else(|| self.file_vars.get(name).cloned())
    }

    fn name(&self) -> &str {
        "dotenv"
    }
}
