//! Secret resolution
//!
//! A secret is read either directly from an environment variable or from
//! the first line of a file whose path is held by a companion `*_FILE`
//! variable. Resolution never fails: an unreadable file or an unset
//! variable yields [`Secret::Unavailable`], and the failure surfaces later
//! when the record is checked before connecting.

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::env::EnvSource;
use crate::error::Error;

/// Suffix of the variable naming a secret file
pub const FILE_SUFFIX: &str = "_FILE";

/// A resolved secret, or the reason it could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Secret {
    /// The value was found
    Resolved(String),
    /// No value could be obtained
    Unavailable(UnavailableReason),
}

/// Why a secret is unavailable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableReason {
    /// Neither the variable nor its `*_FILE` companion is set
    NotSet { var_name: String },
    /// The `*_FILE` variable is set but the file could not be read
    UnreadableFile {
        var_name: String,
        path: String,
        cause: String,
    },
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NotSet { var_name } => write!(
                f,
                "{} is not set (nor {}{})",
                var_name, var_name, FILE_SUFFIX
            ),
            UnavailableReason::UnreadableFile {
                var_name,
                path,
                cause,
            } => write!(f, "cannot read {} from {}: {}", path, var_name, cause),
        }
    }
}

impl Secret {
    /// Check if the secret was resolved
    pub fn is_resolved(&self) -> bool {
        matches!(self, Secret::Resolved(_))
    }

    /// Check if the secret is unavailable
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Secret::Unavailable(_))
    }

    /// Get the value if resolved
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Secret::Resolved(s) => Some(s),
            Secret::Unavailable(_) => None,
        }
    }

    /// Get the reason if unavailable
    pub fn unavailable_reason(&self) -> Option<&UnavailableReason> {
        match self {
            Secret::Resolved(_) => None,
            Secret::Unavailable(reason) => Some(reason),
        }
    }

    /// Convert into an `Option`, discarding the reason
    pub fn into_option(self) -> Option<String> {
        match self {
            Secret::Resolved(s) => Some(s),
            Secret::Unavailable(_) => None,
        }
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Secret::Resolved(s)
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Secret::Resolved(s.to_string())
    }
}

/// Unavailable secrets serialize as `null`
impl Serialize for Secret {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Secret::Resolved(s) => serializer.serialize_str(s),
            Secret::Unavailable(_) => serializer.serialize_none(),
        }
    }
}

/// Read the first line of a secret file, trimmed
pub fn read_secret_file(path: impl AsRef<Path>) -> std::io::Result<String> {
    let file = std::fs::File::open(path.as_ref())?;
    let mut first_line = String::new();
    std::io::BufReader::new(file).read_line(&mut first_line)?;
    Ok(first_line.trim().to_string())
}

/// Resolve a secret from `direct_var` or its file companion `file_var`
///
/// When `file_var` is set to a non-empty path, the file wins even if it
/// cannot be read; `direct_var` is then ignored.
pub fn resolve_secret(env: &dyn EnvSource, direct_var: &str, file_var: &str) -> Secret {
    match env.var(file_var).filter(|p| !p.is_empty()) {
        Some(path) => match read_secret_file(&path) {
            Ok(value) => {
                log::debug!("Resolved {} from secret file {}", direct_var, path);
                Secret::Resolved(value)
            }
            Err(e) => {
                let err = Error::secret_file_unreadable(file_var, path.as_str(), e.to_string())
                    .with_field(direct_var);
                log::warn!("{}", err);
                Secret::Unavailable(UnavailableReason::UnreadableFile {
                    var_name: file_var.to_string(),
                    path,
                    cause: e.to_string(),
                })
            }
        },
        None => match env.var(direct_var) {
            Some(value) => Secret::Resolved(value),
            None => {
                log::debug!("{} is not set in {} environment", direct_var, env.name());
                Secret::Unavailable(UnavailableReason::NotSet {
                    var_name: direct_var.to_string(),
                })
            }
        },
    }
}

/// Resolve a secret using the conventional `<VAR>_FILE` companion name
pub fn resolve_secret_var(env: &dyn EnvSource, var: &str) -> Secret {
    let file_var = format!("{}{}", var, FILE_SUFFIX);
    resolve_secret(env, var, &file_var)
}
