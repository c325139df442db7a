//! Error types for dbconf
//!
//! Errors are structured: a kind, the configuration field involved,
//! the underlying cause and an actionable help message.

use std::fmt;

/// Result type alias for dbconf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for dbconf operations
#[derive(Debug, Clone)]
pub struct Error {
    /// The kind of error that occurred
    pub kind: ErrorKind,
    /// Configuration field the error relates to (e.g., "password")
    pub field: Option<String>,
    /// Actionable help message
    pub help: Option<String>,
    /// Underlying cause (as string for Clone compatibility)
    pub cause: Option<String>,
}

/// Categories of errors that can occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A secret file named by a `*_FILE` variable could not be read
    SecretFileUnreadable { var_name: String, path: String },
    /// One or more values required to connect are missing or unavailable
    MissingRequiredValue { fields: Vec<String> },
    /// Port is outside the valid TCP range
    InvalidPort { port: i64 },
    /// Type coercion failed
    TypeCoercion,
    /// Unrecognized environment name
    UnknownEnvironment { name: String },
    /// Error parsing a dotenv file
    Parse,
    /// I/O error
    Io,
}

impl Error {
    /// Create a secret file unreadable error
    pub fn secret_file_unreadable(
        var_name: impl Into<String>,
        path: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        let var = var_name.into();
        Self {
            kind: ErrorKind::SecretFileUnreadable {
                var_name: var.clone(),
                path: path.into(),
            },
            field: None,
            help: Some(format!(
                "Check that the file named by {} exists and is readable by this process",
                var
            )),
            cause: Some(cause.into()),
        }
    }

    /// Create a missing required value error listing every missing field
    pub fn missing_required(fields: Vec<String>, details: Vec<String>) -> Self {
        Self {
            kind: ErrorKind::MissingRequiredValue { fields },
            field: None,
            help: Some(
                "Set DB_HOST, DB_USER, DB_PASSWORD and DB_NAME (or their *_FILE variants)".into(),
            ),
            cause: if details.is_empty() {
                None
            } else {
                Some(details.join("\n  "))
            },
        }
    }

    /// Create an invalid port error
    pub fn invalid_port(port: i64) -> Self {
        Self {
            kind: ErrorKind::InvalidPort { port },
            field: Some("port".into()),
            help: Some("Set DB_PORT to a value between 1 and 65535".into()),
            cause: None,
        }
    }

    /// Create a type coercion error
    pub fn type_coercion(
        field: impl Into<String>,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self {
            kind: ErrorKind::TypeCoercion,
            field: Some(field.into()),
            help: Some(format!(
                "Ensure the value can be converted to {}",
                expected.into()
            )),
            cause: Some(format!("Got: {}", got.into())),
        }
    }

    /// Create an unknown environment error
    pub fn unknown_environment(name: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UnknownEnvironment { name: name.into() },
            field: None,
            help: Some("Use one of: development, test, production".into()),
            cause: None,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Parse,
            field: None,
            help: None,
            cause: Some(message.into()),
        }
    }

    /// Create an I/O error
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Io,
            field: None,
            help: None,
            cause: Some(message.into()),
        }
    }

    /// Add field context to the error
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add help message to the error
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::SecretFileUnreadable { var_name, path } => {
                write!(f, "Secret file unreadable: {} ({})", path, var_name)?
            }
            ErrorKind::MissingRequiredValue { fields } => {
                write!(f, "Missing required value(s): {}", fields.join(", "))?
            }
            ErrorKind::InvalidPort { port } => write!(f, "Invalid port: {}", port)?,
            ErrorKind::TypeCoercion => write!(f, "Type coercion failed")?,
            ErrorKind::UnknownEnvironment { name } => write!(f, "Unknown environment: {}", name)?,
            ErrorKind::Parse => write!(f, "Parse error")?,
            ErrorKind::Io => write!(f, "I/O error")?,
        }

        if let Some(field) = &self.field {
            write!(f, "\n  Field: {}", field)?;
        }

        if let Some(cause) = &self.cause {
            write!(f, "\n  {}", cause)?;
        }

        if let Some(help) = &self.help {
            write!(f, "\n  Help: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}
