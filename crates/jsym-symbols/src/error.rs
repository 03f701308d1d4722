//! Error types for symbol construction and factory configuration.
//!
//! # Error Categories
//!
//! ## Argument errors ([`SymbolError`])
//! - `MissingArgument` - a required value was absent (`None`)
//! - `InvalidArgument` - a value was present but unusable
//!
//! Both are programmer errors detected before any symbol exists. A type that
//! cannot be found is *not* an error: adapters hand out an unresolved symbol
//! instead.
//!
//! ## Configuration errors ([`ConfigError`])
//! - `Io`, `Parse`, `Invalid`

use std::fmt;
use thiserror::Error;

/// Argument validation failure raised by a symbol construction operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolError {
    /// A required argument was `None`
    #[error("missing argument `{argument}` to {operation}")]
    MissingArgument {
        operation: &'static str,
        argument: &'static str,
    },

    /// An argument was present but violates the operation's contract
    #[error("invalid argument to {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },
}

/// Coarse classification of [`SymbolError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingArgument,
    InvalidArgument,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingArgument => f.write_str("missing argument"),
            ErrorKind::InvalidArgument => f.write_str("invalid argument"),
        }
    }
}

impl SymbolError {
    pub(crate) fn missing(operation: &'static str, argument: &'static str) -> Self {
        SymbolError::MissingArgument {
            operation,
            argument,
        }
    }

    pub(crate) fn invalid(operation: &'static str, reason: impl Into<String>) -> Self {
        SymbolError::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SymbolError::MissingArgument { .. } => ErrorKind::MissingArgument,
            SymbolError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Name of the operation that rejected its input
    pub fn operation(&self) -> &'static str {
        match self {
            SymbolError::MissingArgument { operation, .. }
            | SymbolError::InvalidArgument { operation, .. } => operation,
        }
    }
}

/// Failure to load or validate a [`FactoryConfig`](crate::FactoryConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the schema
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but holds unusable values
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for symbol construction
pub type SymbolResult<T> = std::result::Result<T, SymbolError>;

/// Result type alias for configuration loading
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
