use sprig_intrinsics::seq::IndexOutOfRange;
use sprig_support::{argument_error, limit_error, registry_error, type_error};
use thiserror::Error;

pub type Result<T, E = IntrinsicError> = std::result::Result<T, E>;

/// Broad category of an [`IntrinsicError`], for hosts that map errors onto
/// their own exception types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Argument,
    Range,
    Type,
    LimitExceeded,
}

/// Errors raised by intrinsic code. The engine surfaces these to the script
/// as runtime errors carrying the display message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IntrinsicError {
    #[error("Runtime Error: {0}")]
    Argument(String),
    #[error("Index Error: {0}")]
    Range(#[from] IndexOutOfRange),
    #[error("Type Error: {0}")]
    Type(String),
    #[error("Runtime Error: {0}")]
    LimitExceeded(String),
}

impl IntrinsicError {
    pub fn argument(operation: &str, detail: impl std::fmt::Display) -> Self {
        Self::Argument(argument_error(operation, detail))
    }

    pub fn wrong_type(operation: &str, expected: &str) -> Self {
        Self::Type(type_error(operation, expected))
    }

    pub fn limit(operation: &str, detail: impl std::fmt::Display) -> Self {
        Self::LimitExceeded(limit_error(operation, detail))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Argument(_) => ErrorKind::Argument,
            Self::Range(_) => ErrorKind::Range,
            Self::Type(_) => ErrorKind::Type,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
        }
    }
}

const ALREADY_REGISTERED: &str = "an intrinsic with this name is already registered";

/// Registry misconfiguration, detected while intrinsics are being declared.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{}", registry_error("create", .0, ALREADY_REGISTERED))]
    DuplicateName(String),
    #[error("{}", registry_error("lookup", .0, "no intrinsic with this name"))]
    UnknownName(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid runtime configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
