//! Error types for the library and the CLI.
//!
//! Internally, functions return `Res<T>` (an `anyhow::Result`) and attach `.context(..)` at every
//! I/O boundary. Functions that are called by the CLI convert to the public `Result<T>` with
//! `pub_result`, which tags the error with an `ErrorType` so that callers can decide what to show
//! the user without parsing messages.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

/// Internal result type.
pub type Res<T> = anyhow::Result<T>;

/// Public result type.
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a public error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or `config.json` is missing or invalid.
    Config,
    /// Reading from or writing to the key-value storage failed, or the stored data is corrupt.
    Storage,
    /// There is no signed in user, or the identity provider did not produce one.
    Auth,
    /// User input was rejected before anything was persisted.
    Validation,
    /// Anything else.
    Internal,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// A public error: an `anyhow::Error` chain tagged with an `ErrorType`.
pub struct Error {
    error_type: ErrorType,
    inner: anyhow::Error,
}

impl Error {
    pub fn new(error_type: ErrorType, inner: impl Into<anyhow::Error>) -> Self {
        Self {
            error_type,
            inner: inner.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }

    /// The message that should be shown to a user.
    ///
    /// Storage, auth and internal failures are reported generically; the full chain is only meant
    /// for the logs. A cancelled sign-in and a failed one read the same.
    pub fn user_message(&self) -> String {
        match self.error_type {
            ErrorType::Storage => "Unable to read or save your data, please try again".to_string(),
            ErrorType::Internal => "An unexpected error occurred".to_string(),
            ErrorType::Auth => "Not signed in".to_string(),
            ErrorType::Config | ErrorType::Validation => format!("{:#}", self.inner),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:#}", self.error_type, self.inner)
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:?}", self.error_type, self.inner)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

/// Converts any result whose error can become an `anyhow::Error` into a public `Result`.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| Error::new(error_type, e))
    }
}
