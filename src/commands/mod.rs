//! Command handlers for the gofin CLI.
//!
//! This module contains implementations for all CLI subcommands. Each handler takes a loaded
//! `Config`, does its work and returns an `Out` describing the result.

mod auth;
mod categories;
mod dashboard;
mod init;
mod list;
mod register;
mod resume;

use crate::auth::Session;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;

pub use auth::{sign_in, sign_out, whoami};
pub use categories::{categories, CategoryRow};
pub use dashboard::{dashboard, Dashboard};
pub use init::init;
pub use list::list;
pub use register::register;
pub use resume::{resume, Resume};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to stdout and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        println!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Opens the configured storage and restores the session from it.
async fn open_session(config: &Config) -> Result<Session> {
    let store = config.store().await.pub_result(ErrorType::Storage)?;
    Session::restore(store).await
}
