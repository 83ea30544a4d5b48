//! gofinances: register income and expense transactions and summarize them.
//!
//! Transactions are stored per user in a key-value `Storage`. The `summary` module turns them
//! into the dashboard highlights and the monthly category breakdown, and `Presentation` formats
//! the results for a locale.

pub mod args;
pub mod auth;
pub mod commands;
mod config;
mod error;
pub mod model;
mod presentation;
pub mod storage;
pub mod summary;
mod utils;


pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Res, Result};
pub use presentation::{Locale, Presentation};
