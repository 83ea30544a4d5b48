use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::presentation::Locale;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and an initial `config.json`, then creates the SQLite storage so
/// that the first real command does not have to.
///
/// # Arguments
/// - `gofin_home` - The directory that will be the root of the home directory, e.g.
///   `$HOME/gofinances`
/// - `namespace` - The storage key prefix. Defaults to `@gofinances`.
/// - `locale` - The display locale.
///
/// # Errors
/// - The home directory already has a config file.
/// - Any file operation fails.
pub async fn init(gofin_home: &Path, namespace: Option<&str>, locale: Locale) -> Result<Out<()>> {
    let config = Config::create(gofin_home, namespace, locale)
        .await
        .context("Unable to create the home directory and config")
        .pub_result(ErrorType::Config)?;
    let _ = config.store().await.pub_result(ErrorType::Storage)?;
    Ok(format!(
        "Successfully created the gofinances directory at {}",
        config.root().display()
    )
    .into())
}
