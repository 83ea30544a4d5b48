//! Configuration file handling.
//!
//! The configuration file is stored at `$GOFIN_HOME/config.json`. It names the storage namespace,
//! the display locale and, optionally, where the SQLite file lives.

use crate::error::Res;
use crate::presentation::{Locale, Presentation};
use crate::storage::{SqliteStorage, Store, DEFAULT_NAMESPACE};
use crate::utils;
use anyhow::{bail, ensure, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const APP_NAME: &str = "gofinances";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const GOFINANCES_SQLITE: &str = "gofinances.sqlite";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$GOFIN_HOME` and from there it loads `$GOFIN_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the home directory, e.g.
    ///   `$HOME/gofinances`
    /// - `namespace` - The prefix of every storage key. Defaults to `@gofinances`.
    /// - `locale` - The display locale.
    ///
    /// # Errors
    /// - A `config.json` already exists in `dir`.
    /// - Any file operation fails.
    pub async fn create(
        dir: impl Into<PathBuf>,
        namespace: Option<&str>,
        locale: Locale,
    ) -> Res<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the gofinances home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            );
        }

        let namespace = namespace.map(str::trim).unwrap_or(DEFAULT_NAMESPACE);
        ensure!(!namespace.is_empty(), "The namespace cannot be empty");

        let config_file = ConfigFile {
            namespace: namespace.to_string(),
            locale,
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Validates that `gofin_home` and its config file exist and loads the config file.
    pub async fn load(gofin_home: impl Into<PathBuf>) -> Res<Self> {
        let maybe_relative = gofin_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The gofinances home directory is missing, run 'gofin init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'gofin init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn namespace(&self) -> &str {
        &self.config_file.namespace
    }

    pub fn locale(&self) -> Locale {
        self.config_file.locale
    }

    pub fn presentation(&self) -> Presentation {
        Presentation::new(self.locale())
    }

    /// Returns the stored `storage_path` if it is absolute, otherwise resolves it against the
    /// home directory.
    pub fn storage_path(&self) -> PathBuf {
        let p = self.config_file.storage_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// Opens the SQLite storage and wraps it in a `Store` for the configured namespace.
    pub async fn store(&self) -> Res<Store> {
        let storage = SqliteStorage::open(self.storage_path()).await?;
        Ok(Store::new(Arc::new(storage), self.namespace()))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "gofinances",
///   "config_version": 1,
///   "namespace": "@gofinances",
///   "locale": "pt-br",
///   "storage_path": "gofinances.sqlite"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "gofinances"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Prefix of every storage key
    #[serde(default = "default_namespace")]
    namespace: String,

    #[serde(default)]
    locale: Locale,

    /// Path to the SQLite file (optional, relative to the home directory or absolute)
    /// Defaults to $GOFIN_HOME/gofinances.sqlite if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    storage_path: Option<PathBuf>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            namespace: default_namespace(),
            locale: Locale::default(),
            storage_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from `path` and checks its `app_name`.
    pub async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(
            config.config_version <= CONFIG_VERSION,
            "The config file version {} is newer than this program supports ({CONFIG_VERSION})",
            config.config_version
        );

        Ok(config)
    }

    pub async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(GOFINANCES_SQLITE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create_and_load() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("gofin_home");

        let created = Config::create(&home_dir, Some("@budget"), Locale::EnUs)
            .await
            .unwrap();
        assert!(created.config_path().is_file());
        assert_eq!(created.namespace(), "@budget");

        let loaded = Config::load(&home_dir).await.unwrap();
        assert_eq!(loaded.root(), created.root());
        assert_eq!(loaded.namespace(), "@budget");
        assert_eq!(loaded.locale(), Locale::EnUs);
        assert_eq!(
            loaded.storage_path(),
            created.root().join(GOFINANCES_SQLITE)
        );
    }

    #[tokio::test]
    async fn test_config_create_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), None, Locale::default())
            .await
            .unwrap();
        assert_eq!(config.namespace(), "@gofinances");
        assert_eq!(config.locale(), Locale::PtBr);
    }

    #[tokio::test]
    async fn test_config_create_twice_fails() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), None, Locale::PtBr)
            .await
            .unwrap();
        let e = Config::create(dir.path(), None, Locale::PtBr)
            .await
            .unwrap_err();
        assert!(e.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_config_load_missing() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(dir.path()).await.is_err());
        assert!(Config::load(dir.path().join("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_store_opens_sqlite() {
        let dir = TempDir::new().unwrap();
        let config = Config::create(dir.path(), None, Locale::PtBr)
            .await
            .unwrap();
        let store = config.store().await.unwrap();
        assert_eq!(store.namespace(), "@gofinances");
        assert!(config.storage_path().is_file());
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "gofinances",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config, ConfigFile::default());
        assert_eq!(config.storage_path(), PathBuf::from(GOFINANCES_SQLITE));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        let json = r#"{
            "app_name": "wrong_app",
            "config_version": 1
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[tokio::test]
    async fn test_config_file_save_and_load() {
        let t = TempDir::new().unwrap();
        let path = t.path().join("file.json");
        let original = ConfigFile {
            namespace: "@other".to_string(),
            locale: Locale::EnUs,
            storage_path: Some(PathBuf::from("/var/lib/gofin.sqlite")),
            ..ConfigFile::default()
        };
        original.save(&path).await.unwrap();
        assert_eq!(original, ConfigFile::load(&path).await.unwrap());
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("storage_path"));
        assert!(json.contains("\"locale\":\"pt-br\""));
    }
}
