//! Implements the `Storage` trait on a single SQLite table.

use crate::error::Res;
use crate::storage::{migrations, Storage};
use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, trace};

/// A `Storage` backed by a `kv (key, value)` table in a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Opens the SQLite file at `path`, creating it if it does not exist, and migrates the
    /// schema to the current version.
    pub async fn open(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.display()))
            .context("Failed to parse SQLite connection string")?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Unable to open SQLite database {}", path.display()))?;

        let version = migrations::bootstrap(&pool).await?;
        migrations::run(&pool, version, migrations::CURRENT_VERSION)
            .await
            .with_context(|| format!("Unable to migrate {}", path.display()))?;
        debug!("Opened storage at {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            pool,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl Storage for SqliteStorage {
    async fn get(&self, key: &str) -> Res<Option<String>> {
        trace!("get {key}");
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Unable to read key '{key}'"))?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: &str, value: &str) -> Res<()> {
        trace!("set {key}");
        sqlx::query(
            "INSERT INTO kv (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to write key '{key}'"))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Res<()> {
        trace!("remove {key}");
        sqlx::query("DELETE FROM kv WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to remove key '{key}'"))?;
        Ok(())
    }
}
