//! Schema migrations for the SQLite key-value store.
//!
//! Files follow `migration_NN_up.sql` / `migration_NN_down.sql`, where the up file moves the
//! schema from version `NN-1` to `NN` and the down file moves it back.

use crate::error::Res;
use anyhow::{bail, Context};
use sqlx::{Executor, SqlitePool};
use tracing::debug;

/// The schema version this build expects.
pub(super) const CURRENT_VERSION: i32 = 1;

struct Migration {
    version: i32,
    up_sql: &'static str,
    down_sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    up_sql: include_str!("migration_01_up.sql"),
    down_sql: include_str!("migration_01_down.sql"),
}];

/// Creates the `schema_version` table if this is a new database and returns the version it
/// records.
pub(super) async fn bootstrap(pool: &SqlitePool) -> Res<i32> {
    let (exists,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
    )
    .fetch_one(pool)
    .await
    .context("Failed to look for the schema_version table")?;

    if exists == 0 {
        debug!("New database, creating schema_version");
        let mut tx = pool.begin().await.context("Failed to begin transaction")?;
        sqlx::query("CREATE TABLE schema_version (version INTEGER NOT NULL)")
            .execute(&mut *tx)
            .await
            .context("Failed to create schema_version table")?;
        sqlx::query("INSERT INTO schema_version (version) VALUES (0)")
            .execute(&mut *tx)
            .await
            .context("Failed to insert initial schema version")?;
        tx.commit()
            .await
            .context("Failed to commit schema_version")?;
        return Ok(0);
    }

    let (version,): (i64,) = sqlx::query_as("SELECT MAX(version) FROM schema_version")
        .fetch_one(pool)
        .await
        .context("Failed to query schema version")?;
    i32::try_from(version).with_context(|| format!("Invalid schema version {version}"))
}

/// Runs migrations to bring the database from `current_ver` to `target_ver`, in either
/// direction. Each step runs in its own transaction together with the `schema_version` update.
pub(super) async fn run(pool: &SqlitePool, current_ver: i32, target_ver: i32) -> Res<()> {
    if current_ver == target_ver {
        debug!("Database already at version {target_ver}");
        return Ok(());
    }

    validate_migrations(current_ver, target_ver)?;

    if current_ver < target_ver {
        for version in (current_ver + 1)..=target_ver {
            let migration = find(version)?;
            debug!("Running migration {version:02} (up)");
            run_single_migration(pool, migration.up_sql, version).await?;
        }
    } else {
        for version in (target_ver + 1..=current_ver).rev() {
            let migration = find(version)?;
            debug!("Running migration {version:02} (down)");
            run_single_migration(pool, migration.down_sql, version - 1).await?;
        }
    }

    debug!("Schema now at version {target_ver}");
    Ok(())
}

fn find(version: i32) -> Res<&'static Migration> {
    MIGRATIONS
        .iter()
        .find(|m| m.version == version)
        .with_context(|| format!("Migration {version} not found"))
}

async fn run_single_migration(pool: &SqlitePool, sql: &str, new_version: i32) -> Res<()> {
    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin migration transaction")?;

    tx.execute(sql)
        .await
        .context("Failed to execute migration SQL")?;

    sqlx::query("UPDATE schema_version SET version = ?")
        .bind(new_version)
        .execute(&mut *tx)
        .await
        .context("Failed to update schema_version")?;

    tx.commit()
        .await
        .context("Failed to commit migration transaction")?;

    Ok(())
}

fn validate_migrations(current_version: i32, target_version: i32) -> Res<()> {
    if target_version > CURRENT_VERSION || current_version > CURRENT_VERSION {
        bail!(
            "Schema version {} is newer than this program supports ({CURRENT_VERSION})",
            current_version.max(target_version)
        );
    }
    let (start, end) = if current_version < target_version {
        (current_version + 1, target_version)
    } else {
        (target_version + 1, current_version)
    };
    for version in start..=end {
        if !MIGRATIONS.iter().any(|m| m.version == version) {
            bail!("Migration {version} is missing, cannot migrate from {current_version} to {target_version}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;
    use tempfile::TempDir;

    async fn create_test_db() -> (TempDir, SqlitePool) {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.sqlite");
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
            .unwrap()
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        (temp_dir, pool)
    }

    async fn table_exists(pool: &SqlitePool, table_name: &str) -> bool {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?")
                .bind(table_name)
                .fetch_one(pool)
                .await
                .unwrap();
        count > 0
    }

    #[tokio::test]
    async fn test_bootstrap_new_database() {
        let (_dir, pool) = create_test_db().await;
        assert_eq!(bootstrap(&pool).await.unwrap(), 0);
        // Running it again reads the stored version instead of recreating the table.
        assert_eq!(bootstrap(&pool).await.unwrap(), 0);
        assert!(table_exists(&pool, "schema_version").await);
    }

    #[tokio::test]
    async fn test_up_then_down() {
        let (_dir, pool) = create_test_db().await;
        bootstrap(&pool).await.unwrap();

        run(&pool, 0, 1).await.unwrap();
        assert_eq!(bootstrap(&pool).await.unwrap(), 1);
        assert!(table_exists(&pool, "kv").await);

        run(&pool, 1, 0).await.unwrap();
        assert_eq!(bootstrap(&pool).await.unwrap(), 0);
        assert!(!table_exists(&pool, "kv").await);
    }

    #[tokio::test]
    async fn test_no_op_at_target() {
        let (_dir, pool) = create_test_db().await;
        bootstrap(&pool).await.unwrap();
        run(&pool, 0, 1).await.unwrap();
        run(&pool, 1, 1).await.unwrap();
        assert_eq!(bootstrap(&pool).await.unwrap(), 1);
    }

    #[test]
    fn test_validate_migrations() {
        assert!(validate_migrations(0, 1).is_ok());
        assert!(validate_migrations(1, 0).is_ok());
        assert!(validate_migrations(0, 2).is_err());
        assert!(validate_migrations(3, 1).is_err());
    }
}
