//! SQLite-backed roll configuration.
//!
//! The `config` table belongs to the sheet platform; this adapter only reads
//! the `enable_success_types` row from it.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use sheetroll_domain::RollConfig;

use crate::infrastructure::ports::{RepoError, RollConfigRepo};

/// Row holding the success-type toggle as a JSON boolean.
pub const SUCCESS_TYPES_KEY: &str = "enable_success_types";

/// SQLite implementation of the roll configuration store.
pub struct SqliteRollConfigRepo {
    pool: SqlitePool,
}

impl SqliteRollConfigRepo {
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("config", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS config (
                name TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("config", e))?;

        Ok(Self { pool })
    }

    async fn get_value(&self, name: &str) -> Result<Option<String>, RepoError> {
        let row = sqlx::query("SELECT value FROM config WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("config", e))?;

        Ok(row.map(|row| row.get("value")))
    }

    /// Write the success-type toggle. Used for bootstrap and tests.
    pub async fn set_success_types_enabled(&self, enabled: bool) -> Result<(), RepoError> {
        let json = serde_json::to_string(&enabled).map_err(RepoError::serialization)?;

        sqlx::query(
            r#"
            INSERT INTO config (name, value)
            VALUES (?, ?)
            ON CONFLICT(name) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(SUCCESS_TYPES_KEY)
        .bind(json)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("config", e))?;

        Ok(())
    }
}

#[async_trait]
impl RollConfigRepo for SqliteRollConfigRepo {
    async fn load(&self) -> Result<RollConfig, RepoError> {
        let Some(raw) = self.get_value(SUCCESS_TYPES_KEY).await? else {
            return Ok(RollConfig::default());
        };

        match serde_json::from_str::<bool>(&raw) {
            Ok(enabled) => Ok(RollConfig::new(enabled)),
            Err(e) => {
                tracing::debug!(value = %raw, error = %e, "Unparsable success-type toggle");
                Ok(RollConfig::default())
            }
        }
    }
}
