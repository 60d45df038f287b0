//! SQL implementation of the cheer store
//!
//! One `SqlStore` implements every repository trait of this crate. Each instance is
//! bound to an [`Environment`]; every row it writes carries that environment and every
//! query filters on it, so production and development data share tables without mixing.

use crate::error::DbError;
use crate::DbClient;
use cheer_config::Environment;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, info};

/// Schema statements, executed one by one
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS installations (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        environment TEXT NOT NULL,
        installation_id TEXT NOT NULL,
        app_name TEXT,
        app_identifier TEXT,
        device_token TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE(environment, installation_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS installation_refs (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        environment TEXT NOT NULL,
        installation_id TEXT NOT NULL,
        app_name TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_installation_refs_created
        ON installation_refs (environment, created_at)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS counters (
        id TEXT PRIMARY KEY,
        count INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS cheers (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        environment TEXT NOT NULL,
        from_user_id TEXT NOT NULL,
        from_name TEXT NOT NULL,
        from_installation_id TEXT NOT NULL,
        from_location TEXT NOT NULL,
        to_installation_id TEXT NOT NULL,
        message TEXT NOT NULL,
        has_been_responded_to INTEGER NOT NULL DEFAULT 0,
        initiation_note_id TEXT,
        created_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_cheers_recipient
        ON cheers (environment, to_installation_id, created_at)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS feedback (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        environment TEXT NOT NULL,
        user_id TEXT NOT NULL,
        installation_id TEXT NOT NULL,
        name TEXT NOT NULL,
        location_description TEXT NOT NULL,
        text TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
];

/// Read a nullable text column selected as `COALESCE(col, '')`
///
/// The `Any` driver cannot decode NULL into `Option<String>`, so empty text stands in
/// for a missing value.
pub(crate) fn optional_text(row: &AnyRow, column: &str) -> Result<Option<String>, DbError> {
    let value: String = row.try_get(column)?;
    Ok(Some(value).filter(|v| !v.is_empty()))
}

/// SQL implementation of the cheer store
#[derive(Debug, Clone)]
pub struct SqlStore {
    /// The database client
    pub(crate) db_client: DbClient,
    /// Namespace of every record this store touches
    pub(crate) environment: Environment,
}

impl SqlStore {
    /// Create a new SQL store bound to `environment`
    pub fn new(db_client: DbClient, environment: Environment) -> Self {
        Self {
            db_client,
            environment,
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The well-known id of this environment's counter record
    pub fn counter_id(&self) -> &'static str {
        self.environment.as_str()
    }

    pub async fn is_healthy(&self) -> bool {
        self.db_client.is_healthy().await
    }

    /// Initialize the database schema
    ///
    /// Creates the tables if they don't exist and seeds this environment's counter
    /// with zero if it is missing. Safe to call on every startup.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing cheer store schema");

        for statement in SCHEMA {
            self.db_client.execute(statement).await?;
        }

        sqlx::query(
            r#"
            INSERT INTO counters (id, count) VALUES ($1, 0)
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(self.counter_id())
        .execute(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        info!(
            "Cheer store schema initialized for environment: {}",
            self.environment
        );
        Ok(())
    }
}
