//! Database client for the Christmas Cheer service
//!
//! This module provides a database client that is designed to be database agnostic,
//! using SQLx as the underlying database library.

use crate::error::DbError;
use cheer_config::{AppConfig, DatabaseConfig};
use sqlx::pool::PoolOptions;
use sqlx::Pool;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Pool size used when the configuration does not set one.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database client
///
/// Cheap to clone; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct DbClient {
    /// The database connection pool
    pool: Pool<sqlx::Any>,
}

impl DbClient {
    /// Create a new database client from the application configuration
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    ///
    /// * The database URL is empty
    /// * The database connection fails
    pub async fn new(config: &AppConfig) -> Result<Self, DbError> {
        Self::from_config(&config.database).await
    }

    /// Create a new database client from a database configuration
    pub async fn from_config(db_config: &DatabaseConfig) -> Result<Self, DbError> {
        let db_url = &db_config.url;
        if db_url.is_empty() {
            return Err(DbError::ConfigError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url, db_config.max_connections).await?;
        Ok(Self { pool })
    }

    /// Create a new database client from a database URL
    ///
    /// `sqlite::memory:` is supported and is what the store tests use.
    pub async fn from_url(db_url: &str) -> Result<Self, DbError> {
        if db_url.is_empty() {
            return Err(DbError::UrlError("Database URL is empty".to_string()));
        }

        let pool = Self::create_pool(db_url, None).await?;
        Ok(Self { pool })
    }

    /// Create a connection pool
    ///
    /// In-memory SQLite databases live inside a single connection, so the pool is
    /// pinned to exactly one connection that is never recycled.
    async fn create_pool(
        db_url: &str,
        max_connections: Option<u32>,
    ) -> Result<Pool<sqlx::Any>, DbError> {
        debug!("Creating database pool with URL: {}", db_url);

        // Register the drivers with the "any" driver
        sqlx::any::install_default_drivers();

        let in_memory = db_url.contains(":memory:");

        let pool_options: PoolOptions<sqlx::Any> = if in_memory {
            PoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            PoolOptions::new()
                .max_connections(max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
                .idle_timeout(Duration::from_secs(600))
        };
        let pool_options = pool_options.acquire_timeout(Duration::from_secs(3));

        // For SQLite files, create the parent directory and the file if they don't exist
        if db_url.starts_with("sqlite:") && !in_memory {
            // Handle both "sqlite:example.db" and "sqlite://example.db" formats
            let db_path = db_url
                .strip_prefix("sqlite://")
                .or_else(|| db_url.strip_prefix("sqlite:"))
                .unwrap_or(db_url);
            let db_path = db_path.split('?').next().unwrap_or(db_path);

            if !db_path.is_empty() {
                let path = std::path::Path::new(db_path);
                if let Some(dir) = path.parent() {
                    if !dir.as_os_str().is_empty() && !dir.exists() {
                        debug!("Creating directory for SQLite database: {:?}", dir);
                        std::fs::create_dir_all(dir).map_err(|e| {
                            error!("Failed to create directory for SQLite database: {}", e);
                            DbError::PoolError(format!("Failed to create directory: {}", e))
                        })?;
                    }
                }

                if !path.exists() {
                    debug!("Creating empty SQLite database file: {}", db_path);
                    std::fs::File::create(path).map_err(|e| {
                        error!("Failed to create SQLite database file: {}", e);
                        DbError::PoolError(format!("Failed to create database file: {}", e))
                    })?;
                }
            }
        }

        let pool = pool_options
            .connect_with(sqlx::any::AnyConnectOptions::from_str(db_url)?)
            .await
            .map_err(|e| {
                error!("Failed to create database pool: {}", e);
                DbError::PoolError(e.to_string())
            })?;

        info!("Database pool created successfully");
        Ok(pool)
    }

    /// Get the database connection pool
    pub fn pool(&self) -> &Pool<sqlx::Any> {
        &self.pool
    }

    /// Execute a statement that returns no rows
    ///
    /// # Returns
    ///
    /// The number of rows affected
    pub async fn execute(&self, query: &str) -> Result<u64, DbError> {
        sqlx::query(query)
            .execute(&self.pool)
            .await
            .map(|r| r.rows_affected())
            .map_err(|e| DbError::QueryError(e.to_string()))
    }

    /// Check if the database is healthy by executing a trivial query
    pub async fn is_healthy(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

impl std::fmt::Display for DbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DbClient")
    }
}
