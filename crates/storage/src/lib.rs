//! SQLite persistence layer for PantryPal.
//!
//! This crate provides a durable [`KeyValueStore`] backend using SQLx with
//! SQLite. The application persists everything as JSON strings under
//! namespaced keys; a single `kv` table is all the schema there is.
//!
//! # Example
//!
//! ```no_run
//! use storage::Database;
//! use recipe_core::KeyValueStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:pantrypal.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let store = db.kv_store();
//!     store.set("pp_lang", "no").await?;
//!     assert_eq!(store.get("pp_lang").await?.as_deref(), Some("no"));
//!
//!     Ok(())
//! }
//! ```

mod error;
mod kv;

pub use error::{Result, StorageError};
pub use kv::SqliteStore;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 5;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    /// Use `sqlite::memory:` for an in-memory database (testing).
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build a [`SqliteStore`] over this database with default limits.
    pub fn kv_store(&self) -> SqliteStore {
        SqliteStore::new(self.pool.clone())
    }
}
