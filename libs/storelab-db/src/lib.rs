//! Database access for storelab.
//!
//! Wraps a sqlx pool into a SeaORM [`DatabaseConnection`] behind [`DbHandle`].
//! Connection settings come from a serializable [`DbConnConfig`] and are turned
//! into typed sqlx connect options rather than hand-built DSN strings.
//!
//! # Features
//! - `sqlite` (default), `pg`, `mysql`: enable the matching sqlx driver.
//!
//! # Example
//! ```rust,no_run
//! use storelab_db::{DbConnConfig, build_db_handle};
//!
//! # async fn demo() -> storelab_db::Result<()> {
//! let db = build_db_handle(DbConnConfig::from_dsn("sqlite://data/store.db?mode=rwc")).await?;
//! db.ping().await?;
//! # Ok(())
//! # }
//! ```

#[cfg(not(any(feature = "sqlite", feature = "pg", feature = "mysql")))]
compile_error!("storelab-db needs at least one of the `sqlite`, `pg` or `mysql` features");

pub mod config;
pub mod options;
#[cfg(feature = "sqlite")]
pub mod sqlite;

mod pool_opts;

pub use config::{DbConnConfig, PoolCfg};
pub use options::{
    DbConnectOptions, build_connect_options, build_db_handle, expand_env_vars,
    redact_credentials_in_dsn,
};
pub use sea_orm::{ConnectionTrait as DbConnTrait, DatabaseConnection};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error("Feature not enabled: {0}")]
    FeatureDisabled(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration conflict: {0}")]
    ConfigConflict(String),

    #[error("Invalid SQLite PRAGMA parameter '{key}': {message}")]
    InvalidSqlitePragma { key: String, message: String },

    #[error("Unknown SQLite PRAGMA parameter: {0}")]
    UnknownSqlitePragma(String),

    #[error("Environment variable '{0}' is not set")]
    MissingEnvVar(String),

    #[error(transparent)]
    Sqlx(#[from] sea_orm::sqlx::Error),

    #[error(transparent)]
    Sea(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Supported engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbEngine {
    Sqlite,
    Postgres,
    Mysql,
}

impl DbEngine {
    /// Detect the engine from a DSN scheme.
    ///
    /// # Errors
    /// Returns `DbError::UnknownDsn` if the scheme is not recognized.
    pub fn detect(dsn: &str) -> Result<Self> {
        let s = dsn.trim_start();
        if s.starts_with("postgres://") || s.starts_with("postgresql://") {
            Ok(Self::Postgres)
        } else if s.starts_with("mysql://") || s.starts_with("mariadb://") {
            Ok(Self::Mysql)
        } else if s.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else {
            Err(DbError::UnknownDsn(redact_credentials_in_dsn(Some(dsn))))
        }
    }
}

/// A pooled connection plus what it points at.
///
/// Cloning is cheap: clones share the pool.
#[derive(Debug, Clone)]
pub struct DbHandle {
    engine: DbEngine,
    dsn: String,
    sea: DatabaseConnection,
}

impl DbHandle {
    pub(crate) fn new(engine: DbEngine, dsn: String, sea: DatabaseConnection) -> Self {
        tracing::info!(engine = ?engine, dsn = %dsn, "database pool ready");
        Self { engine, dsn, sea }
    }

    /// Wrap an already opened SeaORM connection (tests, embedding).
    #[must_use]
    pub fn from_connection(engine: DbEngine, sea: DatabaseConnection) -> Self {
        Self {
            engine,
            dsn: String::from("<external>"),
            sea,
        }
    }

    #[must_use]
    pub fn engine(&self) -> DbEngine {
        self.engine
    }

    /// Redacted DSN, safe to log.
    #[must_use]
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    #[must_use]
    pub fn conn(&self) -> &DatabaseConnection {
        &self.sea
    }

    /// Owned connection for components that store it.
    #[must_use]
    pub fn sea(&self) -> DatabaseConnection {
        self.sea.clone()
    }

    /// Round-trip to the database.
    ///
    /// # Errors
    /// Returns `DbError::Sea` when the database cannot be reached.
    pub async fn ping(&self) -> Result<()> {
        self.sea.ping().await.map_err(DbError::from)
    }

    /// Close the pool; outstanding clones stop working.
    ///
    /// # Errors
    /// Returns `DbError::Sea` if closing fails.
    pub async fn close(self) -> Result<()> {
        tracing::info!(dsn = %self.dsn, "closing database pool");
        self.sea.close().await.map_err(DbError::from)
    }
}
