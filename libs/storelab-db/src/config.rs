//! Serializable database configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::DbEngine;

/// Connection settings for the single database the server talks to.
///
/// Either `dsn` or the discrete `host`/`port`/`user`/`password`/`dbname`
/// fields are used, never both. `password` and `dsn` may contain `${VAR}`
/// references that are expanded from the environment at connect time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConnConfig {
    pub engine: Option<DbEngine>,
    pub dsn: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
    /// `SQLite` database file; in-memory when neither `path` nor `dsn` is set.
    pub path: Option<PathBuf>,
    /// `SQLite` PRAGMA overrides (whitelisted).
    pub params: Option<BTreeMap<String, String>>,
    pub pool: Option<PoolCfg>,
}

impl DbConnConfig {
    /// Shorthand for a DSN-only configuration.
    #[must_use]
    pub fn from_dsn(dsn: impl Into<String>) -> Self {
        Self {
            dsn: Some(dsn.into()),
            ..Self::default()
        }
    }

    /// A private in-memory `SQLite` database.
    #[must_use]
    pub fn sqlite_memory() -> Self {
        Self::from_dsn("sqlite::memory:")
    }
}

/// Pool knobs; each unset value keeps the sqlx default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolCfg {
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub idle_timeout: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub max_lifetime: Option<Duration>,
    pub test_before_acquire: bool,
}

impl Default for PoolCfg {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            min_conns: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            max_lifetime: None,
            test_before_acquire: false,
        }
    }
}

impl PoolCfg {
    /// Settings for an in-memory `SQLite` database: every pooled connection
    /// would otherwise open its own empty database.
    #[must_use]
    pub fn single_connection(&self) -> Self {
        Self {
            max_conns: Some(1),
            min_conns: Some(1),
            idle_timeout: None,
            max_lifetime: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_durations_parse_humantime() {
        let cfg: PoolCfg = serde_json::from_value(serde_json::json!({
            "max_conns": 4,
            "acquire_timeout": "5s",
            "idle_timeout": "2m"
        }))
        .unwrap();

        assert_eq!(cfg.max_conns, Some(4));
        assert_eq!(cfg.acquire_timeout, Some(Duration::from_secs(5)));
        assert_eq!(cfg.idle_timeout, Some(Duration::from_secs(120)));
        assert_eq!(cfg.max_lifetime, None);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = serde_json::from_value::<DbConnConfig>(serde_json::json!({ "hostname": "db" }));
        assert!(err.is_err());
    }

    #[test]
    fn single_connection_keeps_acquire_timeout() {
        let pool = PoolCfg::default().single_connection();
        assert_eq!(pool.max_conns, Some(1));
        assert_eq!(pool.acquire_timeout, Some(Duration::from_secs(30)));
    }
}
