//! `SQLite` specifics: in-memory detection, file preparation and the PRAGMA whitelist.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use sea_orm::sqlx::sqlite::SqliteConnectOptions;

use crate::{DbError, Result};

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

const ALLOWED_PRAGMAS: &[&str] = &["wal", "synchronous", "busy_timeout", "journal_mode"];

/// True for `sqlite::memory:`, `sqlite://:memory:` and `?mode=memory` DSNs.
#[must_use]
pub fn is_memory_dsn(dsn: &str) -> bool {
    dsn.contains(":memory:") || dsn.contains("mode=memory")
}

/// Create the parent directory of a database file if it does not exist yet.
///
/// # Errors
/// Returns `DbError::Io` when the directory cannot be created.
pub fn prepare_sqlite_path(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        tracing::debug!(dir = %parent.display(), "creating sqlite database directory");
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Validate PRAGMA overrides and apply them on top of the defaults.
///
/// # Errors
/// Returns `DbError::UnknownSqlitePragma` for keys outside the whitelist and
/// `DbError::InvalidSqlitePragma` for values a PRAGMA does not accept.
pub fn apply_pragmas(
    mut opts: SqliteConnectOptions,
    params: Option<&BTreeMap<String, String>>,
) -> Result<SqliteConnectOptions> {
    opts = opts.busy_timeout(DEFAULT_BUSY_TIMEOUT).foreign_keys(true);

    let Some(params) = params else {
        return Ok(opts);
    };

    for (key, value) in params {
        let key_lower = key.to_lowercase();
        if !ALLOWED_PRAGMAS.contains(&key_lower.as_str()) {
            return Err(DbError::UnknownSqlitePragma(key.clone()));
        }

        opts = match key_lower.as_str() {
            "wal" => opts.pragma("journal_mode", wal_mode(value)?),
            "journal_mode" => opts.pragma("journal_mode", journal_mode(value)?),
            "synchronous" => opts.pragma("synchronous", synchronous(value)?),
            "busy_timeout" => opts.busy_timeout(Duration::from_millis(busy_timeout_ms(value)?)),
            _ => unreachable!("checked against ALLOWED_PRAGMAS"),
        };
    }

    Ok(opts)
}

fn invalid(key: &str, message: String) -> DbError {
    DbError::InvalidSqlitePragma {
        key: key.to_owned(),
        message,
    }
}

fn wal_mode(value: &str) -> Result<&'static str> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Ok("WAL"),
        "false" | "0" => Ok("DELETE"),
        _ => Err(invalid("wal", format!("must be true/false/1/0, got '{value}'"))),
    }
}

fn journal_mode(value: &str) -> Result<String> {
    let upper = value.to_uppercase();
    match upper.as_str() {
        "DELETE" | "WAL" | "MEMORY" | "TRUNCATE" | "PERSIST" | "OFF" => Ok(upper),
        _ => Err(invalid(
            "journal_mode",
            format!("must be DELETE/WAL/MEMORY/TRUNCATE/PERSIST/OFF, got '{value}'"),
        )),
    }
}

fn synchronous(value: &str) -> Result<String> {
    let upper = value.to_uppercase();
    match upper.as_str() {
        "OFF" | "NORMAL" | "FULL" | "EXTRA" => Ok(upper),
        _ => Err(invalid(
            "synchronous",
            format!("must be OFF/NORMAL/FULL/EXTRA, got '{value}'"),
        )),
    }
}

fn busy_timeout_ms(value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|_| {
        invalid(
            "busy_timeout",
            format!("must be a non-negative integer, got '{value}'"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn base() -> SqliteConnectOptions {
        SqliteConnectOptions::from_str("sqlite::memory:").unwrap()
    }

    #[test]
    fn memory_dsns_are_detected() {
        assert!(is_memory_dsn("sqlite::memory:"));
        assert!(is_memory_dsn("sqlite://shared?mode=memory&cache=shared"));
        assert!(!is_memory_dsn("sqlite://data/store.db?mode=rwc"));
    }

    #[test]
    fn unknown_pragma_is_rejected() {
        let params = BTreeMap::from([("cache_size".to_owned(), "100".to_owned())]);
        let err = apply_pragmas(base(), Some(&params)).unwrap_err();
        assert!(matches!(err, DbError::UnknownSqlitePragma(k) if k == "cache_size"));
    }

    #[test]
    fn bad_pragma_value_is_rejected() {
        let params = BTreeMap::from([("synchronous".to_owned(), "sometimes".to_owned())]);
        let err = apply_pragmas(base(), Some(&params)).unwrap_err();
        assert!(matches!(err, DbError::InvalidSqlitePragma { key, .. } if key == "synchronous"));
    }

    #[test]
    fn whitelisted_pragmas_are_accepted_case_insensitively() {
        let params = BTreeMap::from([
            ("WAL".to_owned(), "true".to_owned()),
            ("busy_timeout".to_owned(), "250".to_owned()),
        ]);
        assert!(apply_pragmas(base(), Some(&params)).is_ok());
    }

    #[test]
    fn parent_directory_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let db = tmp.path().join("nested").join("store.db");
        prepare_sqlite_path(&db).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }
}
