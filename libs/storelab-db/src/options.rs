//! Turning a `DbConnConfig` into typed sqlx connect options and a live handle.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use sea_orm::DatabaseConnection;

use crate::config::{DbConnConfig, PoolCfg};
use crate::pool_opts::ApplyPoolOpts;
use crate::{DbEngine, DbError, DbHandle, Result};

#[allow(clippy::unwrap_used)] // literal pattern
static ENV_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap());

/// Driver-specific connect options.
#[derive(Debug, Clone)]
pub enum DbConnectOptions {
    #[cfg(feature = "sqlite")]
    Sqlite {
        opts: sea_orm::sqlx::sqlite::SqliteConnectOptions,
        in_memory: bool,
    },
    #[cfg(feature = "pg")]
    Postgres(sea_orm::sqlx::postgres::PgConnectOptions),
    #[cfg(feature = "mysql")]
    MySql(sea_orm::sqlx::mysql::MySqlConnectOptions),
}

impl std::fmt::Display for DbConnectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite { in_memory: true, .. } => write!(f, "sqlite::memory:"),
            #[cfg(feature = "sqlite")]
            Self::Sqlite { opts, .. } => write!(f, "sqlite://{}", opts.get_filename().display()),
            #[cfg(feature = "pg")]
            Self::Postgres(opts) => write!(
                f,
                "postgresql://<redacted>@{}:{}/{}",
                opts.get_host(),
                opts.get_port(),
                opts.get_database().unwrap_or("")
            ),
            #[cfg(feature = "mysql")]
            Self::MySql(_) => write!(f, "mysql://<redacted>@..."),
        }
    }
}

impl DbConnectOptions {
    #[must_use]
    pub fn engine(&self) -> DbEngine {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite { .. } => DbEngine::Sqlite,
            #[cfg(feature = "pg")]
            Self::Postgres(_) => DbEngine::Postgres,
            #[cfg(feature = "mysql")]
            Self::MySql(_) => DbEngine::Mysql,
        }
    }

    /// Open the pool and wrap it into a SeaORM connection.
    ///
    /// # Errors
    /// Returns `DbError::Sqlx` when the pool cannot establish its connections.
    pub async fn connect(&self, pool: &PoolCfg) -> Result<DbHandle> {
        let sea: DatabaseConnection = match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite { opts, in_memory } => {
                let pool = if *in_memory {
                    pool.single_connection()
                } else {
                    pool.clone()
                };
                let sqlx_pool = sea_orm::sqlx::sqlite::SqlitePoolOptions::new()
                    .apply(&pool)
                    .connect_with(opts.clone())
                    .await?;
                sea_orm::SqlxSqliteConnector::from_sqlx_sqlite_pool(sqlx_pool)
            }
            #[cfg(feature = "pg")]
            Self::Postgres(opts) => {
                let sqlx_pool = sea_orm::sqlx::postgres::PgPoolOptions::new()
                    .apply(pool)
                    .connect_with(opts.clone())
                    .await?;
                sea_orm::SqlxPostgresConnector::from_sqlx_postgres_pool(sqlx_pool)
            }
            #[cfg(feature = "mysql")]
            Self::MySql(opts) => {
                let sqlx_pool = sea_orm::sqlx::mysql::MySqlPoolOptions::new()
                    .apply(pool)
                    .connect_with(opts.clone())
                    .await?;
                sea_orm::SqlxMySqlConnector::from_sqlx_mysql_pool(sqlx_pool)
            }
        };

        Ok(DbHandle::new(self.engine(), self.to_string(), sea))
    }
}

/// Build a database handle from configuration.
///
/// Expands `${VAR}` references, checks the config for conflicts, resolves the
/// engine and connects.
///
/// # Errors
/// Returns an error if the configuration is inconsistent, references an unset
/// environment variable, names a disabled engine, or the connection fails.
pub async fn build_db_handle(mut cfg: DbConnConfig) -> Result<DbHandle> {
    if let Some(dsn) = &cfg.dsn {
        cfg.dsn = Some(expand_env_vars(dsn)?);
    }
    if let Some(password) = &cfg.password {
        cfg.password = Some(expand_env_vars(password)?);
    }

    let options = build_connect_options(&cfg)?;
    let pool = cfg.pool.clone().unwrap_or_default();

    tracing::debug!(
        dsn = %redact_credentials_in_dsn(cfg.dsn.as_deref()),
        engine = ?options.engine(),
        "building database connection"
    );

    options.connect(&pool).await
}

/// Resolve typed connect options without connecting.
///
/// # Errors
/// See [`build_db_handle`].
pub fn build_connect_options(cfg: &DbConnConfig) -> Result<DbConnectOptions> {
    validate_config_consistency(cfg)?;
    let engine = determine_engine(cfg)?;

    match engine {
        DbEngine::Sqlite => build_sqlite_options(cfg),
        DbEngine::Postgres => build_pg_options(cfg),
        DbEngine::Mysql => build_mysql_options(cfg),
    }
}

fn validate_config_consistency(cfg: &DbConnConfig) -> Result<()> {
    if cfg.dsn.is_some() && (cfg.host.is_some() || cfg.port.is_some() || cfg.user.is_some()) {
        return Err(DbError::ConfigConflict(
            "'dsn' cannot be combined with host/port/user".to_owned(),
        ));
    }
    if cfg.dsn.is_some() && cfg.path.is_some() {
        return Err(DbError::ConfigConflict(
            "'dsn' cannot be combined with 'path'".to_owned(),
        ));
    }
    Ok(())
}

fn determine_engine(cfg: &DbConnConfig) -> Result<DbEngine> {
    match (cfg.engine, cfg.dsn.as_deref()) {
        (Some(engine), Some(dsn)) => {
            let inferred = DbEngine::detect(dsn)?;
            if inferred == engine {
                Ok(engine)
            } else {
                Err(DbError::ConfigConflict(format!(
                    "engine='{engine:?}' conflicts with DSN scheme inferred as '{inferred:?}'"
                )))
            }
        }
        (Some(engine), None) => Ok(engine),
        (None, Some(dsn)) => DbEngine::detect(dsn),
        (None, None) if cfg.path.is_some() => Ok(DbEngine::Sqlite),
        (None, None) => Err(DbError::InvalidConfig(
            "either 'dsn', 'path' or 'engine' must be set".to_owned(),
        )),
    }
}

#[cfg(feature = "sqlite")]
fn build_sqlite_options(cfg: &DbConnConfig) -> Result<DbConnectOptions> {
    use sea_orm::sqlx::sqlite::SqliteConnectOptions;

    let (opts, in_memory) = match (cfg.dsn.as_deref(), cfg.path.as_deref()) {
        (Some(dsn), _) => (
            SqliteConnectOptions::from_str(dsn)?,
            crate::sqlite::is_memory_dsn(dsn),
        ),
        (None, Some(path)) => {
            crate::sqlite::prepare_sqlite_path(path)?;
            (
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true),
                false,
            )
        }
        (None, None) => (SqliteConnectOptions::from_str("sqlite::memory:")?, true),
    };

    let opts = crate::sqlite::apply_pragmas(opts, cfg.params.as_ref())?;
    Ok(DbConnectOptions::Sqlite { opts, in_memory })
}

#[cfg(not(feature = "sqlite"))]
fn build_sqlite_options(_cfg: &DbConnConfig) -> Result<DbConnectOptions> {
    Err(DbError::FeatureDisabled("sqlite"))
}

#[cfg(feature = "pg")]
fn build_pg_options(cfg: &DbConnConfig) -> Result<DbConnectOptions> {
    use sea_orm::sqlx::postgres::PgConnectOptions;

    let opts = if let Some(dsn) = cfg.dsn.as_deref() {
        PgConnectOptions::from_str(dsn)?
    } else {
        let mut opts = PgConnectOptions::new()
            .host(cfg.host.as_deref().unwrap_or("localhost"))
            .port(cfg.port.unwrap_or(5432));
        if let Some(user) = &cfg.user {
            opts = opts.username(user);
        }
        if let Some(password) = &cfg.password {
            opts = opts.password(password);
        }
        if let Some(dbname) = &cfg.dbname {
            opts = opts.database(dbname);
        }
        opts
    };
    Ok(DbConnectOptions::Postgres(opts))
}

#[cfg(not(feature = "pg"))]
fn build_pg_options(_cfg: &DbConnConfig) -> Result<DbConnectOptions> {
    Err(DbError::FeatureDisabled("pg"))
}

#[cfg(feature = "mysql")]
fn build_mysql_options(cfg: &DbConnConfig) -> Result<DbConnectOptions> {
    use sea_orm::sqlx::mysql::MySqlConnectOptions;

    let opts = if let Some(dsn) = cfg.dsn.as_deref() {
        MySqlConnectOptions::from_str(dsn)?
    } else {
        let mut opts = MySqlConnectOptions::new()
            .host(cfg.host.as_deref().unwrap_or("localhost"))
            .port(cfg.port.unwrap_or(3306));
        if let Some(user) = &cfg.user {
            opts = opts.username(user);
        }
        if let Some(password) = &cfg.password {
            opts = opts.password(password);
        }
        if let Some(dbname) = &cfg.dbname {
            opts = opts.database(dbname);
        }
        opts
    };
    Ok(DbConnectOptions::MySql(opts))
}

#[cfg(not(feature = "mysql"))]
fn build_mysql_options(_cfg: &DbConnConfig) -> Result<DbConnectOptions> {
    Err(DbError::FeatureDisabled("mysql"))
}

/// Replace every `${NAME}` with the value of environment variable `NAME`.
///
/// # Errors
/// Returns `DbError::MissingEnvVar` naming the first unset variable.
pub fn expand_env_vars(input: &str) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;
    for caps in ENV_REF.captures_iter(input) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = std::env::var(name.as_str())
            .map_err(|_| DbError::MissingEnvVar(name.as_str().to_owned()))?;
        out.push_str(&input[last..whole.start()]);
        out.push_str(&value);
        last = whole.end();
    }
    out.push_str(&input[last..]);
    Ok(out)
}

/// Render a DSN safe for logs: the password component is masked.
#[must_use]
pub fn redact_credentials_in_dsn(dsn: Option<&str>) -> String {
    let Some(dsn) = dsn else {
        return "<none>".to_owned();
    };
    match url::Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) if dsn.contains('@') => "<redacted>".to_owned(),
        Err(_) => dsn.to_owned(),
    }
}
