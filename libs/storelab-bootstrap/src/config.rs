//! Layered application configuration.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults
//! 2. the YAML file passed with `--config`
//! 3. environment variables prefixed with `APP__` (`__` separates nesting levels,
//!    e.g. `APP__SERVER__BIND_ADDR=0.0.0.0:8080`)
//! 4. command line overrides ([`CliArgs`])

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use storelab_db::DbConnConfig;

pub const ENV_PREFIX: &str = "APP__";

/// Used when the configuration names no database at all.
pub const DEFAULT_DB_PATH: &str = "data/storelab.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DbConnConfig,
    pub logging: LoggingConfig,
    /// Per-module sections, read with [`AppConfig::module_config_or_default`].
    pub modules: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Route prefix the query endpoints are mounted under.
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8087)),
            request_timeout: Duration::from_secs(30),
            base_path: "/api/linq".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
    pub format: LogFormat,
    /// Also write logs to this file, rotated daily.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
            file: None,
        }
    }
}

/// Command line values that take part in configuration.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
    pub mock: bool,
}

impl AppConfig {
    /// Merge defaults, the optional YAML file and `APP__*` environment variables.
    ///
    /// # Errors
    /// Fails when the file does not exist or any layer does not match the schema.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = path {
            if !path.is_file() {
                bail!("config file does not exist: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let mut config: Self = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")?;

        let db = &mut config.database;
        if db.dsn.is_none() && db.path.is_none() && db.host.is_none() && db.engine.is_none() {
            db.path = Some(PathBuf::from(DEFAULT_DB_PATH));
        }

        Ok(config)
    }

    /// Apply `--port`, `-v` and `--mock`.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.bind_addr.set_port(port);
        }

        match args.verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }

        if args.mock {
            self.database = DbConnConfig::sqlite_memory();
        }
    }

    /// Render the effective configuration as YAML.
    ///
    /// # Errors
    /// Fails if the configuration cannot be serialized.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).map_err(|e| anyhow::anyhow!("failed to render config: {e}"))
    }

    /// Typed view of `modules.<name>.config`.
    ///
    /// A missing section yields `T::default()`; a malformed one is an error.
    ///
    /// # Errors
    /// Fails when the section exists but does not deserialize into `T`.
    pub fn module_config_or_default<T>(&self, module: &str) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let Some(section) = self
            .modules
            .get(module)
            .and_then(|m| m.get("config"))
            .filter(|c| !c.is_null())
        else {
            return Ok(T::default());
        };

        serde_json::from_value(section.clone())
            .with_context(|| format!("invalid config for module '{module}'"))
    }
}
