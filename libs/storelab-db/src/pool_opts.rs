//! Applies `PoolCfg` to a sqlx pool builder, whatever the driver.

use sea_orm::sqlx::Database;
use sea_orm::sqlx::pool::PoolOptions;

use crate::config::PoolCfg;

pub trait ApplyPoolOpts {
    fn apply(self, cfg: &PoolCfg) -> Self;
}

impl<DB: Database> ApplyPoolOpts for PoolOptions<DB> {
    fn apply(mut self, cfg: &PoolCfg) -> Self {
        if let Some(n) = cfg.max_conns {
            self = self.max_connections(n);
        }
        if let Some(n) = cfg.min_conns {
            self = self.min_connections(n);
        }
        if let Some(t) = cfg.acquire_timeout {
            self = self.acquire_timeout(t);
        }
        if let Some(t) = cfg.idle_timeout {
            self = self.idle_timeout(t);
        }
        if let Some(t) = cfg.max_lifetime {
            self = self.max_lifetime(t);
        }
        self.test_before_acquire(cfg.test_before_acquire)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use std::time::Duration;

    use sea_orm::sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    #[test]
    fn unset_timeouts_keep_pool_defaults() {
        let defaults = SqlitePoolOptions::new();
        let applied = SqlitePoolOptions::new().apply(&PoolCfg::default());

        assert_eq!(applied.get_idle_timeout(), defaults.get_idle_timeout());
        assert_eq!(applied.get_max_lifetime(), defaults.get_max_lifetime());
        assert!(applied.get_idle_timeout().is_some());
    }

    #[test]
    fn configured_values_override_defaults() {
        let cfg = PoolCfg {
            max_conns: Some(3),
            idle_timeout: Some(Duration::from_secs(30)),
            max_lifetime: Some(Duration::from_secs(600)),
            ..PoolCfg::default()
        };
        let applied = SqlitePoolOptions::new().apply(&cfg);

        assert_eq!(applied.get_max_connections(), 3);
        assert_eq!(applied.get_idle_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(applied.get_max_lifetime(), Some(Duration::from_secs(600)));
    }
}
