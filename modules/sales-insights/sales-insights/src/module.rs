use std::sync::Arc;

use axum::Router;
use sales_insights_sdk::SalesInsightsApi;
use sea_orm_migration::MigratorTrait;
use storelab_db::DbHandle;
use tracing::info;

use crate::api::rest::routes;
use crate::config::SalesInsightsConfig;
use crate::domain::service::Service;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::seed::{self, SeedSummary};
use crate::infra::storage::OrmSalesRepository;
use crate::local_client::LocalClient;

/// The sales-insights module wired to one database.
pub struct SalesInsightsModule {
    service: Arc<Service>,
}

impl SalesInsightsModule {
    /// Key of this module under `modules` in the application config.
    pub const NAME: &'static str = "sales-insights";

    /// Migrate and seed as configured, then build the query service.
    ///
    /// # Errors
    /// Fails when a migration or the demo seed fails.
    pub async fn init(db: &DbHandle, config: &SalesInsightsConfig) -> anyhow::Result<Self> {
        info!("Initializing sales-insights module");

        if config.run_migrations {
            Self::migrate(db).await?;
        }
        if config.seed_demo_data {
            Self::seed(db).await?;
        }

        let repo = OrmSalesRepository::new(db.sea());
        let service = Arc::new(Service::new(Arc::new(repo)));

        info!("sales-insights module initialized");
        Ok(Self { service })
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    /// Propagates migration failures.
    pub async fn migrate(db: &DbHandle) -> anyhow::Result<()> {
        info!("Running sales-insights database migrations");
        Migrator::up(db.conn(), None).await?;
        info!("sales-insights database migrations completed successfully");
        Ok(())
    }

    /// Insert the demo catalog unless the database already has clients.
    ///
    /// # Errors
    /// Propagates database failures; nothing is inserted in that case.
    pub async fn seed(db: &DbHandle) -> anyhow::Result<Option<SeedSummary>> {
        Ok(seed::seed_demo_data(db.conn()).await?)
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// REST routes with the query endpoints mounted under `base_path`.
    pub fn router(&self, base_path: &str) -> Router {
        info!(base_path, "Registering sales-insights REST routes");
        routes::router(self.service(), base_path)
    }

    /// In-process client for callers that skip HTTP.
    #[must_use]
    pub fn client(&self) -> Arc<dyn SalesInsightsApi> {
        Arc::new(LocalClient::new(self.service()))
    }
}
