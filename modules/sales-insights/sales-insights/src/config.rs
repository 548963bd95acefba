use serde::{Deserialize, Serialize};

/// `modules.sales-insights.config` section of the application config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SalesInsightsConfig {
    /// Apply pending schema migrations when the module starts.
    pub run_migrations: bool,
    /// Insert the demo catalog into an empty database at startup.
    pub seed_demo_data: bool,
}

impl Default for SalesInsightsConfig {
    fn default() -> Self {
        Self {
            run_migrations: true,
            seed_demo_data: false,
        }
    }
}
