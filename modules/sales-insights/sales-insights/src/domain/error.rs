use sales_insights_sdk::SalesInsightsError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{what} not found")]
    NotFound { what: String },

    /// The database could not be reached or no connection was available.
    #[error("Storage unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[source] anyhow::Error),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

impl From<DomainError> for SalesInsightsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { what } => Self::not_found(what),
            DomainError::Unavailable(_) => Self::unavailable(),
            DomainError::Database(_) => Self::internal(),
        }
    }
}
