//! Error types for the sales-insights SDK.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SalesInsightsError {
    #[error("{what} not found")]
    NotFound { what: String },

    #[error("Storage unavailable")]
    Unavailable,

    #[error("Internal error")]
    Internal,
}

impl SalesInsightsError {
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::Unavailable
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
