use storelab_errors::{Problem, ValidationViolation};

use crate::domain::error::DomainError;
use crate::errors::ErrorCode;

/// Id of the span serving the current request, echoed back in problems.
#[must_use]
pub fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

/// Map domain error to RFC 9457 Problem using the module error catalog
#[must_use]
pub fn domain_error_to_problem(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();

    match e {
        DomainError::NotFound { what } => ErrorCode::sales_insights_not_found_v1().with_context(
            format!("{what} not found"),
            instance,
            trace_id,
        ),
        DomainError::Unavailable(_) => {
            tracing::error!(error = ?e, "Database unavailable");
            ErrorCode::sales_insights_db_unavailable_v1().with_context(
                "The database is currently unavailable",
                instance,
                trace_id,
            )
        }
        DomainError::Database(_) => {
            tracing::error!(error = ?e, "Database error occurred");
            ErrorCode::sales_insights_internal_database_v1().with_context(
                "An internal database error occurred",
                instance,
                trace_id,
            )
        }
    }
}

/// 400 for a query or path parameter that is missing or malformed.
#[must_use]
pub fn invalid_parameter(field: &str, message: &str, instance: &str) -> Problem {
    tracing::debug!(field, message, "rejected request parameter");
    ErrorCode::sales_insights_bad_request_v1()
        .with_context(
            format!("Invalid parameter '{field}': {message}"),
            instance,
            current_trace_id(),
        )
        .with_violation(ValidationViolation::new(field, message))
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e, "/")
    }
}
