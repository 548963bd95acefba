//! Error types shared by storelab crates.
//!
//! - RFC 9457 Problem Details (`Problem`)
//! - Error catalog entries (`ErrDef`)
//! - `ApiResult`, the handler result alias

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, Problem, ValidationViolation};

/// Result type for HTTP handlers; `?` converts anything that is `Into<Problem>`.
pub type ApiResult<T = ()> = Result<T, Problem>;

/// Attach instance and `trace_id` to a Problem.
pub fn finalize(mut p: Problem, instance: &str, trace_id: Option<String>) -> Problem {
    p = p.with_instance(instance);
    if let Some(tid) = trace_id {
        p = p.with_trace_id(tid);
    }
    p
}
