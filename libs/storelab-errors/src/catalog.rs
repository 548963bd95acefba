//! Static error definitions that modules declare once and reuse per request.

use crate::problem::Problem;
use http::StatusCode;

/// One entry of a module's error catalog.
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Build a bare problem carrying this definition's status, code and type.
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Problem::new(status, self.title, detail.into())
            .with_code(self.code)
            .with_type(self.type_url)
    }

    /// Build a problem and attach the request path and trace id in one step.
    pub fn with_context(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        crate::finalize(self.as_problem(detail), instance, trace_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: ErrDef = ErrDef {
        status: 404,
        title: "Not Found",
        code: "SAMPLE_NOT_FOUND",
        type_url: "https://errors.storelab.dev/SAMPLE_NOT_FOUND",
    };

    #[test]
    fn with_context_fills_instance_and_trace() {
        let p = SAMPLE.with_context("nothing here", "/api/linq/x", Some("42".to_owned()));

        assert_eq!(p.status, StatusCode::NOT_FOUND);
        assert_eq!(p.code, "SAMPLE_NOT_FOUND");
        assert_eq!(p.type_url, "https://errors.storelab.dev/SAMPLE_NOT_FOUND");
        assert_eq!(p.instance, "/api/linq/x");
        assert_eq!(p.trace_id.as_deref(), Some("42"));
    }

    #[test]
    fn invalid_status_falls_back_to_500() {
        let broken = ErrDef {
            status: 42,
            ..SAMPLE
        };
        assert_eq!(
            broken.as_problem("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
