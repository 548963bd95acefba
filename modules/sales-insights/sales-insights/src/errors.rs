//! Error catalog of the sales-insights module.
//!
//! Every Problem this module emits starts from one of these entries so the
//! `code` and `type` members stay stable across releases.

use storelab_errors::ErrDef;

macro_rules! type_url {
    ($slug:literal) => {
        concat!("https://errors.storelab.dev/sales-insights/", $slug)
    };
}

pub struct ErrorCode;

impl ErrorCode {
    #[must_use]
    pub const fn sales_insights_not_found_v1() -> &'static ErrDef {
        const DEF: ErrDef = ErrDef {
            status: 404,
            title: "Not Found",
            code: "SALES_NOT_FOUND",
            type_url: type_url!("not-found.v1"),
        };
        &DEF
    }

    #[must_use]
    pub const fn sales_insights_bad_request_v1() -> &'static ErrDef {
        const DEF: ErrDef = ErrDef {
            status: 400,
            title: "Bad Request",
            code: "SALES_BAD_REQUEST",
            type_url: type_url!("bad-request.v1"),
        };
        &DEF
    }

    #[must_use]
    pub const fn sales_insights_db_unavailable_v1() -> &'static ErrDef {
        const DEF: ErrDef = ErrDef {
            status: 503,
            title: "Service Unavailable",
            code: "SALES_DB_UNAVAILABLE",
            type_url: type_url!("db-unavailable.v1"),
        };
        &DEF
    }

    #[must_use]
    pub const fn sales_insights_internal_database_v1() -> &'static ErrDef {
        const DEF: ErrDef = ErrDef {
            status: 500,
            title: "Internal Server Error",
            code: "SALES_INTERNAL_DATABASE",
            type_url: type_url!("internal-database.v1"),
        };
        &DEF
    }
}
