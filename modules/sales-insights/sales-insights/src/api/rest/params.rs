//! Query strings of the query endpoints.
//!
//! Every field is read as raw text so that a missing or malformed value is
//! answered with the module's 400 problem rather than the extractor's
//! plain-text rejection.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use storelab_errors::Problem;
use utoipa::IntoParams;

use super::error::invalid_parameter;

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-sensitive name prefix; empty matches every client.
    #[param(value_type = String)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// Exclusive lower bound.
    #[param(value_type = f64)]
    pub price: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct OrderIdQuery {
    #[param(value_type = i32)]
    pub order_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`; exclusive lower bound.
    #[param(value_type = String, example = "2024-01-31")]
    pub date: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ClientIdQuery {
    #[param(value_type = i32)]
    pub client_id: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ProductIdQuery {
    #[param(value_type = i32)]
    pub product_id: Option<String>,
}

/// The raw value of a required parameter.
pub fn required<'a>(field: &str, raw: Option<&'a str>, instance: &str) -> Result<&'a str, Problem> {
    raw.ok_or_else(|| invalid_parameter(field, "is required", instance))
}

pub fn parse_id(field: &str, raw: Option<&str>, instance: &str) -> Result<i32, Problem> {
    let raw = required(field, raw, instance)?;
    raw.trim()
        .parse::<i32>()
        .map_err(|_| invalid_parameter(field, "expected a 32-bit integer", instance))
}

/// Plain (`12.50`) or scientific (`1.25e1`) notation.
pub fn parse_decimal(field: &str, raw: Option<&str>, instance: &str) -> Result<Decimal, Problem> {
    let raw = required(field, raw, instance)?.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| invalid_parameter(field, "expected a decimal number", instance))
}

/// A bare date is read as midnight of that day.
pub fn parse_date(field: &str, raw: Option<&str>, instance: &str) -> Result<NaiveDateTime, Problem> {
    let raw = required(field, raw, instance)?.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| {
            invalid_parameter(
                field,
                "expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS",
                instance,
            )
        })
}
