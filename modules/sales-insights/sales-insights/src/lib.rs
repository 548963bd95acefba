//! Sales insights module
//!
//! Canned analytical queries (filtering, aggregation, grouping, joins) over
//! clients, products, orders and order lines, served as JSON over HTTP.
//! The public API is defined in `sales-insights-sdk` and re-exported here.

pub use sales_insights_sdk::{
    Client, ClientOrderCount, ClientOrders, ClientSales, ClientTotalProducts, Order, OrderDetail,
    OrderLine, OrderSummary, OrderWithDetails, Product, ProductQuantity, SalesInsightsApi,
    SalesInsightsError, TopClients,
};

pub mod module;
pub use module::SalesInsightsModule;

pub mod config;
pub use config::SalesInsightsConfig;

pub mod local_client;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod errors;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
