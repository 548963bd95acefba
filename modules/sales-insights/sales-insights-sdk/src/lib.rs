//! Sales insights SDK
//!
//! Transport-agnostic contract of the sales-insights module:
//! - [`SalesInsightsApi`]: one async method per canned query
//! - [`models`]: entities and the projections the queries return
//! - [`SalesInsightsError`]: errors surfaced to consumers

pub mod api;
pub mod errors;
pub mod models;

pub use api::SalesInsightsApi;
pub use errors::SalesInsightsError;
pub use models::{
    Client, ClientOrderCount, ClientOrders, ClientSales, ClientTotalProducts, Order, OrderDetail,
    OrderLine, OrderSummary, OrderWithDetails, Product, ProductQuantity, TopClients,
};
