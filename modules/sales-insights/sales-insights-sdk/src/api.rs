//! `SalesInsightsApi` trait definition.
//!
//! Every method is a read-only query over the current database state.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::errors::SalesInsightsError;
use crate::models::{
    Client, ClientOrders, ClientSales, ClientTotalProducts, Order, OrderLine, OrderWithDetails,
    Product, ProductQuantity, TopClients,
};

/// Public API of the sales-insights module.
///
/// Implemented in-process by the module's `LocalClient`.
#[async_trait]
pub trait SalesInsightsApi: Send + Sync {
    /// Clients whose name starts with `prefix` (case-sensitive).
    async fn clients_by_name_prefix(&self, prefix: &str)
    -> Result<Vec<Client>, SalesInsightsError>;

    /// Products priced strictly above `price`.
    async fn products_above_price(&self, price: Decimal)
    -> Result<Vec<Product>, SalesInsightsError>;

    async fn order_details(&self, order_id: i32)
    -> Result<Vec<ProductQuantity>, SalesInsightsError>;

    /// Sum of quantities of one order; 0 when it has no lines.
    async fn order_total_quantity(&self, order_id: i32) -> Result<i64, SalesInsightsError>;

    /// Fails with `NotFound` when there are no products.
    async fn most_expensive_product(&self) -> Result<Product, SalesInsightsError>;

    /// Orders placed strictly after `date`.
    async fn orders_after_date(
        &self,
        date: NaiveDateTime,
    ) -> Result<Vec<Order>, SalesInsightsError>;

    /// Fails with `NotFound` when there are no products.
    async fn average_product_price(&self) -> Result<Decimal, SalesInsightsError>;

    /// Products whose description is null or empty.
    async fn products_missing_description(&self) -> Result<Vec<Product>, SalesInsightsError>;

    /// All clients tied at the highest order count.
    async fn client_with_most_orders(&self) -> Result<TopClients, SalesInsightsError>;

    async fn all_order_details(&self) -> Result<Vec<OrderLine>, SalesInsightsError>;

    /// Distinct names of products the client ever ordered.
    async fn products_bought_by_client(
        &self,
        client_id: i32,
    ) -> Result<Vec<String>, SalesInsightsError>;

    /// Distinct names of clients who ever ordered the product.
    async fn clients_who_bought_product(
        &self,
        product_id: i32,
    ) -> Result<Vec<String>, SalesInsightsError>;

    async fn clients_with_orders(&self) -> Result<Vec<ClientOrders>, SalesInsightsError>;

    /// Fails with `NotFound` when the order does not exist.
    async fn order_with_details(
        &self,
        order_id: i32,
    ) -> Result<OrderWithDetails, SalesInsightsError>;

    async fn clients_total_products(&self)
    -> Result<Vec<ClientTotalProducts>, SalesInsightsError>;

    /// Per-client sales, highest first.
    async fn client_sales(&self) -> Result<Vec<ClientSales>, SalesInsightsError>;
}
